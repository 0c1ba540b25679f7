/// Camera data types and the device abstraction
///
/// The workflow never talks to camera hardware directly; it drives a
/// `CameraSession`, which in turn drives anything implementing
/// [`CameraDevice`]. Tests substitute a scripted device.

use thiserror::Error;

/// Errors raised while acquiring or using a device camera
#[derive(Debug, Clone, Error)]
pub enum CaptureError {
    #[error("no camera device available")]
    NoDevice,
    #[error("failed to open camera: {0}")]
    Open(String),
    #[error("failed to read camera frame: {0}")]
    Frame(String),
    #[error("no frame available to capture yet")]
    NoFrame,
    #[error("failed to encode captured frame: {0}")]
    Encode(String),
}

/// Which way the requested camera should face.
///
/// Desktop hardware carries no facing metadata, so `Environment` maps to
/// the highest-index enumerated device (external and rear modules
/// enumerate after built-in ones) and `User` to the first.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CameraFacing {
    User,
    Environment,
}

/// A single decoded camera frame at native resolution (RGBA8)
#[derive(Clone, PartialEq, Eq)]
pub struct CameraFrame {
    pub width: u32,
    pub height: u32,
    pub rgba: Vec<u8>,
}

impl std::fmt::Debug for CameraFrame {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CameraFrame")
            .field("width", &self.width)
            .field("height", &self.height)
            .finish()
    }
}

/// A still frozen from the live feed, encoded as JPEG at the feed's
/// native resolution
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CapturedStill {
    pub width: u32,
    pub height: u32,
    pub jpeg: Vec<u8>,
}

/// Abstraction over a physical camera.
///
/// Implementations own the underlying stream. `release` is called exactly
/// once, from the session's reader thread, after the session stops.
pub trait CameraDevice: Send {
    /// Block until the next frame is available and return it
    fn next_frame(&mut self) -> Result<CameraFrame, CaptureError>;

    /// Stop the underlying stream and free the hardware
    fn release(&mut self);
}

#[cfg(test)]
pub(crate) mod testing {
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::sync::Arc;
    use std::thread;
    use std::time::Duration;

    use super::{CameraDevice, CameraFrame, CaptureError};

    /// Scripted camera that serves a fixed frame and records its release
    pub struct FakeDevice {
        pub frame: CameraFrame,
        pub released: Arc<AtomicBool>,
    }

    impl FakeDevice {
        pub fn new() -> (Self, Arc<AtomicBool>) {
            let released = Arc::new(AtomicBool::new(false));
            let frame = CameraFrame {
                width: 4,
                height: 2,
                rgba: vec![128; 4 * 2 * 4],
            };
            (
                Self {
                    frame,
                    released: Arc::clone(&released),
                },
                released,
            )
        }
    }

    impl CameraDevice for FakeDevice {
        fn next_frame(&mut self) -> Result<CameraFrame, CaptureError> {
            thread::sleep(Duration::from_millis(2));
            Ok(self.frame.clone())
        }

        fn release(&mut self) {
            self.released.store(true, Ordering::SeqCst);
        }
    }
}

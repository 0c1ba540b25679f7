/// Live camera sessions
///
/// A session owns a reader thread that continually pulls frames from a
/// [`CameraDevice`] into a latest-frame cell. At most one session should be
/// open at a time; the workflow enforces that. Closing the session stops
/// the thread and releases the device. Dropping the last handle does the
/// same, so the hardware cannot outlive the owning view.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::thread::{self, JoinHandle};
use std::time::Duration;

use image::codecs::jpeg::JpegEncoder;
use log::{info, warn};

use super::device::NokhwaDevice;
use super::types::{CameraDevice, CameraFacing, CameraFrame, CapturedStill, CaptureError};

/// JPEG quality for captured stills
const STILL_JPEG_QUALITY: u8 = 90;

/// How long the reader sleeps after a failed frame read before retrying
const FRAME_RETRY_DELAY: Duration = Duration::from_millis(50);

struct SessionShared {
    latest: Arc<Mutex<Option<CameraFrame>>>,
    running: Arc<AtomicBool>,
    worker: Mutex<Option<JoinHandle<()>>>,
}

impl SessionShared {
    fn stop(&self) {
        self.running.store(false, Ordering::SeqCst);
        if let Ok(mut worker) = self.worker.lock() {
            if let Some(handle) = worker.take() {
                let _ = handle.join();
            }
        }
        if let Ok(mut latest) = self.latest.lock() {
            *latest = None;
        }
    }
}

impl Drop for SessionShared {
    // Backstop: the reader thread only holds the cell and the flag, never
    // the shared struct, so this runs when the last session handle goes
    // away and the device is released even without an explicit close.
    fn drop(&mut self) {
        self.stop();
    }
}

/// Handle to an active camera stream.
///
/// Clones share one underlying session; `close` on any handle stops it.
#[derive(Clone)]
pub struct CameraSession {
    shared: Arc<SessionShared>,
}

impl std::fmt::Debug for CameraSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CameraSession")
            .field("active", &self.is_active())
            .finish()
    }
}

impl CameraSession {
    /// Open the native camera matching `facing` and start streaming
    pub fn open(facing: CameraFacing) -> Result<Self, CaptureError> {
        let device = NokhwaDevice::open(facing)?;
        Ok(Self::start(Box::new(device)))
    }

    /// Start a session over an already-open device
    pub fn start(mut device: Box<dyn CameraDevice>) -> Self {
        let latest = Arc::new(Mutex::new(None));
        let running = Arc::new(AtomicBool::new(true));

        let reader_latest = Arc::clone(&latest);
        let reader_running = Arc::clone(&running);
        let worker = thread::spawn(move || {
            while reader_running.load(Ordering::SeqCst) {
                match device.next_frame() {
                    Ok(frame) => {
                        if let Ok(mut cell) = reader_latest.lock() {
                            *cell = Some(frame);
                        }
                    }
                    Err(err) => {
                        warn!("camera frame read failed: {err}");
                        thread::sleep(FRAME_RETRY_DELAY);
                    }
                }
            }
            device.release();
            info!("📷 Camera released");
        });

        Self {
            shared: Arc::new(SessionShared {
                latest,
                running,
                worker: Mutex::new(Some(worker)),
            }),
        }
    }

    /// Whether the reader thread is still streaming
    pub fn is_active(&self) -> bool {
        self.shared.running.load(Ordering::SeqCst)
    }

    /// The most recent frame, if one has arrived yet
    pub fn latest_frame(&self) -> Option<CameraFrame> {
        self.shared.latest.lock().ok().and_then(|cell| cell.clone())
    }

    /// Freeze the current frame into a JPEG still at native resolution.
    /// The session keeps running; the caller decides when to close it.
    pub fn capture_still(&self) -> Result<CapturedStill, CaptureError> {
        let frame = self.latest_frame().ok_or(CaptureError::NoFrame)?;
        encode_still(&frame)
    }

    /// Stop streaming and release the device. Idempotent.
    pub fn close(&self) {
        self.shared.stop();
    }
}

/// Encode a frame as JPEG. JPEG has no alpha channel, so the RGBA frame is
/// flattened to RGB first.
fn encode_still(frame: &CameraFrame) -> Result<CapturedStill, CaptureError> {
    let rgba = image::RgbaImage::from_raw(frame.width, frame.height, frame.rgba.clone())
        .ok_or_else(|| CaptureError::Encode("frame buffer size mismatch".to_string()))?;
    let rgb = image::DynamicImage::ImageRgba8(rgba).to_rgb8();

    let mut jpeg = Vec::new();
    let encoder = JpegEncoder::new_with_quality(&mut jpeg, STILL_JPEG_QUALITY);
    rgb.write_with_encoder(encoder)
        .map_err(|err| CaptureError::Encode(err.to_string()))?;

    Ok(CapturedStill {
        width: frame.width,
        height: frame.height,
        jpeg,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::capture::types::testing::FakeDevice;
    use std::time::Instant;

    /// Spin until the session has published a frame
    fn wait_for_frame(session: &CameraSession) -> CameraFrame {
        let deadline = Instant::now() + Duration::from_secs(2);
        loop {
            if let Some(frame) = session.latest_frame() {
                return frame;
            }
            assert!(Instant::now() < deadline, "no frame arrived in time");
            thread::sleep(Duration::from_millis(5));
        }
    }

    #[test]
    fn test_close_releases_device() {
        let (device, released) = FakeDevice::new();
        let session = CameraSession::start(Box::new(device));
        wait_for_frame(&session);

        session.close();

        assert!(!session.is_active());
        assert!(released.load(Ordering::SeqCst));
        assert!(session.latest_frame().is_none());
    }

    #[test]
    fn test_close_is_idempotent() {
        let (device, released) = FakeDevice::new();
        let session = CameraSession::start(Box::new(device));
        wait_for_frame(&session);

        session.close();
        session.close();

        assert!(released.load(Ordering::SeqCst));
    }

    #[test]
    fn test_drop_releases_device() {
        let (device, released) = FakeDevice::new();
        {
            let session = CameraSession::start(Box::new(device));
            wait_for_frame(&session);
        }
        // SessionShared::drop joins the reader before returning
        assert!(released.load(Ordering::SeqCst));
    }

    #[test]
    fn test_capture_still_encodes_jpeg_at_native_resolution() {
        let (device, _released) = FakeDevice::new();
        let session = CameraSession::start(Box::new(device));
        let frame = wait_for_frame(&session);

        let still = session.capture_still().expect("capture failed");
        assert_eq!(still.width, frame.width);
        assert_eq!(still.height, frame.height);

        let decoded = image::load_from_memory(&still.jpeg).expect("not a decodable JPEG");
        assert_eq!(decoded.width(), frame.width);
        assert_eq!(decoded.height(), frame.height);

        session.close();
    }

    #[test]
    fn test_capture_before_first_frame_reports_no_frame() {
        // A device that never produces a frame
        struct Stalled;
        impl CameraDevice for Stalled {
            fn next_frame(&mut self) -> Result<CameraFrame, CaptureError> {
                thread::sleep(Duration::from_millis(5));
                Err(CaptureError::Frame("stalled".to_string()))
            }
            fn release(&mut self) {}
        }

        let session = CameraSession::start(Box::new(Stalled));
        assert!(matches!(session.capture_still(), Err(CaptureError::NoFrame)));
        session.close();
    }
}

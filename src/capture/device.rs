/// Native camera backend
///
/// Wraps a nokhwa capture stream behind the [`CameraDevice`] trait.

use log::{info, warn};
use nokhwa::pixel_format::RgbFormat;
use nokhwa::utils::{ApiBackend, RequestedFormat, RequestedFormatType};
use nokhwa::Camera;

use super::types::{CameraDevice, CameraFacing, CameraFrame, CaptureError};

/// A physical camera driven through nokhwa
pub struct NokhwaDevice {
    camera: Camera,
}

impl NokhwaDevice {
    /// Enumerate devices and open the one matching `facing`.
    ///
    /// Facing selection policy lives in [`CameraFacing`]; permission
    /// failures and missing hardware both surface as `CaptureError` so the
    /// caller can show one warning and carry on without a session.
    pub fn open(facing: CameraFacing) -> Result<Self, CaptureError> {
        let devices =
            nokhwa::query(ApiBackend::Auto).map_err(|err| CaptureError::Open(err.to_string()))?;
        if devices.is_empty() {
            return Err(CaptureError::NoDevice);
        }

        let info = match facing {
            CameraFacing::Environment => devices.last(),
            CameraFacing::User => devices.first(),
        }
        .ok_or(CaptureError::NoDevice)?;

        let requested =
            RequestedFormat::new::<RgbFormat>(RequestedFormatType::AbsoluteHighestResolution);
        let mut camera = Camera::new(info.index().clone(), requested)
            .map_err(|err| CaptureError::Open(err.to_string()))?;
        camera
            .open_stream()
            .map_err(|err| CaptureError::Open(err.to_string()))?;

        info!(
            "📷 Opened camera \"{}\" at {}",
            info.human_name(),
            camera.resolution()
        );

        Ok(Self { camera })
    }
}

impl CameraDevice for NokhwaDevice {
    fn next_frame(&mut self) -> Result<CameraFrame, CaptureError> {
        let buffer = self
            .camera
            .frame()
            .map_err(|err| CaptureError::Frame(err.to_string()))?;
        let rgb = buffer
            .decode_image::<RgbFormat>()
            .map_err(|err| CaptureError::Frame(err.to_string()))?;

        let (width, height) = rgb.dimensions();
        let raw = rgb.into_raw();

        // The image widget wants RGBA
        let mut rgba = Vec::with_capacity(raw.len() / 3 * 4);
        for pixel in raw.chunks_exact(3) {
            rgba.extend_from_slice(pixel);
            rgba.push(255);
        }

        Ok(CameraFrame {
            width,
            height,
            rgba,
        })
    }

    fn release(&mut self) {
        if let Err(err) = self.camera.stop_stream() {
            warn!("failed to stop camera stream: {err}");
        }
    }
}

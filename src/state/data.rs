/// Shared data structures for the detection workflow
///
/// These structs represent the data that flows between the ingestion
/// paths, the workflow state machine, and the UI layer.

use std::path::Path;

/// The user's currently chosen image, exactly as it will be submitted
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageSelection {
    /// Display name (e.g. "leaf.jpg", or "camera-capture.jpg" for captures)
    pub file_name: String,
    /// Declared content type (e.g. "image/jpeg")
    pub mime: String,
    /// Raw encoded bytes
    pub bytes: Vec<u8>,
}

/// A file read from disk (picker or drop) on its way into the workflow.
/// Not yet normalized: the content type may be anything.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadedFile {
    pub file_name: String,
    pub mime: String,
    pub bytes: Vec<u8>,
}

/// A decoded, downscaled preview of the current selection (RGBA8).
/// This is the desktop analog of the original web client's data-URL preview.
#[derive(Clone, PartialEq, Eq)]
pub struct PreviewImage {
    pub width: u32,
    pub height: u32,
    pub rgba: Vec<u8>,
}

impl std::fmt::Debug for PreviewImage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PreviewImage")
            .field("width", &self.width)
            .field("height", &self.height)
            .finish()
    }
}

/// Known image file extensions and their content types.
/// Desktop files carry no MIME type of their own, so ingestion derives one
/// from the extension before the workflow applies its image-only policy.
const IMAGE_EXTENSIONS: [(&str, &str); 8] = [
    ("jpg", "image/jpeg"),
    ("jpeg", "image/jpeg"),
    ("png", "image/png"),
    ("gif", "image/gif"),
    ("webp", "image/webp"),
    ("bmp", "image/bmp"),
    ("tif", "image/tiff"),
    ("tiff", "image/tiff"),
];

/// Look up the image content type for a path by extension.
/// Returns None for anything that is not a known image extension.
pub fn image_mime_for_path(path: &Path) -> Option<&'static str> {
    let extension = path.extension()?.to_string_lossy().to_lowercase();
    IMAGE_EXTENSIONS
        .iter()
        .find(|(ext, _)| *ext == extension)
        .map(|(_, mime)| *mime)
}

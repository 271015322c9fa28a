use std::path::Path;

use crate::shared::frame::Frame;

/// Encodes a frame to an image file.
///
/// Implementations do not create missing parent directories.
pub trait ImageWriter: Send {
    fn write(&self, path: &Path, frame: &Frame) -> Result<(), Box<dyn std::error::Error>>;
}

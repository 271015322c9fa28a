use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use image::codecs::jpeg::JpegEncoder;
use image::{ExtendedColorType, ImageEncoder};

use crate::imaging::domain::image_writer::ImageWriter;
use crate::shared::frame::Frame;

/// Encodes baseline JPEG at the encoder's default quality (75).
pub struct JpegFileWriter;

impl JpegFileWriter {
    pub fn new() -> Self {
        Self
    }
}

impl Default for JpegFileWriter {
    fn default() -> Self {
        Self::new()
    }
}

impl ImageWriter for JpegFileWriter {
    fn write(&self, path: &Path, frame: &Frame) -> Result<(), Box<dyn std::error::Error>> {
        let file = File::create(path)
            .map_err(|e| format!("Failed to create {}: {e}", path.display()))?;
        let mut out = BufWriter::new(file);
        JpegEncoder::new(&mut out).write_image(
            frame.data(),
            frame.width(),
            frame.height(),
            ExtendedColorType::Rgb8,
        )?;
        out.flush()?;
        Ok(())
    }
}

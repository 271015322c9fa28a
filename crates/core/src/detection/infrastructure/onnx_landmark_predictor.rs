/// 68-point facial landmark predictor using ONNX Runtime via `ort`.
///
/// Expects a PFLD-style model: one NCHW RGB input in [0,1] holding the face
/// crop, one output of 136 values laid out `[x0, y0, x1, y1, ...]` and
/// normalised to the crop.
use std::path::Path;

use image::imageops::{self, FilterType};
use image::{ImageBuffer, Rgb};

use crate::detection::domain::landmark_predictor::LandmarkPredictor;
use crate::detection::domain::landmark_set::{LandmarkError, LandmarkSet};
use crate::shared::constants::NUM_LANDMARKS;
use crate::shared::frame::Frame;
use crate::shared::point::Point;
use crate::shared::region::FaceRegion;

use super::onnx_session::{load_session, square_input_size};

/// Fallback input resolution when the model input shape is dynamic.
const DEFAULT_INPUT_SIZE: u32 = 112;

/// Crop side relative to the longer side of the face box.
const CROP_SCALE: f64 = 1.0;

pub struct OnnxLandmarkPredictor {
    session: ort::session::Session,
    input_size: u32,
}

impl OnnxLandmarkPredictor {
    pub fn new(model_path: &Path) -> Result<Self, Box<dyn std::error::Error>> {
        let session = load_session(model_path)?;
        let input_size = square_input_size(&session).unwrap_or(DEFAULT_INPUT_SIZE);
        log::debug!("Landmark predictor input size {input_size}");
        Ok(Self {
            session,
            input_size,
        })
    }
}

impl LandmarkPredictor for OnnxLandmarkPredictor {
    fn predict(
        &mut self,
        frame: &Frame,
        region: &FaceRegion,
    ) -> Result<LandmarkSet, Box<dyn std::error::Error>> {
        let crop = CropBox::around(region, frame.width(), frame.height(), CROP_SCALE)
            .ok_or("Face region lies outside the image")?;

        let input_tensor = preprocess(frame, &crop, self.input_size)?;
        let input_value = ort::value::Tensor::from_array(input_tensor)?;
        let outputs = self.session.run(ort::inputs![input_value])?;
        if outputs.len() == 0 {
            return Err("Landmark model produced no outputs".into());
        }
        let tensor = outputs[0].try_extract_array::<f32>()?;
        let data = tensor.as_slice().ok_or("Cannot get landmark slice")?;

        Ok(decode_landmarks(data, &crop)?)
    }
}

/// Pixel rectangle of the frame handed to the model.
#[derive(Clone, Copy, Debug, PartialEq)]
struct CropBox {
    x: u32,
    y: u32,
    width: u32,
    height: u32,
}

impl CropBox {
    /// Square of side `max(w, h) * scale` centred on the region, clipped to
    /// the frame. `None` when nothing of it lies inside the frame.
    fn around(region: &FaceRegion, frame_width: u32, frame_height: u32, scale: f64) -> Option<Self> {
        let (cx, cy) = region.center();
        let half = region.width.max(region.height) as f64 * scale / 2.0;

        let x1 = (cx - half).round().max(0.0);
        let y1 = (cy - half).round().max(0.0);
        let x2 = (cx + half).round().min(frame_width as f64);
        let y2 = (cy + half).round().min(frame_height as f64);
        if x2 <= x1 || y2 <= y1 {
            return None;
        }
        Some(Self {
            x: x1 as u32,
            y: y1 as u32,
            width: (x2 - x1) as u32,
            height: (y2 - y1) as u32,
        })
    }
}

/// Crop, resize to `size` × `size` and normalise to [0,1] NCHW float32.
fn preprocess(
    frame: &Frame,
    crop: &CropBox,
    size: u32,
) -> Result<ndarray::Array4<f32>, Box<dyn std::error::Error>> {
    let view: ImageBuffer<Rgb<u8>, Vec<u8>> =
        ImageBuffer::from_raw(frame.width(), frame.height(), frame.data().to_vec())
            .ok_or("Frame data does not match its dimensions")?;
    let face = imageops::crop_imm(&view, crop.x, crop.y, crop.width, crop.height).to_image();
    let resized = imageops::resize(&face, size, size, FilterType::Triangle);

    let s = size as usize;
    let mut tensor = ndarray::Array4::<f32>::zeros((1, 3, s, s));
    for (x, y, pixel) in resized.enumerate_pixels() {
        for c in 0..3 {
            tensor[[0, c, y as usize, x as usize]] = pixel.0[c] as f32 / 255.0;
        }
    }
    Ok(tensor)
}

/// Map crop-normalised `[x0, y0, ...]` output back to frame pixels.
fn decode_landmarks(data: &[f32], crop: &CropBox) -> Result<LandmarkSet, LandmarkError> {
    if data.len() != NUM_LANDMARKS * 2 {
        return Err(LandmarkError::WrongCount(data.len() / 2));
    }
    let points: Vec<Point> = data
        .chunks_exact(2)
        .map(|xy| {
            Point::rounded(
                crop.x as f64 + xy[0] as f64 * crop.width as f64,
                crop.y as f64 + xy[1] as f64 * crop.height as f64,
            )
        })
        .collect();
    LandmarkSet::from_points(&points)
}

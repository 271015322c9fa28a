/// YOLO face detector using ONNX Runtime via `ort`.
///
/// Handles letterbox preprocessing, inference and NMS post-processing.
/// Pose keypoints in the model output are ignored; landmarks come from the
/// dedicated 68-point predictor.
use std::path::Path;

use crate::detection::domain::face_detector::FaceDetector;
use crate::shared::frame::Frame;
use crate::shared::region::FaceRegion;

use super::math::nms;
use super::onnx_session::{load_session, square_input_size};

/// Fallback YOLO model input resolution when the model doesn't specify dimensions.
const DEFAULT_INPUT_SIZE: u32 = 640;

/// Default confidence threshold for face detection.
pub const DEFAULT_CONFIDENCE: f64 = 0.5;

/// NMS IoU threshold.
const NMS_IOU_THRESH: f64 = 0.45;

/// Letterbox padding value (YOLO convention).
const PAD_VALUE: f32 = 114.0 / 255.0;

/// YOLO face detector backed by an ONNX Runtime session.
pub struct OnnxYoloDetector {
    session: ort::session::Session,
    confidence: f64,
    input_size: u32,
}

impl OnnxYoloDetector {
    /// Load a YOLO ONNX model and prepare for inference.
    ///
    /// The input resolution is read from the model's input shape (expecting NCHW).
    /// Falls back to 640 if the shape is dynamic or unreadable.
    pub fn new(model_path: &Path, confidence: f64) -> Result<Self, Box<dyn std::error::Error>> {
        let session = load_session(model_path)?;
        let input_size = square_input_size(&session).unwrap_or(DEFAULT_INPUT_SIZE);
        log::debug!("YOLO detector input size {input_size}");

        Ok(Self {
            session,
            confidence,
            input_size,
        })
    }
}

impl FaceDetector for OnnxYoloDetector {
    fn detect(&mut self, frame: &Frame) -> Result<Vec<FaceRegion>, Box<dyn std::error::Error>> {
        let (input_tensor, transform) = letterbox(frame, self.input_size);

        let input_value = ort::value::Tensor::from_array(input_tensor)?;
        let outputs = self.session.run(ort::inputs![input_value])?;
        if outputs.len() == 0 {
            return Err("YOLO model produced no outputs".into());
        }
        let tensor = outputs[0].try_extract_array::<f32>()?;
        let shape = tensor.shape().to_vec();
        let data = tensor.as_slice().ok_or("Cannot get tensor slice")?;

        let candidates = decode_candidates(data, &shape, self.confidence)?;
        let kept = nms(&candidates, NMS_IOU_THRESH);

        let regions = kept
            .into_iter()
            .map(|i| {
                let ([x1, y1, x2, y2], conf) = candidates[i];
                let (x1, y1) = transform.to_frame(x1, y1);
                let (x2, y2) = transform.to_frame(x2, y2);
                FaceRegion::from_corners(x1, y1, x2, y2, conf, frame.width(), frame.height())
            })
            .filter(|r| !r.is_empty())
            .collect();

        Ok(regions)
    }
}

// ---------------------------------------------------------------------------
// Preprocessing
// ---------------------------------------------------------------------------

/// Scale and padding applied by [`letterbox`].
#[derive(Clone, Copy, Debug)]
struct LetterboxTransform {
    scale: f64,
    pad_x: u32,
    pad_y: u32,
}

impl LetterboxTransform {
    /// Map a point from letterbox coordinates back to the source frame.
    fn to_frame(&self, x: f64, y: f64) -> (f64, f64) {
        (
            (x - self.pad_x as f64) / self.scale,
            (y - self.pad_y as f64) / self.scale,
        )
    }
}

/// Letterbox-resize a frame to `target_size` × `target_size` NCHW float32.
fn letterbox(frame: &Frame, target_size: u32) -> (ndarray::Array4<f32>, LetterboxTransform) {
    let fw = frame.width() as f64;
    let fh = frame.height() as f64;
    let target = target_size as f64;

    let scale = (target / fw).min(target / fh);
    let new_w = ((fw * scale).round() as u32).min(target_size);
    let new_h = ((fh * scale).round() as u32).min(target_size);
    let pad_x = (target_size - new_w) / 2;
    let pad_y = (target_size - new_h) / 2;

    let mut tensor = ndarray::Array4::<f32>::from_elem(
        (1, 3, target_size as usize, target_size as usize),
        PAD_VALUE,
    );

    let src = frame.as_ndarray();
    let src_h = frame.height() as usize;
    let src_w = frame.width() as usize;

    // Nearest-neighbor resize into the padded region
    for y in 0..new_h as usize {
        let src_y = ((y as f64 / scale) as usize).min(src_h - 1);
        for x in 0..new_w as usize {
            let src_x = ((x as f64 / scale) as usize).min(src_w - 1);
            let ty = pad_y as usize + y;
            let tx = pad_x as usize + x;
            for c in 0..3 {
                tensor[[0, c, ty, tx]] = src[[src_y, src_x, c]] as f32 / 255.0;
            }
        }
    }

    (
        tensor,
        LetterboxTransform {
            scale,
            pad_x,
            pad_y,
        },
    )
}

// ---------------------------------------------------------------------------
// Postprocessing
// ---------------------------------------------------------------------------

/// Parse raw YOLO output into `([x1, y1, x2, y2], confidence)` candidates in
/// letterbox coordinates, dropping rows below `confidence`.
///
/// YOLO output shape is `[1, features, detections]` (transposed) or
/// `[1, detections, features]`; rows start with `[cx, cy, w, h, conf, ...]`.
fn decode_candidates(
    data: &[f32],
    shape: &[usize],
    confidence: f64,
) -> Result<Vec<([f64; 4], f64)>, Box<dyn std::error::Error>> {
    if shape.len() != 3 {
        return Err(format!("Unexpected YOLO output shape: {shape:?}").into());
    }
    let transposed = shape[1] < shape[2];
    let (num_dets, num_feats) = if transposed {
        (shape[2], shape[1])
    } else {
        (shape[1], shape[2])
    };
    if num_feats < 5 {
        return Err(format!("YOLO output has {num_feats} features per row, need 5").into());
    }
    if data.len() < num_dets * num_feats {
        return Err("YOLO output is shorter than its shape".into());
    }

    let value = |det: usize, feat: usize| -> f64 {
        if transposed {
            data[feat * num_dets + det] as f64
        } else {
            data[det * num_feats + feat] as f64
        }
    };

    let mut candidates = Vec::new();
    for i in 0..num_dets {
        let conf = value(i, 4);
        if conf < confidence {
            continue;
        }
        let (cx, cy, w, h) = (value(i, 0), value(i, 1), value(i, 2), value(i, 3));
        candidates.push((
            [cx - w / 2.0, cy - h / 2.0, cx + w / 2.0, cy + h / 2.0],
            conf,
        ));
    }
    Ok(candidates)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_letterbox_preserves_aspect_ratio() {
        // 200x100 frame → scale 3.2, new 640x320, pad_y 160
        let frame = Frame::new(vec![128u8; 200 * 100 * 3], 200, 100);
        let (tensor, lb) = letterbox(&frame, 640);

        assert_eq!(tensor.shape(), &[1, 3, 640, 640]);
        assert_relative_eq!(lb.scale, 3.2, epsilon = 0.01);
        assert_eq!(lb.pad_x, 0);
        assert_eq!(lb.pad_y, 160);
    }

    #[test]
    fn test_letterbox_square_frame() {
        let frame = Frame::new(vec![128u8; 100 * 100 * 3], 100, 100);
        let (_, lb) = letterbox(&frame, 640);
        assert_relative_eq!(lb.scale, 6.4, epsilon = 0.01);
        assert_eq!((lb.pad_x, lb.pad_y), (0, 0));
    }

    #[test]
    fn test_letterbox_values_normalized() {
        let frame = Frame::new(vec![255u8; 100 * 50 * 3], 100, 50);
        let (tensor, lb) = letterbox(&frame, 640);

        let y = lb.pad_y as usize + 1;
        let x = lb.pad_x as usize + 1;
        assert_relative_eq!(tensor[[0, 0, y, x]], 1.0, epsilon = 0.01);
        assert_relative_eq!(tensor[[0, 0, 0, 0]], PAD_VALUE, epsilon = 0.01);
    }

    #[test]
    fn test_letterbox_maps_back_to_frame() {
        let frame = Frame::new(vec![0u8; 200 * 100 * 3], 200, 100);
        let (_, lb) = letterbox(&frame, 640);
        let (x, y) = lb.to_frame(320.0, 320.0);
        assert_relative_eq!(x, 100.0, epsilon = 0.01);
        assert_relative_eq!(y, 50.0, epsilon = 0.01);
    }

    #[test]
    fn test_decode_row_major_layout() {
        // 6 detections × 5 features; only the first is confident
        let mut data = vec![0.0f32; 6 * 5];
        data[..5].copy_from_slice(&[100.0, 100.0, 40.0, 20.0, 0.9]);
        data[5..10].copy_from_slice(&[300.0, 300.0, 10.0, 10.0, 0.1]);
        let cands = decode_candidates(&data, &[1, 6, 5], 0.5).unwrap();
        assert_eq!(cands.len(), 1);
        assert_eq!(cands[0].0, [80.0, 90.0, 120.0, 110.0]);
        assert_relative_eq!(cands[0].1, 0.9, epsilon = 1e-6);
    }

    #[test]
    fn test_decode_transposed_layout() {
        // 5 features × 8 detections; only detection 3 is confident
        let mut data = vec![0.0f32; 5 * 8];
        let set = |data: &mut Vec<f32>, feat: usize, val: f32| data[feat * 8 + 3] = val;
        set(&mut data, 0, 50.0);
        set(&mut data, 1, 60.0);
        set(&mut data, 2, 20.0);
        set(&mut data, 3, 40.0);
        set(&mut data, 4, 0.75);

        let cands = decode_candidates(&data, &[1, 5, 8], 0.5).unwrap();
        assert_eq!(cands.len(), 1);
        assert_eq!(cands[0].0, [40.0, 40.0, 60.0, 80.0]);
    }

    #[test]
    fn test_decode_rejects_bad_shape() {
        assert!(decode_candidates(&[0.0; 4], &[1, 4], 0.5).is_err());
        assert!(decode_candidates(&[0.0; 8], &[1, 2, 4], 0.5).is_err());
    }

    #[test]
    fn test_decode_rejects_truncated_data() {
        assert!(decode_candidates(&[0.0; 5], &[1, 6, 5], 0.5).is_err());
    }
}

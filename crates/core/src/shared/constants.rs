pub const YOLO_MODEL_NAME: &str = "yolo11n-pose_widerface.onnx";
pub const YOLO_MODEL_URL: &str =
    "https://github.com/neutrinographics/faceguard/releases/download/v0.1.0/yolo11n-pose_widerface.onnx";

/// Landmark model location, relative to the working directory.
/// Never downloaded: a missing file is a startup error.
pub const LANDMARK_MODEL_PATH: &str = "models/face_landmarks_68.onnx";

/// Landmark count of the iBUG 300-W layout.
pub const NUM_LANDMARKS: usize = 68;

pub const DEFAULT_OUTPUT_DIR: &str = "dane68";
pub const DEFAULT_OUTPUT_SUFFIX: &str = "-68.jpg";

/// Stroke width of wireframe lines in pixels.
pub const STROKE_WIDTH: u32 = 4;

pub const CANVAS_BACKGROUND: [u8; 3] = [255, 255, 255];

pub const IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "bmp", "tiff", "tif", "webp"];

pub mod math;
pub mod onnx_landmark_predictor;
pub mod onnx_session;
pub mod onnx_yolo_detector;

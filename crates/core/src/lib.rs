//! Face wireframe rendering over 68-point facial landmarks.
//!
//! Detection and landmark prediction run pretrained ONNX models through
//! `ort`; this crate groups the landmarks into named features, strokes
//! them onto a blank canvas and composes the canvas beside the source image.

pub mod detection;
pub mod imaging;
pub mod pipeline;
pub mod rendering;
pub mod shared;

use crate::detection::domain::landmark_set::LandmarkSet;
use crate::shared::frame::Frame;
use crate::shared::region::FaceRegion;

/// Domain interface for 68-point landmark prediction inside a face box.
pub trait LandmarkPredictor: Send {
    fn predict(
        &mut self,
        frame: &Frame,
        region: &FaceRegion,
    ) -> Result<LandmarkSet, Box<dyn std::error::Error>>;
}

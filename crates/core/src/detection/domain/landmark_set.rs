//! The 68-point facial landmark layout (iBUG 300-W).
//!
//! - 0-16: jaw outline
//! - 17-21: right eyebrow, 22-26: left eyebrow
//! - 27-30: nose bridge, 31-35: nose base
//! - 36-41: right eye, 42-47: left eye
//! - 48-59: outer lip, 60-67: inner lip
//!
//! The ordering is fixed by the predictor's training data. It is taken on
//! trust; only the point count is checked.

use std::ops::Range;

use thiserror::Error;

use crate::shared::constants::NUM_LANDMARKS;
use crate::shared::point::Point;

#[derive(Error, Debug, PartialEq)]
pub enum LandmarkError {
    #[error("expected 68 landmarks, got {0}")]
    WrongCount(usize),
}

#[derive(Clone, Debug, PartialEq)]
pub struct LandmarkSet {
    points: [Point; NUM_LANDMARKS],
}

impl LandmarkSet {
    pub fn from_points(points: &[Point]) -> Result<Self, LandmarkError> {
        let points: [Point; NUM_LANDMARKS] = points
            .try_into()
            .map_err(|_| LandmarkError::WrongCount(points.len()))?;
        Ok(Self { points })
    }

    pub fn points(&self) -> &[Point; NUM_LANDMARKS] {
        &self.points
    }

    /// Points for the half-open index range. Panics if `range.end > 68`.
    pub fn slice(&self, range: Range<usize>) -> &[Point] {
        &self.points[range]
    }

    pub fn len(&self) -> usize {
        NUM_LANDMARKS
    }

    pub fn is_empty(&self) -> bool {
        false
    }
}

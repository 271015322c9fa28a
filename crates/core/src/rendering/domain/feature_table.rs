//! Named facial features as half-open ranges over the 68-point layout.

use std::ops::Range;

use thiserror::Error;

use crate::detection::domain::landmark_set::LandmarkSet;
use crate::rendering::domain::color::Color;
use crate::shared::constants::NUM_LANDMARKS;
use crate::shared::point::Point;

#[derive(Error, Debug, PartialEq)]
pub enum FeatureTableError {
    #[error("feature '{name}' has an empty range {start}..{end}")]
    EmptyRange {
        name: &'static str,
        start: usize,
        end: usize,
    },
    #[error("feature '{name}' ends at {end}, past the {count} available landmarks")]
    OutOfBounds {
        name: &'static str,
        end: usize,
        count: usize,
    },
}

/// Whether a feature outline is drawn as a polyline or a loop.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Closure {
    Open,
    Closed,
}

#[derive(Clone, Debug, PartialEq)]
pub struct FeatureDescriptor {
    pub name: &'static str,
    pub start: usize,
    /// Exclusive.
    pub end: usize,
    pub color: Color,
    pub closure: Closure,
}

impl FeatureDescriptor {
    pub const fn new(
        name: &'static str,
        start: usize,
        end: usize,
        color: Color,
        closure: Closure,
    ) -> Self {
        Self {
            name,
            start,
            end,
            color,
            closure,
        }
    }

    pub fn range(&self) -> Range<usize> {
        self.start..self.end
    }

    /// Coordinates to stroke for this feature. Closed features repeat their
    /// first point at the end.
    pub fn polyline(&self, landmarks: &LandmarkSet) -> Vec<Point> {
        let mut coords = landmarks.slice(self.range()).to_vec();
        if self.closure == Closure::Closed {
            if let Some(&first) = coords.first() {
                coords.push(first);
            }
        }
        coords
    }

    fn validate(&self, landmark_count: usize) -> Result<(), FeatureTableError> {
        if self.start >= self.end {
            return Err(FeatureTableError::EmptyRange {
                name: self.name,
                start: self.start,
                end: self.end,
            });
        }
        if self.end > landmark_count {
            return Err(FeatureTableError::OutOfBounds {
                name: self.name,
                end: self.end,
                count: landmark_count,
            });
        }
        Ok(())
    }
}

/// Nose bridge and nose base share index 30, so ranges overlap there.
const STANDARD_FEATURES: [FeatureDescriptor; 9] = [
    FeatureDescriptor::new("right_brow", 17, 22, Color::BLACK, Closure::Open),
    FeatureDescriptor::new("left_brow", 22, 27, Color::BLACK, Closure::Open),
    FeatureDescriptor::new("right_eye", 36, 42, Color::PINK, Closure::Closed),
    FeatureDescriptor::new("left_eye", 42, 48, Color::PINK, Closure::Closed),
    FeatureDescriptor::new("face_oval", 0, 17, Color::PINK, Closure::Open),
    FeatureDescriptor::new("nose_bridge", 27, 32, Color::PINK, Closure::Open),
    FeatureDescriptor::new("nose_base", 30, 36, Color::PINK, Closure::Closed),
    FeatureDescriptor::new("mouth_in", 60, 68, Color::RED, Closure::Closed),
    FeatureDescriptor::new("mouth_out", 48, 60, Color::RED, Closure::Closed),
];

/// Ordered, validated list of features. Draw order is table order.
#[derive(Clone, Debug, PartialEq)]
pub struct FeatureTable {
    features: Vec<FeatureDescriptor>,
}

impl FeatureTable {
    pub fn new(
        features: Vec<FeatureDescriptor>,
        landmark_count: usize,
    ) -> Result<Self, FeatureTableError> {
        for feature in &features {
            feature.validate(landmark_count)?;
        }
        Ok(Self { features })
    }

    /// The eyebrow, eye, nose, mouth and face-outline table for 68 points.
    pub fn standard() -> Self {
        Self {
            features: STANDARD_FEATURES.to_vec(),
        }
    }

    pub fn features(&self) -> &[FeatureDescriptor] {
        &self.features
    }

    pub fn get(&self, name: &str) -> Option<&FeatureDescriptor> {
        self.features.iter().find(|f| f.name == name)
    }

    pub fn len(&self) -> usize {
        self.features.len()
    }

    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }
}

impl<'a> IntoIterator for &'a FeatureTable {
    type Item = &'a FeatureDescriptor;
    type IntoIter = std::slice::Iter<'a, FeatureDescriptor>;

    fn into_iter(self) -> Self::IntoIter {
        self.features.iter()
    }
}

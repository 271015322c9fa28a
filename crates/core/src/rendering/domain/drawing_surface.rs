use crate::rendering::domain::color::Color;
use crate::shared::point::Point;

/// A raster target the wireframe is stroked onto.
pub trait DrawingSurface {
    /// Draws connected segments through `points` in order, `width` pixels
    /// thick, with round joints at interior vertices.
    ///
    /// Empty input draws nothing; a single point (or a run of identical
    /// points) draws a dot. Never fails.
    fn stroke_polyline(&mut self, points: &[Point], color: Color, width: u32);
}

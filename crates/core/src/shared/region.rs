/// A detected face box in frame pixel coordinates.
///
/// Detectors clamp the box to the frame before returning it, so
/// `x + width <= frame width` and `y + height <= frame height`.
#[derive(Clone, Debug, PartialEq)]
pub struct FaceRegion {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
    pub confidence: f64,
}

impl FaceRegion {
    /// Builds a region from corner coordinates, clamped to a
    /// `frame_width` × `frame_height` frame.
    pub fn from_corners(
        x1: f64,
        y1: f64,
        x2: f64,
        y2: f64,
        confidence: f64,
        frame_width: u32,
        frame_height: u32,
    ) -> Self {
        let fw = frame_width as f64;
        let fh = frame_height as f64;
        let cx1 = x1.clamp(0.0, fw);
        let cy1 = y1.clamp(0.0, fh);
        let cx2 = x2.clamp(0.0, fw);
        let cy2 = y2.clamp(0.0, fh);

        let x = cx1.round() as i32;
        let y = cy1.round() as i32;
        Self {
            x,
            y,
            width: (cx2.round() as i32 - x).max(0),
            height: (cy2.round() as i32 - y).max(0),
            confidence,
        }
    }

    pub fn center(&self) -> (f64, f64) {
        (
            self.x as f64 + self.width as f64 / 2.0,
            self.y as f64 + self.height as f64 / 2.0,
        )
    }

    pub fn is_empty(&self) -> bool {
        self.width <= 0 || self.height <= 0
    }
}

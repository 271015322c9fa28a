use image::{imageops, Rgb, RgbImage};

use crate::shared::constants::CANVAS_BACKGROUND;
use crate::shared::frame::Frame;

/// Pastes `left` at the origin and `right` immediately to its right on a
/// white background sized to fit both.
pub fn compose_side_by_side(left: Frame, right: Frame) -> Frame {
    let width = left.width() + right.width();
    let height = left.height().max(right.height());
    let offset = left.width() as i64;

    let mut out = RgbImage::from_pixel(width, height, Rgb(CANVAS_BACKGROUND));
    imageops::replace(&mut out, &RgbImage::from(left), 0, 0);
    imageops::replace(&mut out, &RgbImage::from(right), offset, 0);
    Frame::from(out)
}

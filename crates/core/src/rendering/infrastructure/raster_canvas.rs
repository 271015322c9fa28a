//! RGB canvas that strokes thick polylines with `imageproc`.
//!
//! A stroke of width `w` covers exactly `w` pixels across: offsets
//! `-(w / 2)..=(w - 1) / 2` from the center line. Segments are filled
//! quadrilaterals over that band; interior vertices and lone points get a
//! disc over the same offsets so consecutive segments meet with a rounded
//! joint instead of a notch.

use image::{Rgb, RgbImage};
use imageproc::drawing::{draw_line_segment_mut, draw_polygon_mut};

use crate::rendering::domain::color::Color;
use crate::rendering::domain::drawing_surface::DrawingSurface;
use crate::shared::constants::CANVAS_BACKGROUND;
use crate::shared::frame::Frame;
use crate::shared::point::Point;

pub struct RasterCanvas {
    image: RgbImage,
}

impl RasterCanvas {
    /// A white canvas.
    pub fn blank(width: u32, height: u32) -> Self {
        Self {
            image: RgbImage::from_pixel(width, height, Rgb(CANVAS_BACKGROUND)),
        }
    }

    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }

    pub fn into_frame(self) -> Frame {
        Frame::from(self.image)
    }

    /// Disc `width` pixels across, aligned with the segment band.
    fn dot(&mut self, at: Point, color: Rgb<u8>, width: u32) {
        let (lo, hi) = band(width);
        let center = (lo + hi) as f64 / 2.0;
        let radius_sq = (width as f64 / 2.0).powi(2);
        for dy in lo..=hi {
            for dx in lo..=hi {
                let (fx, fy) = (dx as f64 - center, dy as f64 - center);
                if fx * fx + fy * fy > radius_sq {
                    continue;
                }
                let (x, y) = (at.x + dx, at.y + dy);
                if x < 0 || y < 0 {
                    continue;
                }
                if let Some(pixel) = self.image.get_pixel_mut_checked(x as u32, y as u32) {
                    *pixel = color;
                }
            }
        }
    }

    fn segment(&mut self, a: Point, b: Point, color: Rgb<u8>, width: u32) {
        if a == b {
            self.dot(a, color, width);
            return;
        }
        if width <= 1 {
            draw_line_segment_mut(
                &mut self.image,
                (a.x as f32, a.y as f32),
                (b.x as f32, b.y as f32),
                color,
            );
            return;
        }

        let dx = (b.x - a.x) as f64;
        let dy = (b.y - a.y) as f64;
        let len = (dx * dx + dy * dy).sqrt();
        let (nx, ny) = (-dy / len, dx / len);
        let (lo, hi) = band(width);

        // `draw_polygon_mut` fills edges inclusively, so corners sit on the
        // outermost covered rows. `lo < hi` keeps the start corners apart.
        let corner = |p: Point, offset: i32| {
            imageproc::point::Point::new(
                (p.x as f64 + offset as f64 * nx).round() as i32,
                (p.y as f64 + offset as f64 * ny).round() as i32,
            )
        };
        let quad = [corner(a, lo), corner(b, lo), corner(b, hi), corner(a, hi)];
        draw_polygon_mut(&mut self.image, &quad, color);
    }
}

/// Inclusive pixel offsets across the center line covered by a stroke.
fn band(width: u32) -> (i32, i32) {
    let width = width.max(1) as i32;
    (-(width / 2), (width - 1) / 2)
}

impl DrawingSurface for RasterCanvas {
    fn stroke_polyline(&mut self, points: &[Point], color: Color, width: u32) {
        let rgb = Rgb(color.rgb);
        match points {
            [] => {}
            [only] => self.dot(*only, rgb, width),
            _ => {
                for pair in points.windows(2) {
                    self.segment(pair[0], pair[1], rgb, width);
                }
                if width > 1 {
                    for joint in &points[1..points.len() - 1] {
                        self.dot(*joint, rgb, width);
                    }
                }
            }
        }
    }
}

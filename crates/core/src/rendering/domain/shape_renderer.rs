use crate::detection::domain::landmark_set::LandmarkSet;
use crate::rendering::domain::drawing_surface::DrawingSurface;
use crate::rendering::domain::feature_table::FeatureTable;

/// Strokes every feature of one face onto a shared surface.
pub struct ShapeRenderer {
    table: FeatureTable,
    stroke_width: u32,
}

impl ShapeRenderer {
    pub fn new(table: FeatureTable, stroke_width: u32) -> Self {
        Self {
            table,
            stroke_width,
        }
    }

    pub fn table(&self) -> &FeatureTable {
        &self.table
    }

    /// Draws one polyline per feature, in table order, and hands the surface
    /// back so several faces can be drawn in a chain.
    pub fn draw<'s, S: DrawingSurface + ?Sized>(
        &self,
        surface: &'s mut S,
        landmarks: &LandmarkSet,
    ) -> &'s mut S {
        for feature in &self.table {
            let coords = feature.polyline(landmarks);
            surface.stroke_polyline(&coords, feature.color, self.stroke_width);
        }
        surface
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rendering::domain::color::Color;
    use crate::rendering::domain::feature_table::{Closure, FeatureDescriptor};
    use crate::shared::constants::{NUM_LANDMARKS, STROKE_WIDTH};
    use crate::shared::point::Point;

    #[derive(Default)]
    struct RecordingSurface {
        strokes: Vec<(Vec<Point>, Color, u32)>,
    }

    impl DrawingSurface for RecordingSurface {
        fn stroke_polyline(&mut self, points: &[Point], color: Color, width: u32) {
            self.strokes.push((points.to_vec(), color, width));
        }
    }

    /// Point `i` is `(i, i)`, so every drawn coordinate names its index.
    fn indexed_landmarks() -> LandmarkSet {
        let pts: Vec<Point> = (0..NUM_LANDMARKS as i32).map(|i| Point::new(i, i)).collect();
        LandmarkSet::from_points(&pts).unwrap()
    }

    fn standard_renderer() -> ShapeRenderer {
        ShapeRenderer::new(FeatureTable::standard(), STROKE_WIDTH)
    }

    #[test]
    fn test_draws_one_polyline_per_feature() {
        let mut surface = RecordingSurface::default();
        standard_renderer().draw(&mut surface, &indexed_landmarks());
        assert_eq!(surface.strokes.len(), 9);
    }

    #[test]
    fn test_polylines_stay_within_feature_ranges() {
        let mut surface = RecordingSurface::default();
        let renderer = standard_renderer();
        renderer.draw(&mut surface, &indexed_landmarks());

        for (feature, (points, color, width)) in
            renderer.table().features().iter().zip(&surface.strokes)
        {
            assert_eq!(*color, feature.color);
            assert_eq!(*width, STROKE_WIDTH);
            for p in points {
                assert!(
                    feature.range().contains(&(p.x as usize)),
                    "{} drew index {}",
                    feature.name,
                    p.x
                );
            }
        }
    }

    #[test]
    fn test_closed_features_start_and_end_on_same_point() {
        let mut surface = RecordingSurface::default();
        let renderer = standard_renderer();
        renderer.draw(&mut surface, &indexed_landmarks());

        for (feature, (points, _, _)) in renderer.table().features().iter().zip(&surface.strokes) {
            match feature.closure {
                Closure::Closed => {
                    assert_eq!(points.len(), feature.end - feature.start + 1);
                    assert_eq!(points.first(), points.last());
                }
                Closure::Open => {
                    assert_eq!(points.len(), feature.end - feature.start);
                    assert_ne!(points.first(), points.last());
                }
            }
        }
    }

    #[test]
    fn test_returns_surface_for_chaining() {
        let mut surface = RecordingSurface::default();
        let renderer = standard_renderer();
        let landmarks = indexed_landmarks();

        let chained = renderer.draw(&mut surface, &landmarks);
        renderer.draw(chained, &landmarks);
        assert_eq!(surface.strokes.len(), 18);
    }

    #[test]
    fn test_custom_table_draws_in_table_order() {
        let table = FeatureTable::new(
            vec![
                FeatureDescriptor::new("b", 10, 12, Color::RED, Closure::Open),
                FeatureDescriptor::new("a", 0, 3, Color::BLACK, Closure::Closed),
            ],
            NUM_LANDMARKS,
        )
        .unwrap();
        let mut surface = RecordingSurface::default();
        ShapeRenderer::new(table, 2).draw(&mut surface, &indexed_landmarks());

        assert_eq!(surface.strokes[0].0, vec![Point::new(10, 10), Point::new(11, 11)]);
        assert_eq!(surface.strokes[1].0.len(), 4);
        assert_eq!(surface.strokes[1].1, Color::BLACK);
    }
}

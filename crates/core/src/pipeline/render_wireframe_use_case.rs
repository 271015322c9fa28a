use std::path::Path;

use crate::detection::domain::face_detector::FaceDetector;
use crate::detection::domain::landmark_predictor::LandmarkPredictor;
use crate::imaging::domain::image_reader::ImageReader;
use crate::imaging::domain::image_writer::ImageWriter;
use crate::rendering::domain::feature_table::FeatureTable;
use crate::rendering::domain::shape_renderer::ShapeRenderer;
use crate::rendering::infrastructure::raster_canvas::RasterCanvas;
use crate::rendering::infrastructure::side_by_side::compose_side_by_side;
use crate::shared::constants::STROKE_WIDTH;

/// Outcome of one processed image.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct WireframeReport {
    pub faces: usize,
}

/// Single-image wireframe pipeline: read → detect → predict → draw → compose → write.
pub struct RenderWireframeUseCase {
    reader: Box<dyn ImageReader>,
    writer: Box<dyn ImageWriter>,
    detector: Box<dyn FaceDetector>,
    predictor: Box<dyn LandmarkPredictor>,
    renderer: ShapeRenderer,
}

impl RenderWireframeUseCase {
    pub fn new(
        reader: Box<dyn ImageReader>,
        writer: Box<dyn ImageWriter>,
        detector: Box<dyn FaceDetector>,
        predictor: Box<dyn LandmarkPredictor>,
        table: FeatureTable,
    ) -> Self {
        Self {
            reader,
            writer,
            detector,
            predictor,
            renderer: ShapeRenderer::new(table, STROKE_WIDTH),
        }
    }

    /// Reads `input_path`, draws every detected face onto one white canvas
    /// and writes the original beside the canvas to `output_path`.
    pub fn execute(
        &mut self,
        input_path: &Path,
        output_path: &Path,
    ) -> Result<WireframeReport, Box<dyn std::error::Error>> {
        let frame = self.reader.read(input_path)?;
        let regions = self.detector.detect(&frame)?;
        log::info!(
            "{}: {} face(s) in {}x{}",
            input_path.display(),
            regions.len(),
            frame.width(),
            frame.height()
        );

        let mut canvas = RasterCanvas::blank(frame.width(), frame.height());
        for (i, region) in regions.iter().enumerate() {
            log::debug!(
                "Face {i}: ({}, {}) {}x{} conf {:.2}",
                region.x,
                region.y,
                region.width,
                region.height,
                region.confidence
            );
            let landmarks = self.predictor.predict(&frame, region)?;
            self.renderer.draw(&mut canvas, &landmarks);
        }

        let composed = compose_side_by_side(frame, canvas.into_frame());
        self.writer.write(output_path, &composed)?;
        log::info!("Wrote {}", output_path.display());

        Ok(WireframeReport {
            faces: regions.len(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::detection::domain::landmark_set::LandmarkSet;
    use crate::shared::constants::{CANVAS_BACKGROUND, NUM_LANDMARKS};
    use crate::shared::frame::Frame;
    use crate::shared::point::Point;
    use crate::shared::region::FaceRegion;
    use std::path::PathBuf;
    use std::sync::{Arc, Mutex};

    // --- Stubs ---

    struct StubImageReader {
        frame: Frame,
    }

    impl ImageReader for StubImageReader {
        fn read(&self, _path: &Path) -> Result<Frame, Box<dyn std::error::Error>> {
            Ok(self.frame.clone())
        }
    }

    struct FailingReader;

    impl ImageReader for FailingReader {
        fn read(&self, path: &Path) -> Result<Frame, Box<dyn std::error::Error>> {
            Err(format!("cannot decode {}", path.display()).into())
        }
    }

    struct StubImageWriter {
        written: Arc<Mutex<Vec<(PathBuf, Frame)>>>,
    }

    impl StubImageWriter {
        fn new() -> Self {
            Self {
                written: Arc::new(Mutex::new(Vec::new())),
            }
        }
    }

    impl ImageWriter for StubImageWriter {
        fn write(&self, path: &Path, frame: &Frame) -> Result<(), Box<dyn std::error::Error>> {
            self.written
                .lock()
                .unwrap()
                .push((path.to_path_buf(), frame.clone()));
            Ok(())
        }
    }

    struct StubDetector {
        regions: Vec<FaceRegion>,
    }

    impl FaceDetector for StubDetector {
        fn detect(&mut self, _frame: &Frame) -> Result<Vec<FaceRegion>, Box<dyn std::error::Error>> {
            Ok(self.regions.clone())
        }
    }

    /// Places the 68 points on a circle inside the region it is given.
    struct CirclePredictor {
        calls: Arc<Mutex<Vec<FaceRegion>>>,
    }

    impl CirclePredictor {
        fn new() -> Self {
            Self {
                calls: Arc::new(Mutex::new(Vec::new())),
            }
        }
    }

    impl LandmarkPredictor for CirclePredictor {
        fn predict(
            &mut self,
            _frame: &Frame,
            region: &FaceRegion,
        ) -> Result<LandmarkSet, Box<dyn std::error::Error>> {
            self.calls.lock().unwrap().push(region.clone());
            let (cx, cy) = region.center();
            let r = region.width.min(region.height) as f64 * 0.4;
            let points: Vec<Point> = (0..NUM_LANDMARKS)
                .map(|i| {
                    let a = i as f64 / NUM_LANDMARKS as f64 * std::f64::consts::TAU;
                    Point::rounded(cx + r * a.cos(), cy + r * a.sin())
                })
                .collect();
            Ok(LandmarkSet::from_points(&points)?)
        }
    }

    struct FailingPredictor;

    impl LandmarkPredictor for FailingPredictor {
        fn predict(
            &mut self,
            _frame: &Frame,
            _region: &FaceRegion,
        ) -> Result<LandmarkSet, Box<dyn std::error::Error>> {
            Err("inference failed".into())
        }
    }

    // --- Helpers ---

    fn make_frame(w: u32, h: u32) -> Frame {
        let data = (0..w * h * 3).map(|i| (i % 251) as u8).collect();
        Frame::new(data, w, h)
    }

    fn face(x: i32, y: i32, w: i32, h: i32) -> FaceRegion {
        FaceRegion {
            x,
            y,
            width: w,
            height: h,
            confidence: 0.9,
        }
    }

    fn use_case(
        frame: Frame,
        regions: Vec<FaceRegion>,
        writer: StubImageWriter,
        predictor: Box<dyn LandmarkPredictor>,
    ) -> RenderWireframeUseCase {
        RenderWireframeUseCase::new(
            Box::new(StubImageReader { frame }),
            Box::new(writer),
            Box::new(StubDetector { regions }),
            predictor,
            FeatureTable::standard(),
        )
    }

    fn left_half_matches(out: &Frame, original: &Frame) -> bool {
        (0..original.height())
            .all(|y| (0..original.width()).all(|x| out.pixel(x, y) == original.pixel(x, y)))
    }

    fn right_half_is_blank(out: &Frame, offset: u32) -> bool {
        (0..out.height()).all(|y| (offset..out.width()).all(|x| out.pixel(x, y) == CANVAS_BACKGROUND))
    }

    // --- Tests ---

    #[test]
    fn test_no_faces_writes_original_beside_blank_canvas() {
        let original = make_frame(80, 60);
        let writer = StubImageWriter::new();
        let written = writer.written.clone();
        let predictor = CirclePredictor::new();
        let calls = predictor.calls.clone();

        let mut uc = use_case(original.clone(), vec![], writer, Box::new(predictor));
        let report = uc
            .execute(Path::new("in.png"), Path::new("out.jpg"))
            .unwrap();

        assert_eq!(report, WireframeReport { faces: 0 });
        assert!(calls.lock().unwrap().is_empty());

        let written = written.lock().unwrap();
        assert_eq!(written.len(), 1);
        let out = &written[0].1;
        assert_eq!((out.width(), out.height()), (160, 60));
        assert!(left_half_matches(out, &original));
        assert!(right_half_is_blank(out, 80));
    }

    #[test]
    fn test_one_face_is_drawn_on_right_half() {
        let original = make_frame(100, 80);
        let writer = StubImageWriter::new();
        let written = writer.written.clone();

        let mut uc = use_case(
            original.clone(),
            vec![face(20, 10, 60, 60)],
            writer,
            Box::new(CirclePredictor::new()),
        );
        let report = uc
            .execute(Path::new("in.png"), Path::new("out.jpg"))
            .unwrap();

        assert_eq!(report.faces, 1);
        let written = written.lock().unwrap();
        let out = &written[0].1;
        assert_eq!((out.width(), out.height()), (200, 80));
        assert!(left_half_matches(out, &original));
        assert!(!right_half_is_blank(out, 100));
    }

    #[test]
    fn test_predictor_called_once_per_face() {
        let predictor = CirclePredictor::new();
        let calls = predictor.calls.clone();
        let regions = vec![face(0, 0, 40, 40), face(60, 20, 30, 30)];

        let mut uc = use_case(
            make_frame(120, 80),
            regions.clone(),
            StubImageWriter::new(),
            Box::new(predictor),
        );
        let report = uc
            .execute(Path::new("in.png"), Path::new("out.jpg"))
            .unwrap();

        assert_eq!(report.faces, 2);
        assert_eq!(*calls.lock().unwrap(), regions);
    }

    #[test]
    fn test_writes_to_given_output_path() {
        let writer = StubImageWriter::new();
        let written = writer.written.clone();

        let mut uc = use_case(make_frame(10, 10), vec![], writer, Box::new(CirclePredictor::new()));
        uc.execute(Path::new("dane/a.png"), Path::new("dane68/a.png-68.jpg"))
            .unwrap();

        assert_eq!(written.lock().unwrap()[0].0, PathBuf::from("dane68/a.png-68.jpg"));
    }

    #[test]
    fn test_same_input_gives_identical_output() {
        let run = || {
            let writer = StubImageWriter::new();
            let written = writer.written.clone();
            let mut uc = use_case(
                make_frame(90, 70),
                vec![face(10, 10, 50, 50)],
                writer,
                Box::new(CirclePredictor::new()),
            );
            uc.execute(Path::new("in.png"), Path::new("out.jpg"))
                .unwrap();
            let frame = written.lock().unwrap()[0].1.clone();
            frame
        };
        assert_eq!(run(), run());
    }

    #[test]
    fn test_read_error_propagates_and_writes_nothing() {
        let writer = StubImageWriter::new();
        let written = writer.written.clone();
        let mut uc = RenderWireframeUseCase::new(
            Box::new(FailingReader),
            Box::new(writer),
            Box::new(StubDetector { regions: vec![] }),
            Box::new(CirclePredictor::new()),
            FeatureTable::standard(),
        );

        let err = uc
            .execute(Path::new("broken.png"), Path::new("out.jpg"))
            .unwrap_err();
        assert!(err.to_string().contains("broken.png"));
        assert!(written.lock().unwrap().is_empty());
    }

    #[test]
    fn test_predictor_error_propagates() {
        let writer = StubImageWriter::new();
        let written = writer.written.clone();
        let mut uc = use_case(
            make_frame(50, 50),
            vec![face(5, 5, 30, 30)],
            writer,
            Box::new(FailingPredictor),
        );

        assert!(uc
            .execute(Path::new("in.png"), Path::new("out.jpg"))
            .is_err());
        assert!(written.lock().unwrap().is_empty());
    }

    #[test]
    fn test_predictor_not_called_without_faces_even_if_failing() {
        let mut uc = use_case(
            make_frame(50, 50),
            vec![],
            StubImageWriter::new(),
            Box::new(FailingPredictor),
        );
        assert!(uc
            .execute(Path::new("in.png"), Path::new("out.jpg"))
            .is_ok());
    }
}

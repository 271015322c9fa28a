use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::process;

use clap::Parser;

use wireframe68_core::detection::domain::face_detector::FaceDetector;
use wireframe68_core::detection::domain::landmark_predictor::LandmarkPredictor;
use wireframe68_core::detection::infrastructure::onnx_landmark_predictor::OnnxLandmarkPredictor;
use wireframe68_core::detection::infrastructure::onnx_yolo_detector::{
    OnnxYoloDetector, DEFAULT_CONFIDENCE,
};
use wireframe68_core::imaging::infrastructure::image_file_reader::ImageFileReader;
use wireframe68_core::imaging::infrastructure::jpeg_file_writer::JpegFileWriter;
use wireframe68_core::pipeline::output_naming::OutputNaming;
use wireframe68_core::pipeline::render_wireframe_use_case::RenderWireframeUseCase;
use wireframe68_core::rendering::domain::feature_table::{FeatureTable, FeatureTableError};
use wireframe68_core::shared::constants::{
    DEFAULT_OUTPUT_DIR, DEFAULT_OUTPUT_SUFFIX, IMAGE_EXTENSIONS, LANDMARK_MODEL_PATH,
    NUM_LANDMARKS, YOLO_MODEL_NAME, YOLO_MODEL_URL,
};
use wireframe68_core::shared::model_resolver;

/// Draws a 68-point facial landmark wireframe beside each input image.
#[derive(Parser, Debug)]
#[command(name = "wireframe68")]
struct Cli {
    /// Input image files.
    #[arg(required = true, num_args = 1..)]
    files: Vec<PathBuf>,

    /// Directory the composed JPEGs are written to (must exist).
    #[arg(long, default_value = DEFAULT_OUTPUT_DIR)]
    output_dir: PathBuf,

    /// Appended to the input file name to form the output name.
    #[arg(long, default_value = DEFAULT_OUTPUT_SUFFIX)]
    suffix: String,

    /// 68-point landmark model (ONNX).
    #[arg(long, default_value = LANDMARK_MODEL_PATH)]
    landmark_model: PathBuf,

    /// Face detection confidence threshold (0.0-1.0).
    #[arg(long, default_value_t = DEFAULT_CONFIDENCE)]
    confidence: f64,
}

fn main() {
    env_logger::init();

    if let Err(e) = run() {
        eprintln!("Error: {e}");
        process::exit(1);
    }
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    validate(&cli)?;

    let table = feature_table()?;
    let landmark_model = model_resolver::require_local(&cli.landmark_model)?;
    let detector = build_detector(cli.confidence)?;
    let predictor: Box<dyn LandmarkPredictor> =
        Box::new(OnnxLandmarkPredictor::new(&landmark_model)?);

    let naming = OutputNaming::new(cli.output_dir, cli.suffix);
    let jobs = plan_outputs(&cli.files, &naming)?;

    let mut use_case = RenderWireframeUseCase::new(
        Box::new(ImageFileReader::new()),
        Box::new(JpegFileWriter::new()),
        detector,
        predictor,
        table,
    );

    let mut faces = 0;
    for (input, output) in &jobs {
        faces += use_case.execute(input, output)?.faces;
    }
    log::info!("Processed {} file(s), {faces} face(s)", jobs.len());
    Ok(())
}

/// The standard table, checked against the landmark count before any work.
fn feature_table() -> Result<FeatureTable, FeatureTableError> {
    FeatureTable::new(FeatureTable::standard().features().to_vec(), NUM_LANDMARKS)
}

fn build_detector(confidence: f64) -> Result<Box<dyn FaceDetector>, Box<dyn std::error::Error>> {
    log::info!("Resolving model: {YOLO_MODEL_NAME}");
    let model_path = model_resolver::resolve(
        YOLO_MODEL_NAME,
        YOLO_MODEL_URL,
        Some(Path::new("models")),
        Some(Box::new(download_progress)),
    )?;
    Ok(Box::new(OnnxYoloDetector::new(&model_path, confidence)?))
}

fn validate(cli: &Cli) -> Result<(), Box<dyn std::error::Error>> {
    for file in &cli.files {
        if !file.is_file() {
            return Err(format!("Input file not found: {}", file.display()).into());
        }
        if !is_image(file) {
            log::warn!(
                "{} has no recognised image extension, trying to decode anyway",
                file.display()
            );
        }
    }
    if !cli.output_dir.is_dir() {
        return Err(format!(
            "Output directory does not exist: {}",
            cli.output_dir.display()
        )
        .into());
    }
    if !(0.0..=1.0).contains(&cli.confidence) {
        return Err(format!(
            "Confidence must be between 0.0 and 1.0, got {}",
            cli.confidence
        )
        .into());
    }
    Ok(())
}

/// Pairs every input with its output path. Later files that map to an
/// already used output name overwrite it; that is logged, not rejected.
fn plan_outputs(
    files: &[PathBuf],
    naming: &OutputNaming,
) -> Result<Vec<(PathBuf, PathBuf)>, Box<dyn std::error::Error>> {
    let mut seen = HashSet::new();
    let mut jobs = Vec::with_capacity(files.len());
    for input in files {
        let output = naming
            .output_path(input)
            .ok_or_else(|| format!("Input has no file name: {}", input.display()))?;
        if !seen.insert(output.clone()) {
            log::warn!(
                "{} overwrites an earlier output {}",
                input.display(),
                output.display()
            );
        }
        jobs.push((input.clone(), output));
    }
    Ok(jobs)
}

fn is_image(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| IMAGE_EXTENSIONS.contains(&ext.to_lowercase().as_str()))
        .unwrap_or(false)
}

fn download_progress(downloaded: u64, total: u64) {
    if total > 0 {
        let pct = (downloaded as f64 / total as f64 * 100.0) as u32;
        eprint!("\rDownloading face detection model... {pct}%");
        if downloaded >= total {
            eprintln!();
        }
    } else {
        eprint!("\rDownloading face detection model... {downloaded} bytes");
    }
}

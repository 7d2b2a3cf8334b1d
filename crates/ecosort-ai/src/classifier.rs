//! ONNX Runtime classification pipeline for waste images.
//!
//! Loads a convolutional classifier exported to ONNX. The model expects a
//! 150×150 RGB image scaled to [0,1] in NHWC layout and emits a 10-way
//! softmax over [`MATERIAL_CLASSES`].

use std::cmp::Ordering;
use std::path::Path;
use std::sync::{Mutex, PoisonError};

use ecosort_core::{MATERIAL_CLASSES, Prediction};
use image::imageops::FilterType;
use ort::session::Session;
use ort::value::Tensor;
use thiserror::Error;
use tracing::info;

/// Input edge length the model was trained on.
const INPUT_SIZE: u32 = 150;

#[derive(Debug, Error)]
pub enum InferError {
    /// The payload could not be decoded as an image.
    #[error("unreadable image: {0}")]
    Decode(String),
    /// The ONNX session failed or produced an unusable output.
    #[error("inference failed: {0}")]
    Runtime(String),
}

/// Classify an image file into a waste-material class.
///
/// The seam between the HTTP layer and the concrete ONNX pipeline; the
/// handlers depend on this trait so tests can substitute a stub.
pub trait ImageClassifier: Send + Sync {
    fn classify(&self, image_path: &Path) -> Result<Prediction, InferError>;
}

/// ONNX Runtime waste classifier.
///
/// Loaded once at startup and shared for the process lifetime. The weights
/// are immutable after load, but ort sessions need exclusive access while
/// running, so runs are serialized behind a mutex.
pub struct WasteClassifier {
    session: Mutex<Session>,
}

impl WasteClassifier {
    /// Load the classifier from an ONNX artifact on disk.
    pub fn load(model_path: &Path) -> anyhow::Result<Self> {
        anyhow::ensure!(
            model_path.exists(),
            "model artifact not found: {}",
            model_path.display()
        );
        let session = Session::builder()?.commit_from_file(model_path)?;
        info!(model = %model_path.display(), classes = MATERIAL_CLASSES.len(), "loaded classifier");
        Ok(Self {
            session: Mutex::new(session),
        })
    }
}

impl ImageClassifier for WasteClassifier {
    fn classify(&self, image_path: &Path) -> Result<Prediction, InferError> {
        let pixels = load_pixels(image_path)?;
        let shape = [1i64, INPUT_SIZE as i64, INPUT_SIZE as i64, 3];
        let input = Tensor::from_array((shape, pixels.into_boxed_slice()))
            .map_err(|e| InferError::Runtime(e.to_string()))?;

        let mut session = self.session.lock().unwrap_or_else(PoisonError::into_inner);
        let outputs = session
            .run(ort::inputs![input])
            .map_err(|e| InferError::Runtime(e.to_string()))?;
        let (_, probs) = outputs[0]
            .try_extract_tensor::<f32>()
            .map_err(|e| InferError::Runtime(e.to_string()))?;

        if probs.len() != MATERIAL_CLASSES.len() {
            return Err(InferError::Runtime(format!(
                "model emitted {} scores for {} classes",
                probs.len(),
                MATERIAL_CLASSES.len()
            )));
        }

        let (best_idx, &best_prob) = probs
            .iter()
            .enumerate()
            .max_by(|(_, a), (_, b)| a.partial_cmp(b).unwrap_or(Ordering::Equal))
            .ok_or_else(|| InferError::Runtime("empty model output".to_string()))?;

        Ok(Prediction {
            label: MATERIAL_CLASSES[best_idx].to_string(),
            confidence: round2(best_prob * 100.0),
        })
    }
}

/// Decode an image file into the model's input layout.
///
/// Converts to RGB, resizes to 150×150, scales each channel to [0,1].
/// Pixels stay interleaved (NHWC), matching the exported model's input.
fn load_pixels(path: &Path) -> Result<Vec<f32>, InferError> {
    let img = image::ImageReader::open(path)
        .map_err(|e| InferError::Decode(e.to_string()))?
        .with_guessed_format()
        .map_err(|e| InferError::Decode(e.to_string()))?
        .decode()
        .map_err(|e| InferError::Decode(e.to_string()))?;

    let resized = image::imageops::resize(&img.to_rgb8(), INPUT_SIZE, INPUT_SIZE, FilterType::CatmullRom);
    Ok(resized
        .pixels()
        .flat_map(|p| p.0)
        .map(|v| v as f32 / 255.0)
        .collect())
}

/// Round to two decimal places, matching the wire contract.
fn round2(x: f32) -> f32 {
    (x * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgb, RgbImage};
    use std::path::PathBuf;

    fn write_solid_image(r: u8, g: u8, b: u8) -> tempfile::NamedTempFile {
        let file = tempfile::Builder::new().suffix(".png").tempfile().unwrap();
        let img = RgbImage::from_pixel(INPUT_SIZE, INPUT_SIZE, Rgb([r, g, b]));
        img.save(file.path()).unwrap();
        file
    }

    #[test]
    fn pixels_are_scaled_and_interleaved() {
        let file = write_solid_image(10, 200, 30);
        let pixels = load_pixels(file.path()).unwrap();
        assert_eq!(pixels.len(), (INPUT_SIZE * INPUT_SIZE * 3) as usize);

        // NHWC: the first three values are the first pixel's channels.
        assert!((pixels[0] - 10.0 / 255.0).abs() < 1e-6);
        assert!((pixels[1] - 200.0 / 255.0).abs() < 1e-6);
        assert!((pixels[2] - 30.0 / 255.0).abs() < 1e-6);

        assert!(pixels.iter().all(|&v| (0.0..=1.0).contains(&v)));
    }

    #[test]
    fn non_square_images_are_resized() {
        let file = tempfile::Builder::new().suffix(".png").tempfile().unwrap();
        let img = RgbImage::from_pixel(640, 480, Rgb([128, 128, 128]));
        img.save(file.path()).unwrap();

        let pixels = load_pixels(file.path()).unwrap();
        assert_eq!(pixels.len(), (INPUT_SIZE * INPUT_SIZE * 3) as usize);
    }

    #[test]
    fn corrupt_payload_is_a_decode_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        std::io::Write::write_all(&mut file, b"definitely not an image").unwrap();
        match load_pixels(file.path()) {
            Err(InferError::Decode(_)) => {}
            other => panic!("expected Decode error, got {other:?}"),
        }
    }

    #[test]
    fn missing_file_is_a_decode_error() {
        match load_pixels(Path::new("/nonexistent/image.jpg")) {
            Err(InferError::Decode(_)) => {}
            other => panic!("expected Decode error, got {other:?}"),
        }
    }

    #[test]
    fn round2_truncates_noise() {
        assert_eq!(round2(97.41999), 97.42);
        assert_eq!(round2(0.0), 0.0);
        assert_eq!(round2(100.0), 100.0);
    }

    // ── Model-dependent tests ──
    //
    // These need the exported ONNX artifact, which is produced by the
    // external training pipeline and not checked in.

    fn model_path() -> PathBuf {
        std::env::var("MODEL_PATH")
            .map(PathBuf::from)
            .unwrap_or_else(|_| {
                PathBuf::from(env!("CARGO_MANIFEST_DIR"))
                    .join("..")
                    .join("..")
                    .join("model")
                    .join("waste_classifier.onnx")
            })
    }

    #[test]
    #[ignore = "requires the waste_classifier.onnx artifact"]
    fn classify_returns_a_known_label() {
        let classifier = WasteClassifier::load(&model_path()).unwrap();
        let file = write_solid_image(90, 120, 60);
        let prediction = classifier.classify(file.path()).unwrap();
        assert!(MATERIAL_CLASSES.contains(&prediction.label.as_str()));
        assert!((0.0..=100.0).contains(&prediction.confidence));
    }
}

//! AI inference layer: ONNX Runtime classification of waste images.

mod classifier;
pub use classifier::{ImageClassifier, InferError, WasteClassifier};

//! Core types and pure domain logic shared across the ecosort crates.

mod guide;
mod material;
mod points;
mod response;

pub use guide::Guide;
pub use material::{MATERIAL_CLASSES, normalize_label};
pub use points::points_for_category;
pub use response::{ClassifyResponse, Prediction};

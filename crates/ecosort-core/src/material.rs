//! The closed vocabulary of material classes and label normalization.

/// Material classes the model was trained on, in model output order.
///
/// The classifier's output vector is indexed by this slice; reordering it
/// would silently mislabel every prediction.
pub const MATERIAL_CLASSES: &[&str] = &[
    "battery",
    "biological",
    "cardboard",
    "clothes",
    "glass",
    "metal",
    "paper",
    "plastic",
    "shoes",
    "trash",
];

/// Normalize a predicted label before guide lookup: trim and lowercase.
///
/// Idempotent: `normalize_label(normalize_label(x)) == normalize_label(x)`.
pub fn normalize_label(label: &str) -> String {
    label.trim().to_lowercase()
}

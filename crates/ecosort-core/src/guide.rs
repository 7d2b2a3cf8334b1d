//! The disposal guide record as stored in the document store.

use serde::{Deserialize, Serialize};

/// A disposal guide for one material type.
///
/// Owned by the external document store and read-only from this service's
/// perspective (the seeder is the only writer). Every field the store may
/// omit carries a serde default so a partially-shaped record still
/// deserializes instead of failing the request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Guide {
    /// Material type this guide applies to, e.g. `plastic`. Stored casing
    /// is inconsistent; lookups must case-fold.
    #[serde(rename = "type")]
    pub material: String,
    /// Disposal category: recyclable, biodegradable, hazardous, non-recyclable.
    #[serde(default = "default_category")]
    pub category: String,
    #[serde(default)]
    pub recyclable: bool,
    #[serde(default)]
    pub biodegradable: bool,
    #[serde(default)]
    pub hazardous: bool,
    /// Ordered, human-readable disposal instructions.
    #[serde(default)]
    pub instructions: Vec<String>,
}

fn default_category() -> String {
    "unknown".to_string()
}

//! In-memory guide lookup used by tests.

use async_trait::async_trait;
use ecosort_core::Guide;

use crate::{GuideLookup, StoreError};

/// A fixed set of guides held in process memory.
pub struct MemoryGuides {
    guides: Vec<Guide>,
}

impl MemoryGuides {
    pub fn new(guides: Vec<Guide>) -> Self {
        Self { guides }
    }

    pub fn empty() -> Self {
        Self { guides: Vec::new() }
    }
}

#[async_trait]
impl GuideLookup for MemoryGuides {
    async fn find_guide(&self, label: &str) -> Result<Option<Guide>, StoreError> {
        Ok(self
            .guides
            .iter()
            .find(|g| g.material.eq_ignore_ascii_case(label))
            .cloned())
    }

    async fn sample_guide(&self) -> Result<Option<Guide>, StoreError> {
        Ok(self.guides.first().cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn guide(material: &str) -> Guide {
        Guide {
            material: material.to_string(),
            category: "recyclable".to_string(),
            recyclable: true,
            biodegradable: false,
            hazardous: false,
            instructions: vec!["Rinse".to_string()],
        }
    }

    #[tokio::test]
    async fn lookup_ignores_stored_casing() {
        let store = MemoryGuides::new(vec![guide("Plastic")]);
        let found = store.find_guide("plastic").await.unwrap();
        assert_eq!(found.unwrap().material, "Plastic");
    }

    #[tokio::test]
    async fn lookup_misses_unknown_material() {
        let store = MemoryGuides::new(vec![guide("Plastic")]);
        assert!(store.find_guide("unobtainium").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn sample_of_empty_store_is_none() {
        assert!(MemoryGuides::empty().sample_guide().await.unwrap().is_none());
    }
}

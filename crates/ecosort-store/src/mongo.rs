//! MongoDB-backed guide store.

use async_trait::async_trait;
use ecosort_core::Guide;
use mongodb::bson::{Document, doc};
use mongodb::{Client, Collection};
use tracing::info;

use crate::{GuideLookup, StoreError};

/// Guide store backed by a MongoDB collection.
///
/// One instance serves the whole process; the driver maintains its own
/// connection pool, so concurrent requests share it safely.
pub struct GuideStore {
    guides: Collection<Guide>,
}

impl GuideStore {
    /// Connect to the document store.
    ///
    /// The driver connects lazily, so this succeeds even when the store is
    /// down; failures surface on the first query instead.
    pub async fn connect(uri: &str, db: &str, collection: &str) -> Result<Self, StoreError> {
        let client = Client::with_uri_str(uri).await?;
        let guides = client.database(db).collection(collection);
        info!(db, collection, "connected to guide store");
        Ok(Self { guides })
    }

    /// Replace the entire guide collection with the given records.
    ///
    /// Used by the seeder. Returns the number of inserted guides.
    pub async fn replace_all(&self, guides: &[Guide]) -> Result<u64, StoreError> {
        self.guides.delete_many(doc! {}).await?;
        if guides.is_empty() {
            return Ok(0);
        }
        let result = self.guides.insert_many(guides).await?;
        info!(inserted = result.inserted_ids.len(), "replaced guide collection");
        Ok(result.inserted_ids.len() as u64)
    }
}

/// Case-folding equality filter on the stored `type` field.
///
/// Stored casing is inconsistent ("Plastic" vs "plastic"), so the stored
/// value is lowered server-side instead of matching exactly.
fn type_filter(label: &str) -> Document {
    doc! { "$expr": { "$eq": [ { "$toLower": "$type" }, label ] } }
}

#[async_trait]
impl GuideLookup for GuideStore {
    async fn find_guide(&self, label: &str) -> Result<Option<Guide>, StoreError> {
        let guide = self.guides.find_one(type_filter(label)).await?;
        Ok(guide)
    }

    async fn sample_guide(&self) -> Result<Option<Guide>, StoreError> {
        let guide = self.guides.find_one(doc! {}).await?;
        Ok(guide)
    }
}

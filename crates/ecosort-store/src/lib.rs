//! Guide storage: MongoDB-backed disposal guide lookup with an in-memory
//! implementation for tests.

mod error;
mod memory;
mod mongo;

pub use error::StoreError;
pub use memory::MemoryGuides;
pub use mongo::GuideStore;

use async_trait::async_trait;
use ecosort_core::Guide;

/// Read-side lookup over disposal guide records.
///
/// Handlers depend on this trait rather than the MongoDB client directly,
/// so the store can be swapped out in tests.
#[async_trait]
pub trait GuideLookup: Send + Sync {
    /// Find the guide whose material type equals `label`, ignoring case.
    ///
    /// `label` is expected to be already normalized (trimmed, lowercased).
    /// At most one record is returned; which one wins among duplicates is
    /// whatever the store yields first.
    async fn find_guide(&self, label: &str) -> Result<Option<Guide>, StoreError>;

    /// Fetch one arbitrary guide, for connectivity diagnostics.
    async fn sample_guide(&self) -> Result<Option<Guide>, StoreError>;
}

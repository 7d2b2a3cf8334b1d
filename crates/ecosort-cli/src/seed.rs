//! Guide seeder: replaces the guide collection with records from a JSON file.

use std::path::Path;

use anyhow::Context;
use ecosort_core::Guide;
use ecosort_store::GuideStore;
use tracing::info;

pub async fn run(mongo_uri: &str, db: &str, collection: &str, file: &Path) -> anyhow::Result<()> {
    let guides = read_guides(file)?;
    let store = GuideStore::connect(mongo_uri, db, collection)
        .await
        .context("connecting to guide store")?;
    let inserted = store.replace_all(&guides).await?;
    info!(inserted, "seeded guide collection");
    Ok(())
}

fn read_guides(file: &Path) -> anyhow::Result<Vec<Guide>> {
    let raw = std::fs::read_to_string(file)
        .with_context(|| format!("reading {}", file.display()))?;
    let guides: Vec<Guide> = serde_json::from_str(&raw).context("parsing guide JSON")?;
    anyhow::ensure!(!guides.is_empty(), "guide file {} is empty", file.display());
    Ok(guides)
}

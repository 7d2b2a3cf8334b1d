//! Dataset splitter: partitions per-category image folders into train/test.
//!
//! Source layout is one subdirectory per category; the destination receives
//! `train/<category>` and `test/<category>` with files copied, not moved.

use std::fs;
use std::path::Path;

use anyhow::Context;
use rand::Rng;
use rand::seq::SliceRandom;
use tracing::info;

pub fn run(source: &Path, dest: &Path, ratio: f64) -> anyhow::Result<()> {
    anyhow::ensure!(
        (0.0..=1.0).contains(&ratio),
        "split ratio must be in [0, 1], got {ratio}"
    );
    let mut rng = rand::rng();
    split_dataset(source, dest, ratio, &mut rng)
}

fn split_dataset<R: Rng>(source: &Path, dest: &Path, ratio: f64, rng: &mut R) -> anyhow::Result<()> {
    let entries = fs::read_dir(source)
        .with_context(|| format!("reading dataset directory {}", source.display()))?;

    for entry in entries {
        let entry = entry?;
        if !entry.file_type()?.is_dir() {
            continue;
        }
        let category = entry.file_name();

        let mut files: Vec<_> = fs::read_dir(entry.path())?
            .filter_map(|e| e.ok())
            .filter(|e| e.file_type().map(|t| t.is_file()).unwrap_or(false))
            .map(|e| e.path())
            .collect();
        // Directory order is platform-dependent; sort before shuffling so a
        // seeded rng yields the same partition everywhere.
        files.sort();
        files.shuffle(rng);

        let split_index = (files.len() as f64 * ratio) as usize;
        let train_dir = dest.join("train").join(&category);
        let test_dir = dest.join("test").join(&category);
        fs::create_dir_all(&train_dir)?;
        fs::create_dir_all(&test_dir)?;

        for (i, file) in files.iter().enumerate() {
            let target = if i < split_index { &train_dir } else { &test_dir };
            let name = file
                .file_name()
                .with_context(|| format!("unnamed file {}", file.display()))?;
            fs::copy(file, target.join(name))?;
        }

        info!(
            category = %category.to_string_lossy(),
            train = split_index,
            test = files.len() - split_index,
            "split category"
        );
    }
    Ok(())
}

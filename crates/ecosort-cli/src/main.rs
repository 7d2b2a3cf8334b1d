//! ecosort binary: serve the classification API, seed the guide store, or
//! split a labeled dataset for training.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use clap::{Parser, Subcommand};
use ecosort_ai::WasteClassifier;
use ecosort_api::{ApiConfig, AppState, build_router};
use ecosort_store::GuideStore;

mod seed;
mod split;

/// Collection holding the disposal guide records.
const GUIDE_COLLECTION: &str = "wasteguides";

#[derive(Parser)]
#[command(name = "ecosort", version, about = "Waste classification service")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Run the classification HTTP service.
    Serve {
        #[arg(long, env = "PORT", default_value_t = 8000)]
        port: u16,
        /// Path to the exported ONNX classifier.
        #[arg(long, env = "MODEL_PATH", default_value = "model/waste_classifier.onnx")]
        model: PathBuf,
        #[arg(long, env = "MONGODB_URI", default_value = "mongodb://localhost:27017")]
        mongo_uri: String,
        #[arg(long, env = "MONGODB_DB", default_value = "test")]
        db: String,
        /// Directory where uploads are staged.
        #[arg(long, env = "UPLOAD_DIR", default_value = "uploads")]
        upload_dir: PathBuf,
        /// Allowed CORS origin; repeat for several. Absent means permissive.
        #[arg(long = "cors-origin")]
        cors_origins: Vec<String>,
        #[arg(long, default_value_t = 30)]
        inference_timeout_secs: u64,
        #[arg(long, default_value_t = 5)]
        lookup_timeout_secs: u64,
    },
    /// Seed the guide collection from a JSON file.
    Seed {
        #[arg(long, env = "MONGODB_URI", default_value = "mongodb://localhost:27017")]
        mongo_uri: String,
        #[arg(long, env = "MONGODB_DB", default_value = "test")]
        db: String,
        /// JSON array of guide records.
        #[arg(long, default_value = "data/waste_guides.json")]
        file: PathBuf,
    },
    /// Split a labeled dataset into train/test folders.
    Split {
        /// Source directory with one subdirectory per category.
        source: PathBuf,
        /// Destination directory; receives train/ and test/.
        dest: PathBuf,
        /// Fraction of each category that goes to train.
        #[arg(long, default_value_t = 0.8)]
        ratio: f64,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();
    match cli.command {
        Command::Serve {
            port,
            model,
            mongo_uri,
            db,
            upload_dir,
            cors_origins,
            inference_timeout_secs,
            lookup_timeout_secs,
        } => {
            let config = ApiConfig {
                upload_dir,
                cors_origins,
                inference_timeout: Duration::from_secs(inference_timeout_secs),
                lookup_timeout: Duration::from_secs(lookup_timeout_secs),
            };
            serve(port, &model, &mongo_uri, &db, config).await
        }
        Command::Seed { mongo_uri, db, file } => {
            seed::run(&mongo_uri, &db, GUIDE_COLLECTION, &file).await
        }
        Command::Split { source, dest, ratio } => split::run(&source, &dest, ratio),
    }
}

async fn serve(
    port: u16,
    model: &Path,
    mongo_uri: &str,
    db: &str,
    config: ApiConfig,
) -> anyhow::Result<()> {
    let classifier = WasteClassifier::load(model).context("loading classifier model")?;
    let guides = GuideStore::connect(mongo_uri, db, GUIDE_COLLECTION)
        .await
        .context("connecting to guide store")?;
    std::fs::create_dir_all(&config.upload_dir).context("creating upload directory")?;

    let state = Arc::new(AppState {
        classifier: Arc::new(classifier),
        guides: Arc::new(guides),
        config,
    });
    let app = build_router(state);

    let addr = format!("0.0.0.0:{port}");
    tracing::info!("listening on {addr}");
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}

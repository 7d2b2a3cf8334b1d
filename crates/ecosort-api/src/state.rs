//! Process-wide dependencies and runtime settings for the HTTP surface.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use ecosort_ai::ImageClassifier;
use ecosort_store::GuideLookup;

/// Runtime settings for the HTTP surface.
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// Directory where uploads are staged; must exist before serving.
    pub upload_dir: PathBuf,
    /// Explicit CORS origins; empty means permissive (development only).
    pub cors_origins: Vec<String>,
    /// Upper bound on one inference run.
    pub inference_timeout: Duration,
    /// Upper bound on one guide lookup.
    pub lookup_timeout: Duration,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            upload_dir: PathBuf::from("uploads"),
            cors_origins: Vec::new(),
            inference_timeout: Duration::from_secs(30),
            lookup_timeout: Duration::from_secs(5),
        }
    }
}

/// Shared state injected into every handler.
///
/// Built once at startup; the classifier and store are read-only from the
/// handlers' perspective for the process lifetime.
pub struct AppState {
    pub classifier: Arc<dyn ImageClassifier>,
    pub guides: Arc<dyn GuideLookup>,
    pub config: ApiConfig,
}

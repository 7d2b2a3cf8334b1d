//! Route handlers for the classification service.

use std::io::Write;
use std::path::Path;
use std::sync::Arc;

use axum::extract::{Multipart, State};
use axum::http::HeaderValue;
use axum::routing::{get, post};
use axum::{Json, Router};
use ecosort_core::{ClassifyResponse, normalize_label};
use serde_json::{Value, json};
use tempfile::NamedTempFile;
use tokio::time::timeout;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tracing::{info, warn};

use crate::{ApiError, AppState};

/// Assemble the router: routes, shared state, and the CORS policy.
pub fn build_router(state: Arc<AppState>) -> Router {
    let cors = cors_layer(&state.config.cors_origins);
    Router::new()
        .route("/", get(root))
        .route("/test-db", get(test_db))
        .route("/api/classify", post(classify))
        .layer(cors)
        .with_state(state)
}

/// Permissive when no origins are configured (development); otherwise
/// restricted to the given list.
fn cors_layer(origins: &[String]) -> CorsLayer {
    if origins.is_empty() {
        return CorsLayer::permissive();
    }
    let parsed: Vec<HeaderValue> = origins.iter().filter_map(|o| o.parse().ok()).collect();
    CorsLayer::new()
        .allow_origin(AllowOrigin::list(parsed))
        .allow_methods(Any)
        .allow_headers(Any)
}

async fn root() -> Json<Value> {
    Json(json!({ "message": "ecosort api is running" }))
}

/// Connectivity diagnostic: fetch one arbitrary guide and report its shape,
/// or the raw store error. Keep this route off production deployments; it
/// leaks store error detail.
async fn test_db(State(state): State<Arc<AppState>>) -> Json<Value> {
    match state.guides.sample_guide().await {
        Ok(Some(guide)) => Json(json!({
            "message": "store connected",
            "sample_guide": { "type": guide.material, "category": guide.category },
        })),
        Ok(None) => Json(json!({ "message": "store connected but no guides present" })),
        Err(err) => Json(json!({ "error": err.to_string() })),
    }
}

/// `POST /api/classify`: upload → stage → infer → lookup → respond.
async fn classify(
    State(state): State<Arc<AppState>>,
    mut multipart: Multipart,
) -> Result<Json<ClassifyResponse>, ApiError> {
    let (filename, payload) = read_upload(&mut multipart).await?;

    // Staged under a unique temporary name; the file is deleted when
    // `staged` drops, on every exit path including the error returns below.
    let staged = stage_upload(&state.config.upload_dir, &payload)?;

    let classifier = Arc::clone(&state.classifier);
    let image_path = staged.path().to_path_buf();
    let prediction = timeout(
        state.config.inference_timeout,
        tokio::task::spawn_blocking(move || classifier.classify(&image_path)),
    )
    .await
    .map_err(|_| ApiError::Inference("inference timed out".to_string()))?
    .map_err(|err| ApiError::Internal(format!("inference task failed: {err}")))??;

    let label = normalize_label(&prediction.label);

    // Store failures degrade to "no guide" so the response stays available
    // when the store is down.
    let guide = match timeout(state.config.lookup_timeout, state.guides.find_guide(&label)).await {
        Ok(Ok(found)) => found,
        Ok(Err(err)) => {
            warn!(%label, error = %err, "guide lookup failed, using defaults");
            None
        }
        Err(_) => {
            warn!(%label, "guide lookup timed out, using defaults");
            None
        }
    };

    let response = ClassifyResponse::assemble(prediction, filename, guide);
    info!(
        material = %response.material,
        confidence = response.confidence,
        category = %response.category,
        points = response.points_earned,
        "classified upload"
    );
    Ok(Json(response))
}

/// Pull the first file field out of the multipart body.
async fn read_upload(multipart: &mut Multipart) -> Result<(String, Vec<u8>), ApiError> {
    while let Some(field) = multipart.next_field().await? {
        if field.file_name().is_none() && field.name() != Some("file") {
            continue;
        }
        let filename = field.file_name().unwrap_or("upload").to_string();
        let payload = field.bytes().await?;
        return Ok((filename, payload.to_vec()));
    }
    Err(ApiError::BadRequest("no file field in upload".to_string()))
}

/// Write the payload to a uniquely-named temporary file in the upload
/// directory. The client filename is never used as the storage key, so
/// concurrent uploads cannot collide.
fn stage_upload(dir: &Path, payload: &[u8]) -> Result<NamedTempFile, ApiError> {
    let mut file = tempfile::Builder::new()
        .prefix("upload-")
        .tempfile_in(dir)
        .map_err(|err| ApiError::Internal(format!("staging upload: {err}")))?;
    file.write_all(payload)
        .map_err(|err| ApiError::Internal(format!("writing upload: {err}")))?;
    Ok(file)
}

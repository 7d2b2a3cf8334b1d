//! HTTP surface: axum router, request handlers, and the API error taxonomy.

mod error;
mod routes;
mod state;

pub use error::ApiError;
pub use routes::build_router;
pub use state::{ApiConfig, AppState};

pub mod chunk;
pub mod health;
pub mod strategies;
pub mod upload;

use axum::extract::DefaultBodyLimit;
use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::state::AppState;

/// Multipart framing on top of the raw upload.
const BODY_LIMIT_SLACK: usize = 1024 * 1024;

pub fn router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let body_limit = state.config.upload.max_file_size_bytes() + BODY_LIMIT_SLACK;

    let app = Router::new()
        .route("/api/health", get(health::health_check))
        .route("/api/strategies", get(strategies::list_strategies))
        .route("/api/upload", post(upload::upload))
        .route("/api/chunk", post(chunk::chunk_text));

    #[cfg(feature = "openapi")]
    let app = app.merge(crate::openapi::redoc());

    app.layer(DefaultBodyLimit::max(body_limit))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

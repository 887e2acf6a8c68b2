use axum::Router;
use utoipa::OpenApi;
use utoipa_redoc::{Redoc, Servable};

use crate::dto::chunk::{Chunk, ChunkMeta, ChunkResponse};
use crate::dto::upload::UploadResponse;
use crate::errors::ErrorResponse;
use crate::routes::health::HealthResponse;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "RAG Chunk API",
        version = "0.1.0",
        description = "PDF text extraction and chunking-strategy playground."
    ),
    paths(
        crate::routes::health::health_check,
        crate::routes::strategies::list_strategies,
        crate::routes::upload::upload,
        crate::routes::chunk::chunk_text,
    ),
    components(
        schemas(
            HealthResponse,
            UploadResponse,
            Chunk, ChunkMeta, ChunkResponse,
            ErrorResponse,
        )
    ),
    tags(
        (name = "Health", description = "Health check"),
        (name = "Chunking", description = "Strategy catalog, PDF extraction and chunking"),
    )
)]
pub struct ApiDoc;

/// Serves the generated document at `/redoc`.
pub fn redoc<S: Clone + Send + Sync + 'static>() -> Router<S> {
    Redoc::with_url("/redoc", ApiDoc::openapi()).into()
}

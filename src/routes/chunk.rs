use axum::{extract::Multipart, Json};

use crate::dto::chunk::{ChunkMeta, ChunkResponse};
use crate::dto::ordered_map::OrderedMap;
use crate::errors::AppError;
use crate::services::chunking::{self, ChunkParams, ChunkingError, Strategy};

impl From<ChunkingError> for AppError {
    fn from(e: ChunkingError) -> Self {
        AppError::Validation(e.to_string())
    }
}

#[cfg_attr(feature = "openapi", utoipa::path(post, path = "/api/chunk", tag = "Chunking", request_body(content = String, content_type = "multipart/form-data", description = "Fields `text`, `strategy`, plus one per strategy parameter"), responses((status = 200, body = ChunkResponse), (status = 400, body = crate::errors::ErrorResponse))))]
pub async fn chunk_text(mut multipart: Multipart) -> Result<Json<ChunkResponse>, AppError> {
    let mut text = None;
    let mut strategy_key = None;
    let mut params = OrderedMap::new();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("Invalid multipart data: {e}")))?
    {
        let name = field.name().unwrap_or_default().to_string();
        let value = field
            .text()
            .await
            .map_err(|e| AppError::Validation(format!("Failed to read field '{name}': {e}")))?;

        match name.as_str() {
            "text" => text = Some(value),
            "strategy" => strategy_key = Some(value),
            _ => params.insert(name.clone(), value),
        }
    }

    let text = text.ok_or_else(|| AppError::Validation("Field 'text' is required".to_string()))?;
    let strategy_key = strategy_key
        .ok_or_else(|| AppError::Validation("Field 'strategy' is required".to_string()))?;
    let strategy = Strategy::from_key(&strategy_key)
        .ok_or_else(|| ChunkingError::UnknownStrategy(strategy_key.clone()))?;

    let params = ChunkParams::from_fields(strategy, &params)?;
    let chunks = chunking::chunk(strategy, &text, &params)?;

    tracing::info!(
        "Chunked {} chars with '{strategy_key}' into {} chunks",
        text.chars().count(),
        chunks.len()
    );

    Ok(Json(ChunkResponse {
        chunks,
        meta: ChunkMeta {
            strategy: strategy_key,
            size: params.size,
            overlap: params.overlap,
        },
    }))
}

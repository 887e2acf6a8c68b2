use std::time::Duration;

use axum::{
    extract::{multipart::Field, Multipart, State},
    Json,
};

use crate::dto::upload::UploadResponse;
use crate::errors::AppError;
use crate::services::pdf;
use crate::state::AppState;

#[cfg_attr(feature = "openapi", utoipa::path(post, path = "/api/upload", tag = "Chunking", request_body(content = String, content_type = "multipart/form-data", description = "Field `file`: the PDF"), responses((status = 200, body = UploadResponse), (status = 400, body = crate::errors::ErrorResponse))))]
pub async fn upload(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<UploadResponse>, AppError> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("Invalid multipart data: {e}")))?
    {
        if field.name() == Some("file") {
            let text = extract_file(&state, field).await?;
            return Ok(Json(UploadResponse { text }));
        }
    }

    Err(AppError::Validation("No file provided".to_string()))
}

async fn extract_file(state: &AppState, field: Field<'_>) -> Result<String, AppError> {
    let filename = field.file_name().unwrap_or("unnamed.pdf").to_string();
    let content_type = field.content_type().map(str::to_string);

    if !pdf::is_pdf(content_type.as_deref(), Some(&filename)) {
        return Err(AppError::Validation(
            "Only PDF files are supported".to_string(),
        ));
    }

    let data = field
        .bytes()
        .await
        .map_err(|e| AppError::Validation(format!("Failed to read file: {e}")))?;

    if data.len() > state.config.upload.max_file_size_bytes() {
        return Err(AppError::PayloadTooLarge(state.config.upload.max_file_size_mb));
    }

    tracing::info!("Upload '{filename}' ({} bytes)", data.len());

    let timeout = Duration::from_secs(state.config.upload.extraction_timeout_secs);
    pdf::extract_text(data.to_vec(), timeout)
        .await
        .map_err(|e| {
            let msg = format!("{e:#}");
            tracing::warn!("Extraction of '{filename}' failed: {msg}");
            AppError::Extraction(msg)
        })
}

use axum::{extract::State, Json};

use crate::dto::strategy::StrategyCatalog;
use crate::state::AppState;

#[cfg_attr(feature = "openapi", utoipa::path(get, path = "/api/strategies", tag = "Chunking", responses((status = 200, description = "Strategy key -> {name, explanation, params}"))))]
pub async fn list_strategies(State(state): State<AppState>) -> Json<StrategyCatalog> {
    Json(state.strategies.as_ref().clone())
}

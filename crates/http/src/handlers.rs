use std::sync::Arc;

use axum::Json;
use axum::extract::State;
use axum::http::header;
use axum::response::IntoResponse;
use votereg_core::DATA_CACHE_MAX_AGE_SECS;
use votereg_table::DESKTOP_COLUMNS;

use crate::AppState;
use crate::api_error::ApiError;

pub(crate) async fn get_data(
    State(state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, ApiError> {
    let records = state.store.list_records().await?;
    tracing::debug!(rows = records.len(), "serving data");
    let cache_control = format!("public, max-age={DATA_CACHE_MAX_AGE_SECS}");
    Ok(([(header::CACHE_CONTROL, cache_control)], Json(records)))
}

pub(crate) async fn get_columns() -> impl IntoResponse {
    Json(DESKTOP_COLUMNS)
}

pub(crate) async fn health() -> &'static str {
    "ok"
}

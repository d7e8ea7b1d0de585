use axum::{
    extract::{Path, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use std::sync::Arc;

use super::error::ApiError;
use super::AppState;
use crate::batch::run_batch;
use crate::store::IconId;

/// Icons are immutable once stored; clients may cache them for a week.
pub const ICON_CACHE_CONTROL: &str = "public, max-age=604800, immutable";

pub async fn icon_handler(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Response, ApiError> {
    let id: IconId = id.parse().map_err(|_| ApiError::InvalidIconId)?;

    let icon = state
        .store
        .get_icon(id)
        .await
        .map_err(ApiError::IconStore)?
        .ok_or(ApiError::IconNotFound)?;

    let headers = [
        (header::CONTENT_TYPE, icon.mime_type),
        (header::CACHE_CONTROL, ICON_CACHE_CONTROL.to_string()),
        (header::ACCESS_CONTROL_ALLOW_ORIGIN, "*".to_string()),
        (header::ETAG, format!("\"{}\"", icon.sha256)),
    ];

    Ok((StatusCode::OK, headers, icon.data).into_response())
}

pub async fn update_favicons_handler(
    State(state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, ApiError> {
    tracing::info!("icon update triggered over HTTP");
    let _running = match state.batch_guard.try_lock() {
        Ok(guard) => guard,
        Err(_) => {
            tracing::info!("icon batch already running; waiting for it to finish");
            state.batch_guard.lock().await
        }
    };
    let summary = run_batch(&state.store, &state.resolver, &state.batch)
        .await
        .map_err(ApiError::BatchFailed)?;
    Ok(Json(summary))
}

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Invalid icon id")]
    InvalidIconId,

    #[error("Icon not found")]
    IconNotFound,

    #[error("Failed to fetch icon")]
    IconStore(anyhow::Error),

    #[error("Icon update failed")]
    BatchFailed(anyhow::Error),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match self {
            ApiError::InvalidIconId => StatusCode::BAD_REQUEST,
            ApiError::IconNotFound => StatusCode::NOT_FOUND,
            ApiError::IconStore(_) | ApiError::BatchFailed(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        if let ApiError::IconStore(e) | ApiError::BatchFailed(e) = &self {
            tracing::error!("{}: {:#}", self, e);
        }

        let body = match &self {
            ApiError::BatchFailed(e) => json!({ "error": self.to_string(), "details": format!("{e:#}") }),
            _ => json!({ "error": self.to_string() }),
        };

        (status, Json(body)).into_response()
    }
}

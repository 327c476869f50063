//! Error kinds per §7, mapped onto HTTP status codes at this crate's one
//! boundary (the axum handlers in `routes.rs`).

use axum::{Json, http::StatusCode, response::IntoResponse, response::Response};
use serde::Serialize;

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("{0}")]
    InvalidPayload(String),
    #[error("signature does not match maker")]
    SignatureMismatch,
    #[error("{0}")]
    Conflict(String),
    #[error("not found")]
    NotFound,
    #[error("upstream unavailable: {0}")]
    UpstreamUnavailable(String),
    #[error("internal error")]
    Internal(#[from] anyhow::Error),
}

#[derive(Serialize)]
struct ErrorBody {
    error: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self {
            ApiError::InvalidPayload(_) => StatusCode::BAD_REQUEST,
            ApiError::SignatureMismatch => StatusCode::UNAUTHORIZED,
            ApiError::Conflict(_) => StatusCode::CONFLICT,
            ApiError::NotFound => StatusCode::NOT_FOUND,
            ApiError::UpstreamUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        if matches!(status, StatusCode::INTERNAL_SERVER_ERROR) {
            tracing::error!(error = %self, "internal error serving request");
        }
        (
            status,
            Json(ErrorBody {
                error: self.to_string(),
            }),
        )
            .into_response()
    }
}

impl From<database::Error> for ApiError {
    fn from(err: database::Error) -> Self {
        match err {
            database::Error::Conflict(msg) => ApiError::Conflict(msg),
            database::Error::NotFound => ApiError::NotFound,
            database::Error::IllegalTransition { from, to } => {
                ApiError::InvalidPayload(format!("illegal transition {from} -> {to}"))
            }
            database::Error::Sqlx(err) => ApiError::UpstreamUnavailable(err.to_string()),
        }
    }
}

impl From<cache::Error> for ApiError {
    fn from(err: cache::Error) -> Self {
        ApiError::UpstreamUnavailable(err.to_string())
    }
}

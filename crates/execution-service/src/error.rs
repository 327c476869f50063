use axum::{Json, http::StatusCode, response::IntoResponse, response::Response};
use serde::Serialize;

/// §7: submission errors (network, auth, nonce-too-low) are surfaced to the
/// caller so C4 can skip this pair this tick.
#[derive(Debug, thiserror::Error)]
pub enum ExecutionError {
    #[error("{0}")]
    InvalidPayload(String),
    #[error("submission failed: {0}")]
    SubmissionFailed(String),
}

#[derive(Serialize)]
struct ErrorBody {
    error: String,
}

impl IntoResponse for ExecutionError {
    fn into_response(self) -> Response {
        let status = match &self {
            ExecutionError::InvalidPayload(_) => StatusCode::BAD_REQUEST,
            ExecutionError::SubmissionFailed(_) => StatusCode::SERVICE_UNAVAILABLE,
        };
        (
            status,
            Json(ErrorBody {
                error: self.to_string(),
            }),
        )
            .into_response()
    }
}

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use crate::models::GenericResponse;

/// Errors surfaced by the HTTP layer.
///
/// `BadRequestErr` and `NotFound` carry business-rule outcomes the caller can
/// act on (retry, request a new code). `AnyError` wraps store and other
/// infrastructure failures, which are safe to retry as-is.
#[derive(Debug)]
pub enum AppError {
    BadRequestErr(String),
    NotFound(String),
    AnyError(anyhow::Error),
}

impl AppError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::BadRequestErr(_) => StatusCode::BAD_REQUEST,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::AnyError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl<E: Into<anyhow::Error>> From<E> for AppError {
    fn from(err: E) -> Self {
        Self::AnyError(err.into())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let message = match self {
            Self::BadRequestErr(msg) => {
                tracing::debug!("Bad request: {}", msg);
                msg
            }
            Self::NotFound(msg) => {
                tracing::debug!("Not Found: {}", msg);
                msg
            }
            Self::AnyError(err) => {
                tracing::error!("Something went wrong: {:?}", err);
                format!("Something went wrong: {err}")
            }
        };
        let response = GenericResponse {
            success: false,
            message,
        };
        (status, Json(response)).into_response()
    }
}

/*
 * Responsibility
 * - AppError shared by handlers and the authorization gate
 * - IntoResponse (HTTP status / JSON error body)
 * - RepoError / TokenError are converted here in one place
 */
use axum::{
    Json,
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;

use crate::repos::error::RepoError;
use crate::services::auth::TokenError;

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: ErrorBody,
}

#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub code: &'static str,
    pub message: String,
}

/// Body used by the authorization gate (401/403).
#[derive(Debug, Serialize)]
pub struct GuardErrorResponse {
    pub error: bool,
    pub message: &'static str,
}

#[derive(Debug, Error)]
pub enum AppError {
    #[error("{code}: {message}")]
    BadRequest { code: &'static str, message: String },
    #[error("unauthorized access")]
    Unauthenticated,
    #[error("forbidden access")]
    Forbidden,
    #[error("internal server error")]
    Internal,
}

impl AppError {
    pub fn bad_request(code: &'static str, message: impl Into<String>) -> Self {
        Self::BadRequest {
            code,
            message: message.into(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match self {
            AppError::Unauthenticated => {
                return guard_response(StatusCode::UNAUTHORIZED, "unauthorized access");
            }
            AppError::Forbidden => {
                return guard_response(StatusCode::FORBIDDEN, "forbidden access");
            }
            AppError::BadRequest { code, message } => (StatusCode::BAD_REQUEST, code, message),
            AppError::Internal => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "INTERNAL_SERVER_ERROR",
                "internal server error".into(),
            ),
        };

        let body = ErrorResponse {
            error: ErrorBody { code, message },
        };

        (status, Json(body)).into_response()
    }
}

fn guard_response(status: StatusCode, message: &'static str) -> Response {
    (
        status,
        Json(GuardErrorResponse {
            error: true,
            message,
        }),
    )
        .into_response()
}

impl From<RepoError> for AppError {
    fn from(e: RepoError) -> Self {
        tracing::error!(error = %e, "document store operation failed");
        AppError::Internal
    }
}

// Malformed or mistyped request bodies answer 400 instead of axum's 422 text.
impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::bad_request("INVALID_BODY", rejection.body_text())
    }
}

impl From<TokenError> for AppError {
    fn from(e: TokenError) -> Self {
        match e {
            TokenError::Unauthenticated(_) => AppError::Unauthenticated,
            TokenError::Signing(err) => {
                tracing::error!(error = %err, "failed to sign access token");
                AppError::Internal
            }
        }
    }
}

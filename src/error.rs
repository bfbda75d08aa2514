//! Gateway error taxonomy and the client-visible error contract.
//!
//! Every failure path renders as `{"message": "..."}` with a single status
//! code. Upstream 4xx/5xx responses pass through with their original status
//! and message; everything else maps to the status of the failing component.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;

/// Wire shape of every error response.
#[derive(Serialize)]
struct ErrorBody {
    message: String,
}

#[derive(Debug, Error)]
pub enum AppError {
    // ── Header gate ─────────────────────────────────────────────────────────
    #[error("Missing X-Client-Type header")]
    MissingClientType,
    #[error("Invalid X-Client-Type header: {0}. Must be one of: Web, iOS, Android")]
    InvalidClientType(String),
    #[error("Missing Authorization header")]
    MissingAuth,

    // ── Token validator ─────────────────────────────────────────────────────
    #[error("Invalid authorization header format")]
    InvalidAuthFormat,
    #[error("Invalid token")]
    InvalidToken,
    #[error("Missing subject claim")]
    MissingSubject,
    #[error("Invalid subject in token")]
    InvalidSubject,
    #[error("Missing issuer claim")]
    MissingIssuer,
    #[error("Invalid issuer")]
    InvalidIssuer,
    #[error("Missing expiration claim")]
    MissingExpiration,
    #[error("Token has expired")]
    TokenExpired,

    // ── Payload validation ──────────────────────────────────────────────────
    #[error("{0}")]
    Validation(String),

    // ── Upstream ────────────────────────────────────────────────────────────
    /// Terminal upstream response (4xx/5xx) passed through unchanged.
    #[error("{message}")]
    Upstream { status: StatusCode, message: String },
    #[error("{0}")]
    BadGateway(String),
    #[error("{0}")]
    GatewayTimeout(String),

    // ── Last resort ─────────────────────────────────────────────────────────
    #[error("{0}")]
    Internal(String),
}

impl AppError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }

    /// Status code this error renders with.
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::MissingClientType
            | AppError::InvalidClientType(_)
            | AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::MissingAuth
            | AppError::InvalidAuthFormat
            | AppError::InvalidToken
            | AppError::MissingSubject
            | AppError::InvalidSubject
            | AppError::MissingIssuer
            | AppError::InvalidIssuer
            | AppError::MissingExpiration
            | AppError::TokenExpired => StatusCode::UNAUTHORIZED,
            AppError::Upstream { status, .. } => *status,
            AppError::BadGateway(_) => StatusCode::BAD_GATEWAY,
            AppError::GatewayTimeout(_) => StatusCode::GATEWAY_TIMEOUT,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = ErrorBody {
            message: self.to_string(),
        };
        (status, Json(body)).into_response()
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(e: validator::ValidationErrors) -> Self {
        AppError::Validation(e.to_string())
    }
}

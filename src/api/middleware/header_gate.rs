//! Header gate: fails fast before any route logic runs.
//!
//! Checks, in order:
//!
//! 1. `X-Client-Type` present → else 400 `Missing X-Client-Type header`
//! 2. `X-Client-Type` is one of web/ios/android (case-insensitive) → else 400
//! 3. `Authorization` present → else 401 `Missing Authorization header`
//!
//! `/status` is routed outside this gate and never reaches it. Claim-level
//! token checks belong to [`crate::api::middleware::auth`], which runs after
//! this gate.

use axum::{extract::Request, http::header, middleware::Next, response::Response};

use crate::api::client_type::{CLIENT_TYPE_HEADER, ClientType};
use crate::error::AppError;

pub async fn layer(req: Request, next: Next) -> Result<Response, AppError> {
    let headers = req.headers();

    let Some(raw) = headers.get(CLIENT_TYPE_HEADER) else {
        return Err(AppError::MissingClientType);
    };

    let value = String::from_utf8_lossy(raw.as_bytes());
    if ClientType::parse(&value).is_none() {
        return Err(AppError::InvalidClientType(value.into_owned()));
    }

    if headers.get(header::AUTHORIZATION).is_none() {
        return Err(AppError::MissingAuth);
    }

    Ok(next.run(req).await)
}

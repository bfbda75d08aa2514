//! Bearer token validation middleware.
//!
//! Runs after the header gate, so the `Authorization` header is normally
//! present by the time this executes. Delegates the actual claim checks to
//! [`crate::auth::validate_bearer_header`].

use axum::{extract::Request, http::header, middleware::Next, response::Response};

use crate::auth::validate_bearer_header;
use crate::error::AppError;

pub async fn layer(req: Request, next: Next) -> Result<Response, AppError> {
    let authorization = req
        .headers()
        .get(header::AUTHORIZATION)
        .ok_or(AppError::MissingAuth)?;

    let value = authorization
        .to_str()
        .map_err(|_| AppError::InvalidAuthFormat)?;

    validate_bearer_header(value)?;

    Ok(next.run(req).await)
}

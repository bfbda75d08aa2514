//! HTTP request handlers for gateway endpoints.
//!
//! Each handler module corresponds to a logical grouping of endpoints.

pub mod books;
pub mod customers;
pub mod status;

pub use books::{add_book_handler, get_book_handler, update_book_handler};
pub use customers::{add_customer_handler, get_customer_by_user_id_handler, get_customer_handler};
pub use status::status_handler;

use axum::http::{HeaderMap, header};
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::AppError;

/// The `Authorization` header value to carry upstream, if present.
///
/// Gateway mode guarantees presence via the header gate; in internal mode the
/// forwarded request simply goes out without it.
pub(crate) fn forwarded_authorization(headers: &HeaderMap) -> Option<String> {
    headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string)
}

/// Deserializes a request body into a typed payload.
///
/// Going through `Value` keeps deserialization failures inside the gateway's
/// `{"message": ...}` error contract instead of axum's default rejection.
pub(crate) fn parse_payload<T: DeserializeOwned>(body: Value) -> Result<T, AppError> {
    serde_json::from_value(body).map_err(|e| AppError::Validation(e.to_string()))
}

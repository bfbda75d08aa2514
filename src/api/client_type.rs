//! Declared client type carried on every gateway request.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;

use crate::error::AppError;

/// Header the client declares itself with.
pub const CLIENT_TYPE_HEADER: &str = "X-Client-Type";

/// Client platform declared via `X-Client-Type`.
///
/// Drives response shaping: mobile clients receive reduced customer objects
/// and the numeric non-fiction genre. Not persisted anywhere.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClientType {
    Web,
    Ios,
    Android,
}

impl ClientType {
    /// Case-insensitive parse of a header value.
    pub fn parse(value: &str) -> Option<Self> {
        match value.to_ascii_lowercase().as_str() {
            "web" => Some(Self::Web),
            "ios" => Some(Self::Ios),
            "android" => Some(Self::Android),
            _ => None,
        }
    }

    pub fn is_mobile(self) -> bool {
        matches!(self, Self::Ios | Self::Android)
    }
}

impl<S> FromRequestParts<S> for ClientType
where
    S: Send + Sync,
{
    type Rejection = AppError;

    /// Extracts the client type from the `X-Client-Type` header.
    ///
    /// An absent header yields [`ClientType::Web`] (full, unshaped responses).
    /// In gateway mode the header gate has already rejected that case before
    /// any handler runs; the default is only reachable in internal mode.
    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let Some(raw) = parts.headers.get(CLIENT_TYPE_HEADER) else {
            return Ok(Self::Web);
        };

        let value = String::from_utf8_lossy(raw.as_bytes());
        Self::parse(&value).ok_or_else(|| AppError::InvalidClientType(value.into_owned()))
    }
}

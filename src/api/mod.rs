//! Inbound HTTP layer: DTOs, handlers, and middleware.
//!
//! # Modules
//!
//! - [`client_type`] - the declared client platform and its extractor
//! - [`dto`] - typed request payloads with validation
//! - [`handlers`] - HTTP request handlers
//! - [`json`] - JSON body extractor with contract-shaped rejections
//! - [`middleware`] - header gate, token validation, and tracing

pub mod client_type;
pub mod dto;
pub mod handlers;
pub mod json;
pub mod middleware;

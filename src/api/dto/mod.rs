//! Typed request payloads for the gateway surface.
//!
//! All DTOs use Serde for JSON serialization/deserialization and validator
//! for input validation. Validation happens in the gateway before anything
//! is forwarded upstream.

pub mod book;
pub mod customer;

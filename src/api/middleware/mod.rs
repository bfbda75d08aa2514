//! HTTP middleware for request gating and observability.
//!
//! `header_gate` and `auth` are installed only in gateway mode; `tracing`
//! wraps the whole router in both modes.

pub mod auth;
pub mod header_gate;
pub mod tracing;

//! Outbound side of the gateway: retry policy and HTTP forwarder.
//!
//! Handlers depend on the [`UpstreamClient`] trait; [`HttpForwarder`] is the
//! production implementation. Test mocks are available with `cfg(test)`.

pub mod forwarder;
pub mod retry;

pub use forwarder::{ForwardRequest, ForwardedResponse, HttpForwarder, UpstreamClient};
pub use retry::RetryPolicy;

#[cfg(test)]
pub use forwarder::MockUpstreamClient;

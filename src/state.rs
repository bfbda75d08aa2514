//! Shared application state injected into all handlers.

use std::sync::Arc;

use crate::config::Config;
use crate::upstream::UpstreamClient;

#[derive(Clone)]
pub struct AppState {
    /// Outbound client to the upstream Books/Customers service.
    pub upstream: Arc<dyn UpstreamClient>,
    /// Immutable configuration, built once at process start.
    pub config: Arc<Config>,
}

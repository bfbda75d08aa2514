//! # Bookstore Gateway
//!
//! A backend-for-frontend (BFF) gateway in front of the upstream
//! Books/Customers service.
//!
//! ## Architecture
//!
//! Requests flow through a fixed pipeline:
//!
//! 1. **Header Gate** ([`api::middleware::header_gate`]) - client-type and
//!    authorization headers checked before any route logic
//! 2. **Token Validator** ([`auth`]) - structural bearer-token claim checks,
//!    no signature verification
//! 3. **Gateway Router** ([`routes`], [`api::handlers`]) - payload validation
//!    and route logic
//! 4. **Upstream Forwarder** ([`upstream`]) - bounded retries, distinct
//!    connect/request timeouts, status passthrough
//! 5. **Response Shaper** ([`shaping`]) - per-client-type payload shaping
//!
//! The gateway holds no state of its own; the upstream service owns
//! persistence and consistency.
//!
//! ## Quick Start
//!
//! ```bash
//! export BOOKS_SERVICE_URL="http://book-service:3000"
//! export DEPLOYMENT_MODE="gateway"
//!
//! cargo run
//! ```
//!
//! ## Configuration
//!
//! Loaded once from environment variables via [`config::Config`]. See the
//! [`config`] module for available options.

pub mod api;
pub mod auth;
pub mod error;
pub mod shaping;
pub mod state;
pub mod upstream;

pub mod config;
pub mod server;

pub mod routes;

pub use error::AppError;
pub use state::AppState;

/// Commonly used types for external consumers.
///
/// Re-exports frequently used types to simplify imports for library users
/// and integration tests.
pub mod prelude {
    pub use crate::api::client_type::ClientType;
    pub use crate::config::{Config, DeploymentMode};
    pub use crate::error::AppError;
    pub use crate::state::AppState;
    pub use crate::upstream::{ForwardRequest, ForwardedResponse, HttpForwarder, UpstreamClient};
}

//! Gateway configuration loaded from environment variables.
//!
//! Configuration is loaded once at startup and validated before the server
//! starts. Handlers and the forwarder receive it through [`crate::AppState`];
//! nothing reads the environment after boot.
//!
//! ## Required Variables
//!
//! None; every variable has a default suitable for local development.
//!
//! ## Optional Variables
//!
//! - `BOOKS_SERVICE_URL` - Base URL of the upstream books service
//!   (default: `http://localhost:3000`)
//! - `CUSTOMERS_SERVICE_URL` - Base URL of the upstream customers service
//!   (default: same as `BOOKS_SERVICE_URL`)
//! - `LISTEN` - Bind address (default: `0.0.0.0:8080`)
//! - `DEPLOYMENT_MODE` - `gateway` or `internal` (default: `gateway`).
//!   Gateway mode enforces the X-Client-Type / Authorization gate on every
//!   route except `/status`; internal mode serves the same routes ungated.
//! - `REQUEST_TIMEOUT_SECS` - Overall upstream request timeout (default: 30)
//! - `CONNECT_TIMEOUT_SECS` - Upstream connect timeout (default: 10)
//! - `MAX_RETRIES` - Upstream attempts per request (default: 3)
//! - `RETRY_DELAY_MS` - Delay between retry attempts (default: 1000)
//! - `RUST_LOG` - Log level (default: `info`)
//! - `LOG_FORMAT` - Log format: `text` or `json` (default: `text`)

use anyhow::{Context, Result};
use std::env;
use std::time::Duration;

/// Where this process sits in the deployment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeploymentMode {
    /// Public-facing gateway: header gate and token validation enabled.
    Gateway,
    /// Behind the gateway: same routes, no header enforcement.
    Internal,
}

impl DeploymentMode {
    fn parse(value: &str) -> Option<Self> {
        match value.to_ascii_lowercase().as_str() {
            "gateway" => Some(Self::Gateway),
            "internal" => Some(Self::Internal),
            _ => None,
        }
    }
}

/// Service configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// Base URL of the upstream books service.
    pub books_service_url: String,
    /// Base URL of the upstream customers service.
    pub customers_service_url: String,
    pub listen_addr: String,
    pub mode: DeploymentMode,
    /// Overall per-attempt request timeout.
    pub request_timeout: Duration,
    /// Connection-establishment timeout, separate from the request timeout.
    pub connect_timeout: Duration,
    /// Upstream attempts per forwarded request (first try included).
    pub max_retries: usize,
    /// Fixed delay between retry attempts.
    pub retry_delay: Duration,
    pub log_level: String,
    pub log_format: String,
}

impl Config {
    /// Loads configuration from environment variables.
    pub fn from_env() -> Result<Self> {
        let books_service_url = env::var("BOOKS_SERVICE_URL")
            .unwrap_or_else(|_| "http://localhost:3000".to_string());

        // Both entities live behind the same service by default.
        let customers_service_url =
            env::var("CUSTOMERS_SERVICE_URL").unwrap_or_else(|_| books_service_url.clone());

        let listen_addr = env::var("LISTEN").unwrap_or_else(|_| "0.0.0.0:8080".to_string());

        let mode_raw = env::var("DEPLOYMENT_MODE").unwrap_or_else(|_| "gateway".to_string());
        let mode = DeploymentMode::parse(&mode_raw)
            .with_context(|| format!("DEPLOYMENT_MODE must be 'gateway' or 'internal', got '{mode_raw}'"))?;

        let request_timeout_secs = env::var("REQUEST_TIMEOUT_SECS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(30);

        let connect_timeout_secs = env::var("CONNECT_TIMEOUT_SECS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(10);

        let max_retries = env::var("MAX_RETRIES")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(3);

        let retry_delay_ms = env::var("RETRY_DELAY_MS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(1000);

        let log_level = env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string());
        let log_format = env::var("LOG_FORMAT").unwrap_or_else(|_| "text".to_string());

        Ok(Self {
            books_service_url,
            customers_service_url,
            listen_addr,
            mode,
            request_timeout: Duration::from_secs(request_timeout_secs),
            connect_timeout: Duration::from_secs(connect_timeout_secs),
            max_retries,
            retry_delay: Duration::from_millis(retry_delay_ms),
            log_level,
            log_format,
        })
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - an upstream URL is not a valid http(s) URL
    /// - `listen_addr` is not in `host:port` form
    /// - `max_retries` is zero
    /// - a timeout is zero
    /// - `log_format` is not `text` or `json`
    pub fn validate(&self) -> Result<()> {
        for (name, value) in [
            ("BOOKS_SERVICE_URL", &self.books_service_url),
            ("CUSTOMERS_SERVICE_URL", &self.customers_service_url),
        ] {
            let parsed = url::Url::parse(value)
                .with_context(|| format!("{name} is not a valid URL: '{value}'"))?;
            if parsed.scheme() != "http" && parsed.scheme() != "https" {
                anyhow::bail!("{name} must be an http(s) URL, got '{value}'");
            }
        }

        if !self.listen_addr.contains(':') {
            anyhow::bail!("LISTEN must be in format 'host:port', got '{}'", self.listen_addr);
        }

        if self.max_retries == 0 {
            anyhow::bail!("MAX_RETRIES must be at least 1");
        }

        if self.max_retries > 10 {
            anyhow::bail!("MAX_RETRIES is too large (max: 10), got {}", self.max_retries);
        }

        if self.request_timeout.is_zero() {
            anyhow::bail!("REQUEST_TIMEOUT_SECS must be greater than 0");
        }

        if self.connect_timeout.is_zero() {
            anyhow::bail!("CONNECT_TIMEOUT_SECS must be greater than 0");
        }

        if self.log_format != "text" && self.log_format != "json" {
            anyhow::bail!("LOG_FORMAT must be 'text' or 'json', got '{}'", self.log_format);
        }

        Ok(())
    }

    /// Prints configuration summary.
    pub fn print_summary(&self) {
        tracing::info!("Configuration loaded:");
        tracing::info!("  Listen address: {}", self.listen_addr);
        tracing::info!("  Deployment mode: {:?}", self.mode);
        tracing::info!("  Books service: {}", self.books_service_url);
        tracing::info!("  Customers service: {}", self.customers_service_url);
        tracing::info!(
            "  Upstream timeouts: connect {:?}, request {:?}",
            self.connect_timeout,
            self.request_timeout
        );
        tracing::info!(
            "  Retry policy: {} attempts, {:?} delay",
            self.max_retries,
            self.retry_delay
        );
        tracing::info!("  Log level: {}", self.log_level);
        tracing::info!("  Log format: {}", self.log_format);
    }
}

/// Loads and validates configuration from environment variables.
///
/// # Errors
///
/// Returns an error if a variable is malformed or validation fails.
///
/// # Note
///
/// This function expects environment variables to be already loaded
/// (e.g., via `dotenvy::dotenv()` in `main.rs`).
pub fn load_from_env() -> Result<Config> {
    let config = Config::from_env()?;
    config.validate()?;
    Ok(config)
}

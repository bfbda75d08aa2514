//! HTTP forwarder for the upstream Books/Customers service.
//!
//! One attempt per retry slot, bounded by [`RetryPolicy`]. Transient failures
//! (timeout, connection error) are retried with a fixed delay; any HTTP
//! response from upstream is terminal and passed through with its own status.

use async_trait::async_trait;
use axum::http::StatusCode;
use reqwest::{Client, Method, header};
use serde_json::Value;

use crate::config::Config;
use crate::error::AppError;
use crate::upstream::retry::RetryPolicy;

/// A request to be forwarded upstream.
///
/// Only the `Authorization` header is carried onward; gateway-only headers
/// (`X-Client-Type`) never leave the gateway.
#[derive(Debug, Clone)]
pub struct ForwardRequest {
    pub method: Method,
    pub url: String,
    pub authorization: Option<String>,
    pub body: Option<Value>,
    pub query: Vec<(String, String)>,
}

impl ForwardRequest {
    pub fn get(url: impl Into<String>) -> Self {
        Self::new(Method::GET, url)
    }

    pub fn post(url: impl Into<String>, body: Value) -> Self {
        let mut req = Self::new(Method::POST, url);
        req.body = Some(body);
        req
    }

    pub fn put(url: impl Into<String>, body: Value) -> Self {
        let mut req = Self::new(Method::PUT, url);
        req.body = Some(body);
        req
    }

    fn new(method: Method, url: impl Into<String>) -> Self {
        Self {
            method,
            url: url.into(),
            authorization: None,
            body: None,
            query: Vec::new(),
        }
    }

    pub fn with_authorization(mut self, authorization: impl Into<String>) -> Self {
        self.authorization = Some(authorization.into());
        self
    }

    pub fn with_query(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.push((key.into(), value.into()));
        self
    }
}

/// Successful upstream response: status plus parsed JSON body.
#[derive(Debug, Clone)]
pub struct ForwardedResponse {
    pub status: StatusCode,
    pub body: Value,
}

/// Outbound seam the handlers depend on.
///
/// # Implementations
///
/// - [`HttpForwarder`] - production reqwest-backed forwarder
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UpstreamClient: Send + Sync {
    /// Forwards a request upstream, retrying transient failures.
    ///
    /// # Errors
    ///
    /// - [`AppError::Upstream`] - upstream answered with 4xx/5xx; status and
    ///   message pass through unchanged, never retried
    /// - [`AppError::BadGateway`] - non-JSON success body, exhausted
    ///   connection failures, or any other exhausted transient cause
    /// - [`AppError::GatewayTimeout`] - retries exhausted on a pure timeout
    async fn forward(&self, request: ForwardRequest) -> Result<ForwardedResponse, AppError>;
}

/// Outcome of a single attempt.
enum AttemptError {
    /// Propagate immediately, no retry.
    Terminal(AppError),
    /// Timeout or network failure; eligible for retry.
    Transient(reqwest::Error),
}

/// Reqwest-backed forwarder with a shared connection pool.
///
/// The pool is safe for concurrent reuse across requests; each inbound request
/// runs its own sequential retry loop.
pub struct HttpForwarder {
    client: Client,
    policy: RetryPolicy,
}

impl HttpForwarder {
    /// Builds the forwarder from gateway configuration.
    ///
    /// The connect timeout and the overall request timeout are configured
    /// separately on the client, matching the upstream contract.
    pub fn new(config: &Config) -> anyhow::Result<Self> {
        let client = Client::builder()
            .connect_timeout(config.connect_timeout)
            .timeout(config.request_timeout)
            .build()?;

        Ok(Self {
            client,
            policy: RetryPolicy::new(config.max_retries, config.retry_delay),
        })
    }

    async fn attempt(&self, request: &ForwardRequest) -> Result<ForwardedResponse, AttemptError> {
        let mut builder = self.client.request(request.method.clone(), &request.url);

        if let Some(authorization) = &request.authorization {
            builder = builder.header(header::AUTHORIZATION, authorization);
        }
        if !request.query.is_empty() {
            builder = builder.query(&request.query);
        }
        if let Some(body) = &request.body {
            builder = builder.json(body);
        }

        let response = builder.send().await.map_err(AttemptError::Transient)?;
        let status = response.status();
        let raw = response.bytes().await.map_err(AttemptError::Transient)?;

        // Any HTTP error from upstream is terminal: surface the same status
        // with the body's message field, never retry.
        if status.is_client_error() || status.is_server_error() {
            return Err(AttemptError::Terminal(AppError::Upstream {
                status,
                message: extract_message(&raw),
            }));
        }

        let body = serde_json::from_slice(&raw).map_err(|_| {
            AttemptError::Terminal(AppError::BadGateway(
                "Invalid response from backend service".to_string(),
            ))
        })?;

        Ok(ForwardedResponse { status, body })
    }
}

#[async_trait]
impl UpstreamClient for HttpForwarder {
    async fn forward(&self, request: ForwardRequest) -> Result<ForwardedResponse, AppError> {
        let max_attempts = self.policy.max_attempts();
        let mut delays = self.policy.delays();
        let mut attempt = 1;

        loop {
            tracing::info!(
                method = %request.method,
                url = %request.url,
                attempt,
                max_attempts,
                "Forwarding request to upstream"
            );
            metrics::counter!("gateway_upstream_attempts_total").increment(1);

            match self.attempt(&request).await {
                Ok(response) => {
                    tracing::info!(
                        status = %response.status,
                        url = %request.url,
                        attempt,
                        "Upstream responded"
                    );
                    return Ok(response);
                }
                Err(AttemptError::Terminal(err)) => {
                    tracing::info!(
                        status = %err.status_code(),
                        url = %request.url,
                        "Passing through upstream error response"
                    );
                    return Err(err);
                }
                Err(AttemptError::Transient(err)) => {
                    tracing::warn!(
                        error = %err,
                        url = %request.url,
                        attempt,
                        "Transient upstream failure"
                    );
                    metrics::counter!("gateway_upstream_failures_total").increment(1);

                    match delays.next() {
                        Some(delay) => {
                            tokio::time::sleep(delay).await;
                            attempt += 1;
                        }
                        None => return Err(classify_exhausted(err)),
                    }
                }
            }
        }
    }
}

/// Maps the last transient error after exhausted retries to a gateway error.
fn classify_exhausted(last: reqwest::Error) -> AppError {
    if last.is_timeout() {
        AppError::GatewayTimeout("Backend service timed out after multiple retries".to_string())
    } else if last.is_connect() {
        AppError::BadGateway("Unable to connect to backend service after multiple retries".to_string())
    } else {
        AppError::BadGateway(format!("Error communicating with backend service: {last}"))
    }
}

/// Pulls a human-readable message out of an upstream error body.
///
/// Prefers the JSON `message` field; falls back to the raw body text.
fn extract_message(raw: &[u8]) -> String {
    match serde_json::from_slice::<Value>(raw) {
        Ok(body) => body
            .get("message")
            .and_then(Value::as_str)
            .map(str::to_string)
            .unwrap_or_else(|| body.to_string()),
        Err(_) => String::from_utf8_lossy(raw).into_owned(),
    }
}

//! Health check handler.

/// Fixed health check for load balancers.
///
/// # Endpoint
///
/// `GET /status`
///
/// Bypasses the header gate and token validation entirely; always answers
/// plain `OK` with no side effects.
pub async fn status_handler() -> &'static str {
    "OK"
}

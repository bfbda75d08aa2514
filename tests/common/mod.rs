#![allow(dead_code)]

use std::net::SocketAddr;
use std::sync::Arc;
use std::sync::atomic::AtomicUsize;
use std::time::Duration;

use axum::Router;
use axum_test::TestServer;
use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use chrono::Utc;
use serde_json::json;

use bookstore_gateway::config::{Config, DeploymentMode};
use bookstore_gateway::routes::app_router;
use bookstore_gateway::state::AppState;
use bookstore_gateway::upstream::HttpForwarder;

/// Gateway configuration pointed at a test upstream.
///
/// Timeouts and retry delays are shortened so retry-exhaustion tests finish
/// quickly; three attempts at these settings stay well under a second.
pub fn gateway_config(upstream_url: &str) -> Config {
    Config {
        books_service_url: upstream_url.to_string(),
        customers_service_url: upstream_url.to_string(),
        listen_addr: "127.0.0.1:0".to_string(),
        mode: DeploymentMode::Gateway,
        request_timeout: Duration::from_millis(200),
        connect_timeout: Duration::from_millis(100),
        max_retries: 3,
        retry_delay: Duration::from_millis(50),
        log_level: "info".to_string(),
        log_format: "text".to_string(),
    }
}

/// Builds a test server running the full gateway router against `config`.
pub fn make_gateway(config: Config) -> TestServer {
    let forwarder = HttpForwarder::new(&config).unwrap();
    let state = AppState {
        upstream: Arc::new(forwarder),
        config: Arc::new(config),
    };
    TestServer::new(app_router(state)).unwrap()
}

/// Spawns an in-process upstream on an ephemeral port and returns its base URL.
pub async fn spawn_upstream(router: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .unwrap();
    let addr: SocketAddr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://{addr}")
}

/// Shared per-test counter for upstream hit assertions.
pub fn hit_counter() -> Arc<AtomicUsize> {
    Arc::new(AtomicUsize::new(0))
}

// ─── Tokens ──────────────────────────────────────────────────────────────────

/// Builds an unsigned JWT `Authorization` value from explicit claims.
pub fn bearer_with_claims(claims: serde_json::Value) -> String {
    let header = URL_SAFE_NO_PAD.encode(br#"{"alg":"none","typ":"JWT"}"#);
    let payload = URL_SAFE_NO_PAD.encode(claims.to_string().as_bytes());
    format!("Bearer {header}.{payload}.")
}

/// A token that passes every check.
pub fn valid_bearer() -> String {
    bearer_with_claims(json!({
        "sub": "starlord",
        "iss": "cmu.edu",
        "exp": Utc::now().timestamp() + 3600
    }))
}

/// A token whose `exp` claim is in the past; everything else valid.
pub fn expired_bearer() -> String {
    bearer_with_claims(json!({
        "sub": "starlord",
        "iss": "cmu.edu",
        "exp": Utc::now().timestamp() - 60
    }))
}

// ─── Fixtures ────────────────────────────────────────────────────────────────

pub fn book_json(isbn: &str) -> serde_json::Value {
    json!({
        "ISBN": isbn,
        "title": "Software Architecture in Practice",
        "author": "Bass, L.",
        "description": "seminal book on software architecture",
        "genre": "non-fiction",
        "price": 59.95,
        "quantity": 106
    })
}

pub fn customer_json() -> serde_json::Value {
    json!({
        "userId": "starlord2002@gmail.com",
        "name": "Star Lord",
        "phone": "+14122144122",
        "address": "48 Galaxy Rd",
        "address2": "suite 4",
        "city": "Fargo",
        "state": "ND",
        "zipcode": "58102"
    })
}

/// What the upstream returns for a stored customer (id assigned).
pub fn customer_record() -> serde_json::Value {
    let mut record = customer_json();
    record["id"] = json!(42);
    record
}

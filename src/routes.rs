//! Router configuration.
//!
//! # Route Structure
//!
//! - `GET  /status`              - Health check (always public)
//! - `POST /books`               - Create a book
//! - `PUT  /books/{isbn}`        - Replace a book
//! - `GET  /books/{isbn}`        - Read a book (shaped per client type)
//! - `GET  /books/isbn/{isbn}`   - Alias for the book read
//! - `POST /customers`           - Register a customer (shaped per client type)
//! - `GET  /customers/{id}`      - Read a customer by id (shaped)
//! - `GET  /customers?userId=`   - Read a customer by email (shaped)
//!
//! In gateway mode every route except `/status` sits behind the header gate
//! and the token validator; internal mode serves the same routes ungated.

use axum::routing::{get, post};
use axum::{Router, middleware};

use crate::api::handlers::{
    add_book_handler, add_customer_handler, get_book_handler, get_customer_by_user_id_handler,
    get_customer_handler, status_handler, update_book_handler,
};
use crate::api::middleware::{auth, header_gate, tracing};
use crate::config::DeploymentMode;
use crate::state::AppState;

/// Constructs the application router with all routes and middleware.
///
/// The header gate runs before the token validator; both are installed as
/// route layers so they only fire for matched routes and never for `/status`.
pub fn app_router(state: AppState) -> Router {
    let gated = Router::new()
        .route("/books", post(add_book_handler))
        .route(
            "/books/{isbn}",
            get(get_book_handler).put(update_book_handler),
        )
        .route("/books/isbn/{isbn}", get(get_book_handler))
        .route(
            "/customers",
            post(add_customer_handler).get(get_customer_by_user_id_handler),
        )
        .route("/customers/{id}", get(get_customer_handler));

    let gated = match state.config.mode {
        // Later-added layers run first: header gate, then token validation.
        DeploymentMode::Gateway => gated
            .route_layer(middleware::from_fn(auth::layer))
            .route_layer(middleware::from_fn(header_gate::layer)),
        DeploymentMode::Internal => gated,
    };

    Router::new()
        .route("/status", get(status_handler))
        .merge(gated)
        .with_state(state)
        .layer(tracing::layer())
}

//! Handlers for book endpoints (create, update, read).

use axum::{
    Json,
    extract::{Path, State},
    http::{HeaderMap, StatusCode, header},
    response::{IntoResponse, Response},
};
use serde_json::Value;
use validator::Validate;

use crate::api::client_type::ClientType;
use crate::api::dto::book::BookPayload;
use crate::api::handlers::{forwarded_authorization, parse_payload};
use crate::api::json::JsonBody;
use crate::error::AppError;
use crate::shaping::shape_book;
use crate::state::AppState;
use crate::upstream::ForwardRequest;

/// Creates a book.
///
/// # Endpoint
///
/// `POST /books`
///
/// # Behavior
///
/// Validates the payload (ISBN length, positive 2-decimal price, non-negative
/// quantity), forwards the create, and on upstream 201 adds a
/// `Location: /books/{ISBN}` header. The created record is returned exactly
/// as upstream produced it; book responses are only shaped on reads.
///
/// # Errors
///
/// - 400 on payload validation failure, before any upstream call
/// - 422 passthrough when upstream reports a duplicate ISBN
pub async fn add_book_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    JsonBody(body): JsonBody<Value>,
) -> Result<Response, AppError> {
    let payload: BookPayload = parse_payload(body)?;
    payload.validate()?;

    let url = format!("{}/books", state.config.books_service_url);
    let mut request = ForwardRequest::post(url, payload_value(&payload)?);
    if let Some(authorization) = forwarded_authorization(&headers) {
        request = request.with_authorization(authorization);
    }

    let response = state.upstream.forward(request).await?;

    if response.status == StatusCode::CREATED {
        let location = format!("/books/{}", payload.isbn);
        Ok((
            response.status,
            [(header::LOCATION, location)],
            Json(response.body),
        )
            .into_response())
    } else {
        Ok((response.status, Json(response.body)).into_response())
    }
}

/// Replaces a book.
///
/// # Endpoint
///
/// `PUT /books/{ISBN}`
///
/// # Errors
///
/// - 400 when the path ISBN differs from the body ISBN, before any upstream
///   call
/// - 404 passthrough when upstream does not know the ISBN
pub async fn update_book_handler(
    State(state): State<AppState>,
    Path(isbn): Path<String>,
    headers: HeaderMap,
    JsonBody(body): JsonBody<Value>,
) -> Result<Response, AppError> {
    let payload: BookPayload = parse_payload(body)?;
    payload.validate()?;

    if isbn != payload.isbn {
        tracing::warn!(path_isbn = %isbn, body_isbn = %payload.isbn, "ISBN mismatch");
        return Err(AppError::validation(
            "ISBN in URL does not match ISBN in request body",
        ));
    }

    let url = format!("{}/books/{}", state.config.books_service_url, isbn);
    let mut request = ForwardRequest::put(url, payload_value(&payload)?);
    if let Some(authorization) = forwarded_authorization(&headers) {
        request = request.with_authorization(authorization);
    }

    let response = state.upstream.forward(request).await?;

    // Updates are returned unshaped, like creates.
    Ok((response.status, Json(response.body)).into_response())
}

/// Reads a book.
///
/// # Endpoint
///
/// `GET /books/{ISBN}` (also reachable at `GET /books/isbn/{ISBN}`)
///
/// # Behavior
///
/// Forwards the lookup and shapes the result for the declared client type:
/// mobile clients see the integer `3` instead of the genre `"non-fiction"`.
pub async fn get_book_handler(
    State(state): State<AppState>,
    Path(isbn): Path<String>,
    client_type: ClientType,
    headers: HeaderMap,
) -> Result<Response, AppError> {
    let url = format!("{}/books/{}", state.config.books_service_url, isbn);
    let mut request = ForwardRequest::get(url);
    if let Some(authorization) = forwarded_authorization(&headers) {
        request = request.with_authorization(authorization);
    }

    let response = state.upstream.forward(request).await?;

    let body = if response.status == StatusCode::OK {
        shape_book(client_type, response.body)
    } else {
        response.body
    };

    Ok((response.status, Json(body)).into_response())
}

fn payload_value(payload: &BookPayload) -> Result<Value, AppError> {
    serde_json::to_value(payload).map_err(|e| AppError::internal(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{Config, DeploymentMode};
    use crate::upstream::{ForwardedResponse, MockUpstreamClient};
    use serde_json::json;
    use std::sync::Arc;
    use std::time::Duration;

    fn test_state(mock: MockUpstreamClient) -> AppState {
        AppState {
            upstream: Arc::new(mock),
            config: Arc::new(Config {
                books_service_url: "http://upstream.test".to_string(),
                customers_service_url: "http://upstream.test".to_string(),
                listen_addr: "0.0.0.0:8080".to_string(),
                mode: DeploymentMode::Gateway,
                request_timeout: Duration::from_secs(30),
                connect_timeout: Duration::from_secs(10),
                max_retries: 3,
                retry_delay: Duration::from_millis(1000),
                log_level: "info".to_string(),
                log_format: "text".to_string(),
            }),
        }
    }

    fn book_json(isbn: &str) -> Value {
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

    #[tokio::test]
    async fn test_update_isbn_mismatch_never_reaches_upstream() {
        // No expectations set: any forwarded call would panic the mock.
        let state = test_state(MockUpstreamClient::new());

        let err = update_book_handler(
            State(state),
            Path("978-0321815736".to_string()),
            HeaderMap::new(),
            JsonBody(book_json("978-9999999999")),
        )
        .await
        .unwrap_err();

        assert_eq!(
            err.to_string(),
            "ISBN in URL does not match ISBN in request body"
        );
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_add_book_invalid_price_never_reaches_upstream() {
        let state = test_state(MockUpstreamClient::new());

        let mut body = book_json("978-0321815736");
        body["price"] = json!(-5.0);

        let err = add_book_handler(State(state), HeaderMap::new(), JsonBody(body))
            .await
            .unwrap_err();

        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_add_book_forwards_and_sets_location() {
        let mut mock = MockUpstreamClient::new();
        mock.expect_forward()
            .withf(|req| req.method == reqwest::Method::POST && req.url.ends_with("/books"))
            .times(1)
            .returning(|req| {
                let body = req.body.clone().unwrap();
                Ok(ForwardedResponse {
                    status: StatusCode::CREATED,
                    body,
                })
            });

        let state = test_state(mock);
        let response = add_book_handler(
            State(state),
            HeaderMap::new(),
            JsonBody(book_json("978-0321815736")),
        )
        .await
        .unwrap();

        assert_eq!(response.status(), StatusCode::CREATED);
        assert_eq!(
            response.headers().get(header::LOCATION).unwrap(),
            "/books/978-0321815736"
        );
    }

    #[tokio::test]
    async fn test_duplicate_isbn_passes_through_as_422() {
        let mut mock = MockUpstreamClient::new();
        mock.expect_forward().times(1).returning(|_| {
            Err(AppError::Upstream {
                status: StatusCode::UNPROCESSABLE_ENTITY,
                message: "This ISBN already exists in the system.".to_string(),
            })
        });

        let state = test_state(mock);
        let err = add_book_handler(
            State(state),
            HeaderMap::new(),
            JsonBody(book_json("978-0321815736")),
        )
        .await
        .unwrap_err();

        assert_eq!(err.status_code(), StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(err.to_string(), "This ISBN already exists in the system.");
    }

    #[tokio::test]
    async fn test_get_book_shapes_for_mobile() {
        let mut mock = MockUpstreamClient::new();
        mock.expect_forward().times(1).returning(|_| {
            Ok(ForwardedResponse {
                status: StatusCode::OK,
                body: book_json("978-0321815736"),
            })
        });

        let state = test_state(mock);
        let response = get_book_handler(
            State(state),
            Path("978-0321815736".to_string()),
            ClientType::Android,
            HeaderMap::new(),
        )
        .await
        .unwrap();

        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body: Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["genre"], json!(3));
    }
}

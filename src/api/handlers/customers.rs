//! Handlers for customer endpoints (create, read by id, read by userId).

use axum::{
    Json,
    extract::{Path, Query, State},
    http::{HeaderMap, StatusCode, header},
    response::{IntoResponse, Response},
};
use serde_json::Value;
use validator::Validate;

use crate::api::client_type::ClientType;
use crate::api::dto::customer::{CustomerLookupQuery, CustomerPayload, is_email_like};
use crate::api::handlers::{forwarded_authorization, parse_payload};
use crate::api::json::JsonBody;
use crate::error::AppError;
use crate::shaping::shape_customer;
use crate::state::AppState;
use crate::upstream::ForwardRequest;

/// Registers a customer.
///
/// # Endpoint
///
/// `POST /customers`
///
/// # Behavior
///
/// Validates the payload (email userId, 2-letter state from the enumerated
/// set), uppercases the state code, forwards the create, and on upstream 201
/// adds `Location: /customers/{id}` using the server-assigned id. The result
/// is shaped for mobile clients.
///
/// # Errors
///
/// - 400 on payload validation failure, before any upstream call
/// - 422 passthrough when upstream reports a duplicate userId
pub async fn add_customer_handler(
    State(state): State<AppState>,
    client_type: ClientType,
    headers: HeaderMap,
    JsonBody(body): JsonBody<Value>,
) -> Result<Response, AppError> {
    let payload: CustomerPayload = parse_payload(body)?;
    payload.validate()?;
    let payload = payload.normalized();

    let url = format!("{}/customers", state.config.customers_service_url);
    let body = serde_json::to_value(&payload).map_err(|e| AppError::internal(e.to_string()))?;
    let mut request = ForwardRequest::post(url, body);
    if let Some(authorization) = forwarded_authorization(&headers) {
        request = request.with_authorization(authorization);
    }

    let response = state.upstream.forward(request).await?;

    if response.status == StatusCode::CREATED {
        let location = response
            .body
            .get("id")
            .and_then(Value::as_i64)
            .map(|id| format!("/customers/{id}"));
        let body = shape_customer(client_type, response.body);

        match location {
            Some(location) => Ok((
                response.status,
                [(header::LOCATION, location)],
                Json(body),
            )
                .into_response()),
            None => Ok((response.status, Json(body)).into_response()),
        }
    } else {
        Ok((response.status, Json(response.body)).into_response())
    }
}

/// Reads a customer by the server-assigned id.
///
/// # Endpoint
///
/// `GET /customers/{id}`
///
/// # Errors
///
/// - 400 `Invalid customer ID` when the id is not a positive integer,
///   before any upstream call
/// - 404 passthrough when upstream has no such customer
pub async fn get_customer_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
    client_type: ClientType,
    headers: HeaderMap,
) -> Result<Response, AppError> {
    let id: i64 = id
        .parse()
        .ok()
        .filter(|id| *id > 0)
        .ok_or_else(|| AppError::validation("Invalid customer ID"))?;

    let url = format!("{}/customers/{}", state.config.customers_service_url, id);
    let mut request = ForwardRequest::get(url);
    if let Some(authorization) = forwarded_authorization(&headers) {
        request = request.with_authorization(authorization);
    }

    let response = state.upstream.forward(request).await?;

    let body = if response.status == StatusCode::OK {
        shape_customer(client_type, response.body)
    } else {
        response.body
    };

    Ok((response.status, Json(body)).into_response())
}

/// Reads a customer by userId (email).
///
/// # Endpoint
///
/// `GET /customers?userId={email}`
///
/// # Errors
///
/// - 400 when the userId is absent or not email-shaped (`@`, `.`, no space),
///   before any upstream call
/// - 404 passthrough when upstream has no such customer
pub async fn get_customer_by_user_id_handler(
    State(state): State<AppState>,
    Query(query): Query<CustomerLookupQuery>,
    client_type: ClientType,
    headers: HeaderMap,
) -> Result<Response, AppError> {
    let user_id = query
        .user_id
        .ok_or_else(|| AppError::validation("userId query parameter is required"))?;

    if !is_email_like(&user_id) {
        return Err(AppError::validation("Invalid email format"));
    }

    let url = format!("{}/customers", state.config.customers_service_url);
    let mut request = ForwardRequest::get(url).with_query("userId", &user_id);
    if let Some(authorization) = forwarded_authorization(&headers) {
        request = request.with_authorization(authorization);
    }

    let response = state.upstream.forward(request).await?;

    let body = if response.status == StatusCode::OK {
        shape_customer(client_type, response.body)
    } else {
        response.body
    };

    Ok((response.status, Json(body)).into_response())
}

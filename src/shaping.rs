//! Per-client-type response shaping.
//!
//! Pure functions over upstream JSON payloads. Shaping never touches the
//! upstream service and has no side effects; the router decides which
//! responses pass through it (book reads, customer reads and creation).

use serde_json::{Value, json};

use crate::api::client_type::ClientType;

/// Fields a mobile client receives for a customer.
const MOBILE_CUSTOMER_FIELDS: [&str; 4] = ["id", "userId", "name", "phone"];

/// Shapes a book payload for the requesting client.
///
/// Mobile clients receive the integer `3` in place of the literal genre
/// `"non-fiction"`. Other genre values pass through unchanged.
pub fn shape_book(client: ClientType, mut payload: Value) -> Value {
    if client.is_mobile() && payload.get("genre").and_then(Value::as_str) == Some("non-fiction") {
        payload["genre"] = json!(3);
    }
    payload
}

/// Shapes a customer payload for the requesting client.
///
/// Mobile clients get exactly {id, userId, name, phone}; every address-related
/// field is dropped. Web clients receive the upstream object unchanged.
pub fn shape_customer(client: ClientType, payload: Value) -> Value {
    if !client.is_mobile() {
        return payload;
    }

    let mut reduced = serde_json::Map::with_capacity(MOBILE_CUSTOMER_FIELDS.len());
    for field in MOBILE_CUSTOMER_FIELDS {
        reduced.insert(
            field.to_string(),
            payload.get(field).cloned().unwrap_or(Value::Null),
        );
    }
    Value::Object(reduced)
}

//! Book payload accepted on create and update.

use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

/// A book as the client submits it. `ISBN` is the immutable identity; all
/// other fields are replaced wholesale on update.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct BookPayload {
    #[serde(rename = "ISBN")]
    #[validate(length(min = 10, max = 20, message = "ISBN must be between 10 and 20 characters"))]
    pub isbn: String,

    pub title: String,
    pub author: String,
    pub description: String,
    pub genre: String,

    /// Positive price with at most 2 decimal places.
    #[validate(custom(function = "validate_price"))]
    pub price: f64,

    /// Non-negative stock count (enforced by the unsigned type).
    pub quantity: u32,
}

/// Price must be strictly positive and expressible in whole cents.
///
/// The `Validate` derive passes `Copy` fields by value to custom functions.
fn validate_price(price: f64) -> Result<(), ValidationError> {
    if price <= 0.0 {
        return Err(ValidationError::new("price")
            .with_message("price must be greater than 0".into()));
    }

    let cents = price * 100.0;
    if (cents - cents.round()).abs() > 1e-6 {
        return Err(ValidationError::new("price")
            .with_message("price must have at most 2 decimal places".into()));
    }

    Ok(())
}

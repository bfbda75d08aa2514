//! Customer payload and lookup query.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::sync::LazyLock;
use validator::{Validate, ValidationError};

/// The 50 US state codes accepted in `state`.
static VALID_STATES: LazyLock<HashSet<&'static str>> = LazyLock::new(|| {
    HashSet::from([
        "AL", "AK", "AZ", "AR", "CA", "CO", "CT", "DE", "FL", "GA", "HI", "ID", "IL", "IN", "IA",
        "KS", "KY", "LA", "ME", "MD", "MA", "MI", "MN", "MS", "MO", "MT", "NE", "NV", "NH", "NJ",
        "NM", "NY", "NC", "ND", "OH", "OK", "OR", "PA", "RI", "SC", "SD", "TN", "TX", "UT", "VT",
        "VA", "WA", "WV", "WI", "WY",
    ])
});

/// A customer as the client submits it. The server-assigned `id` only appears
/// in upstream responses, never in this payload.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CustomerPayload {
    /// Unique lookup key; must be an email address.
    #[serde(rename = "userId")]
    #[validate(email(message = "Invalid email format"))]
    pub user_id: String,

    pub name: String,
    pub phone: String,
    pub address: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub address2: Option<String>,

    pub city: String,

    /// 2-letter US state code, case-insensitive on input.
    #[validate(custom(function = "validate_state"))]
    pub state: String,

    pub zipcode: String,
}

impl CustomerPayload {
    /// Uppercases the state code so upstream always sees the canonical form.
    pub fn normalized(mut self) -> Self {
        self.state = self.state.to_ascii_uppercase();
        self
    }
}

fn validate_state(state: &str) -> Result<(), ValidationError> {
    if VALID_STATES.contains(state.to_ascii_uppercase().as_str()) {
        Ok(())
    } else {
        Err(ValidationError::new("state").with_message("Invalid US state code".into()))
    }
}

/// Query parameters for `GET /customers?userId=`.
#[derive(Debug, Deserialize)]
pub struct CustomerLookupQuery {
    #[serde(rename = "userId")]
    pub user_id: Option<String>,
}

/// The lookup key must look like an email: contains `@` and `.`, no spaces.
///
/// Deliberately looser than the creation-time email validation; it matches
/// what the upstream service itself accepts for lookups.
pub fn is_email_like(user_id: &str) -> bool {
    user_id.contains('@') && user_id.contains('.') && !user_id.contains(' ')
}

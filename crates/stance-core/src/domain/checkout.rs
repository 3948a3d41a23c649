//! Checkout session request and result.

use serde::Serialize;
use serde_json::Value;

/// Body of `POST /create-checkout-session`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CheckoutRequest {
    /// Selects the discounted price when set.
    pub discount: bool,
}

impl CheckoutRequest {
    /// Lenient parse: anything unreadable means "no discount".
    ///
    /// `discount` follows JSON truthiness, so `1` or `"yes"` also select the
    /// discounted price.
    pub fn from_json(body: &[u8]) -> Self {
        let discount = serde_json::from_slice::<Value>(body)
            .ok()
            .and_then(|value| value.get("discount").map(is_truthy))
            .unwrap_or(false);
        Self { discount }
    }
}

fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(flag) => *flag,
        Value::Number(n) => n.as_f64().map(|f| f != 0.0).unwrap_or(true),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// A created payment-provider checkout session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutSession {
    pub session_id: String,
}

//! Cart line item with lenient decoding.
//!
//! Stored carts come from an external JSON document and from form input,
//! so the numeric fields are decoded defensively: `price` accepts a JSON
//! number or a numeric string and coerces anything malformed to `0.0`;
//! `qty` accepts a number or numeric string, floors fractional values,
//! clamps negatives to zero, and defaults to `1` when absent or
//! malformed. A cart that fails these rules item-by-item still loads.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::types::ItemId;

/// One product entry in the cart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineItem {
    /// Identity key; entries are unique by id.
    pub id: ItemId,
    /// Display title.
    #[serde(default)]
    pub title: String,
    /// Unit price. Malformed values coerce to `0.0`.
    #[serde(default, deserialize_with = "de_price")]
    pub price: f64,
    /// Optional thumbnail URL.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    /// Quantity. Persisted entries always have `qty >= 1`; a quantity of
    /// zero deletes the entry.
    #[serde(default = "default_qty", deserialize_with = "de_qty")]
    pub qty: u32,
}

impl LineItem {
    /// Create a line item with quantity 1 and no image.
    #[must_use]
    pub fn new(id: impl Into<ItemId>, title: impl Into<String>, price: f64) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            price,
            image: None,
            qty: 1,
        }
    }

    /// Line subtotal: `price * qty`, with a zero quantity counted as 1.
    #[must_use]
    pub fn subtotal(&self) -> f64 {
        self.price * f64::from(self.qty.max(1))
    }
}

const fn default_qty() -> u32 {
    1
}

/// Floor a quantity to a non-negative integer.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
#[must_use]
pub fn clamp_qty(qty: f64) -> u32 {
    if !qty.is_finite() || qty <= 0.0 {
        0
    } else if qty >= f64::from(u32::MAX) {
        u32::MAX
    } else {
        qty.floor() as u32
    }
}

fn de_price<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(coerce_price(&Value::deserialize(deserializer)?))
}

fn de_qty<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(coerce_qty(&Value::deserialize(deserializer)?))
}

fn coerce_price(value: &Value) -> f64 {
    let parsed = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    parsed.filter(|p| p.is_finite()).unwrap_or(0.0)
}

fn coerce_qty(value: &Value) -> u32 {
    match value {
        Value::Number(n) => n.as_f64().map_or(1, clamp_qty),
        Value::String(s) => s.trim().parse::<f64>().map_or(1, clamp_qty),
        _ => 1,
    }
}

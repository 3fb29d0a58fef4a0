use axum_helpers::JsonDocument;
use database::mongodb::json_to_document;
use mongodb::bson::Document;
use serde::Deserialize;
use serde_json::{Map, Value};
use utoipa::ToSchema;

use crate::error::{CartError, CartResult};

pub const COLLECTION: &str = "carts";

/// Quantity stored when the client gives none
pub const DEFAULT_QUANTITY: i64 = 1;

/// An item in some user's cart
pub type CartItem = JsonDocument;

/// Body of `POST /carts`.
///
/// `name` and `email` are required non-empty strings; `quantity` follows
/// [`resolve_quantity`]; any other field is stored as given.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, ToSchema)]
#[serde(transparent)]
#[schema(value_type = Object)]
pub struct NewCartItem(pub Map<String, Value>);

/// A validated insert: the owner key plus the full document
#[derive(Debug, Clone, PartialEq)]
pub struct CartInsert {
    pub name: String,
    pub email: String,
    pub document: Document,
}

impl NewCartItem {
    pub fn into_insert(mut self) -> CartResult<CartInsert> {
        let name = required_string(&self.0, "name")?;
        let email = required_string(&self.0, "email")?;
        let quantity = resolve_quantity(self.0.get("quantity"))?;

        self.0.remove("_id");
        self.0.insert("quantity".to_string(), Value::from(quantity));

        Ok(CartInsert {
            name,
            email,
            document: json_to_document(self.0),
        })
    }
}

/// Body of `PATCH /carts/{id}`; only `quantity` is read.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, ToSchema)]
pub struct QuantityChange {
    #[schema(value_type = Option<i64>, example = 2)]
    pub quantity: Option<Value>,
}

impl From<Map<String, Value>> for QuantityChange {
    fn from(mut body: Map<String, Value>) -> Self {
        Self {
            quantity: body.remove("quantity"),
        }
    }
}

impl QuantityChange {
    pub fn resolve(&self) -> CartResult<i64> {
        resolve_quantity(self.quantity.as_ref())
    }
}

/// Quantity to store for a client-supplied value.
///
/// Absent, `null`, `false`, `0` and `""` all mean [`DEFAULT_QUANTITY`]; an
/// integral number (`2` or `2.0`) is kept; anything else is rejected.
pub fn resolve_quantity(value: Option<&Value>) -> CartResult<i64> {
    let quantity = match value {
        None | Some(Value::Null) | Some(Value::Bool(false)) => return Ok(DEFAULT_QUANTITY),
        Some(Value::String(s)) if s.is_empty() => return Ok(DEFAULT_QUANTITY),
        Some(Value::Number(n)) => n
            .as_i64()
            .or_else(|| n.as_f64().and_then(integral))
            .ok_or_else(invalid_quantity)?,
        Some(_) => return Err(invalid_quantity()),
    };

    Ok(if quantity == 0 { DEFAULT_QUANTITY } else { quantity })
}

/// `f` as an i64 when it is finite, has no fraction and fits
fn integral(f: f64) -> Option<i64> {
    // 2^63 itself is out of range
    const LIMIT: f64 = 9_223_372_036_854_775_808.0;
    (f.is_finite() && f.fract() == 0.0 && (-LIMIT..LIMIT).contains(&f)).then_some(f as i64)
}

fn invalid_quantity() -> CartError {
    CartError::Validation("Field 'quantity' must be an integer".to_string())
}

fn required_string(body: &Map<String, Value>, field: &str) -> CartResult<String> {
    body.get(field)
        .and_then(Value::as_str)
        .filter(|value| !value.is_empty())
        .map(str::to_string)
        .ok_or_else(|| {
            CartError::Validation(format!(
                "Field '{field}' is required and must be a non-empty string"
            ))
        })
}

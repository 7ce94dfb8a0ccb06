use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

use super::errors::DomainError;

/// One entry of the inventory list.
///
/// A product has no stable identifier: it is addressed by its position in the
/// inventory. Fields other than the four priced ones (`nome`, `categoria`, ...)
/// are kept in `extra` so that a stored inventory reads back exactly as it was
/// loaded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    #[serde(rename = "preco")]
    pub price: f64,
    #[serde(rename = "peso")]
    pub weight: f64,
    #[serde(rename = "dias_entrega", default, deserialize_with = "whole_count")]
    pub lead_time_days: u32,
    #[serde(rename = "quantidade", default, deserialize_with = "whole_count")]
    pub quantity: u32,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Product {
    pub fn new(price: f64, weight: f64, lead_time_days: u32, quantity: u32) -> Self {
        Self {
            price,
            weight,
            lead_time_days,
            quantity,
            extra: Map::new(),
        }
    }
}

/// Counts may be written as `40` or `40.0`; `null` reads as 0.
fn whole_count<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u32, D::Error> {
    let Some(raw) = Option::<f64>::deserialize(deserializer)? else {
        return Ok(0);
    };
    if raw.fract() != 0.0 || raw < 0.0 || raw > f64::from(u32::MAX) {
        return Err(D::Error::custom(format!(
            "expected a non-negative whole number, got {raw}"
        )));
    }
    Ok(raw as u32)
}

/// A cart selection: `index` points into the inventory list.
///
/// Reordering or replacing the inventory does not rewrite cart lines, so an
/// index may end up pointing at a different product or at nothing at all.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartLine {
    pub index: usize,
    #[serde(rename = "quantidade")]
    pub quantity: u32,
}

/// Parse an inventory document (a JSON array of products).
pub fn parse_inventory(text: &str) -> Result<Vec<Product>, DomainError> {
    Ok(serde_json::from_str(text)?)
}

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::errors::DomainError;
use super::product::{CartLine, Product};

/// Deliveries up to this distance (km) ship for free.
pub const FREE_FREIGHT_MAX_KM: f64 = 20.0;
/// Freight charged per unit of total weight beyond the free distance.
pub const FREIGHT_PER_WEIGHT_UNIT: f64 = 30.0;
/// Flat ICMS rate applied to the subtotal.
pub const ICMS_RATE: f64 = 0.25;

/// A priced cart line: the product's fields with the purchased quantity in
/// place of the stock count.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderLine {
    #[serde(rename = "preco")]
    pub price: f64,
    #[serde(rename = "peso")]
    pub weight: f64,
    #[serde(rename = "dias_entrega")]
    pub lead_time_days: u32,
    #[serde(rename = "quantidade")]
    pub quantity: u32,
    pub total: f64,
    #[serde(rename = "pesoTotal")]
    pub total_weight: f64,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Snapshot of a priced cart. Amounts are unrounded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    #[serde(rename = "dataCompraISO", with = "iso_millis")]
    pub purchased_at: DateTime<Utc>,
    pub km: f64,
    #[serde(rename = "itens")]
    pub lines: Vec<OrderLine>,
    pub subtotal: f64,
    #[serde(rename = "pesoTotal")]
    pub total_weight: f64,
    #[serde(rename = "icms")]
    pub tax: f64,
    #[serde(rename = "frete")]
    pub freight: f64,
    #[serde(rename = "totalFinal")]
    pub total: f64,
    #[serde(rename = "diasEntregaMax")]
    pub max_lead_time_days: u32,
    #[serde(rename = "dataEntregaISO", with = "iso_millis")]
    pub delivery_at: DateTime<Utc>,
}

/// Read a delivery distance from user input. Anything that is not a finite
/// number counts as 0 km. Only decimal notation is read, so unlike
/// JavaScript's `Number()`, `"Infinity"` and hex such as `"0x1F"` are 0 km.
pub fn coerce_km(raw: Option<&str>) -> f64 {
    raw.map(str::trim)
        .filter(|s| !s.is_empty())
        .and_then(|s| s.parse::<f64>().ok())
        .filter(|km| km.is_finite())
        .unwrap_or(0.0)
}

pub fn freight_for(km: f64, total_weight: f64) -> f64 {
    if km <= FREE_FREIGHT_MAX_KM {
        0.0
    } else {
        FREIGHT_PER_WEIGHT_UNIT * total_weight
    }
}

/// Price `cart` against `inventory` for a delivery `km` away.
///
/// Every cart line must reference an existing product; the first one that
/// does not aborts the calculation with [`DomainError::MissingProduct`].
pub fn calculate_order(
    inventory: &[Product],
    cart: &[CartLine],
    km: f64,
    now: DateTime<Utc>,
) -> Result<Order, DomainError> {
    let mut subtotal = 0.0;
    let mut total_weight = 0.0;
    let mut max_lead_time_days = 0;

    let lines = cart
        .iter()
        .map(|item| -> Result<OrderLine, DomainError> {
            let product = inventory
                .get(item.index)
                .ok_or(DomainError::MissingProduct { index: item.index })?;
            let quantity = f64::from(item.quantity);
            let line_total = product.price * quantity;
            let line_weight = product.weight * quantity;

            subtotal += line_total;
            total_weight += line_weight;
            max_lead_time_days = max_lead_time_days.max(product.lead_time_days);

            let mut extra = product.extra.clone();
            extra.remove("total");
            extra.remove("pesoTotal");

            Ok(OrderLine {
                price: product.price,
                weight: product.weight,
                lead_time_days: product.lead_time_days,
                quantity: item.quantity,
                total: line_total,
                total_weight: line_weight,
                extra,
            })
        })
        .collect::<Result<Vec<_>, _>>()?;

    let freight = freight_for(km, total_weight);
    let tax = subtotal * ICMS_RATE;
    let delivery_at = now
        .checked_add_signed(Duration::days(i64::from(max_lead_time_days)))
        .ok_or_else(|| {
            DomainError::InvalidInput(format!(
                "lead time of {max_lead_time_days} days is out of range"
            ))
        })?;

    Ok(Order {
        purchased_at: now,
        km,
        lines,
        subtotal,
        total_weight,
        tax,
        freight,
        total: subtotal + tax + freight,
        max_lead_time_days,
        delivery_at,
    })
}

/// ISO-8601 UTC timestamps with millisecond precision, e.g.
/// `2024-05-01T12:00:00.000Z`.
mod iso_millis {
    use chrono::{DateTime, SecondsFormat, Utc};
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(at: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&at.to_rfc3339_opts(SecondsFormat::Millis, true))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<DateTime<Utc>, D::Error> {
        let text = String::deserialize(deserializer)?;
        DateTime::parse_from_rfc3339(&text)
            .map(|at| at.with_timezone(&Utc))
            .map_err(serde::de::Error::custom)
    }
}

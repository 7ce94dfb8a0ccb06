use actix_web::{web, HttpResponse};
use serde::{Deserialize, Serialize};

use crate::domain::errors::DomainError;
use crate::domain::money::brl;
use crate::domain::order::{coerce_km, Order};
use crate::errors::AppError;
use crate::export::json_download;
use crate::state::AppState;

use super::ErrorResponse;

pub const DEFAULT_EXPORT_FILENAME: &str = "ultima-compra.json";

// ── Request / response DTOs ──────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct CheckoutParams {
    /// Distance to the destination in km; anything non-numeric counts as 0.
    pub km: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct DownloadParams {
    pub filename: Option<String>,
}

/// Display strings for the order amounts.
#[derive(Debug, Serialize)]
pub struct FormattedTotals {
    pub subtotal: String,
    pub icms: String,
    pub frete: String,
    #[serde(rename = "totalFinal")]
    pub total_final: String,
}

impl From<&Order> for FormattedTotals {
    fn from(order: &Order) -> Self {
        Self {
            subtotal: brl(order.subtotal),
            icms: brl(order.tax),
            frete: brl(order.freight),
            total_final: brl(order.total),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct CheckoutResponse {
    #[serde(flatten)]
    pub order: Order,
    #[serde(rename = "formatado")]
    pub formatted: FormattedTotals,
}

// ── Handlers ─────────────────────────────────────────────────────────────────

/// POST /checkout
///
/// Prices the current cart against the current inventory and stores the
/// result as the session's last order.
#[utoipa::path(
    post,
    path = "/checkout",
    params(
        ("km" = Option<String>, Query, description = "Distance to the destination in km (default 0)"),
    ),
    responses(
        (status = 200, description = "Order snapshot plus BRL-formatted totals"),
        (status = 422, description = "A cart line references a product that is not in the inventory", body = ErrorResponse),
    ),
    tag = "orders"
)]
pub async fn checkout(
    state: web::Data<AppState>,
    query: web::Query<CheckoutParams>,
) -> Result<HttpResponse, AppError> {
    let km = coerce_km(query.km.as_deref());

    let order = web::block(move || state.storefront.calculate_totals(km))
        .await
        .map_err(|e| AppError::Internal(e.to_string()))??;

    let formatted = FormattedTotals::from(&order);
    Ok(HttpResponse::Ok().json(CheckoutResponse { order, formatted }))
}

/// GET /orders/last
#[utoipa::path(
    get,
    path = "/orders/last",
    responses(
        (status = 200, description = "Last order calculated in this session"),
        (status = 404, description = "No order calculated yet", body = ErrorResponse),
    ),
    tag = "orders"
)]
pub async fn get_last_order(state: web::Data<AppState>) -> Result<HttpResponse, AppError> {
    let order = last_order(state).await?;
    Ok(HttpResponse::Ok().json(order))
}

/// GET /orders/last/download
///
/// Serves the last order as a pretty-printed JSON attachment.
#[utoipa::path(
    get,
    path = "/orders/last/download",
    params(
        ("filename" = Option<String>, Query, description = "File name offered to the client (default ultima-compra.json)"),
    ),
    responses(
        (status = 200, description = "JSON file download"),
        (status = 404, description = "No order calculated yet", body = ErrorResponse),
    ),
    tag = "orders"
)]
pub async fn download_last_order(
    state: web::Data<AppState>,
    query: web::Query<DownloadParams>,
) -> Result<HttpResponse, AppError> {
    let filename = query
        .into_inner()
        .filename
        .unwrap_or_else(|| DEFAULT_EXPORT_FILENAME.to_string());

    let order = last_order(state).await?;
    json_download(&filename, &order)
}

async fn last_order(state: web::Data<AppState>) -> Result<Order, AppError> {
    let order = web::block(move || state.storefront.last_order())
        .await
        .map_err(|e| AppError::Internal(e.to_string()))??;

    order.ok_or_else(|| DomainError::NotFound.into())
}

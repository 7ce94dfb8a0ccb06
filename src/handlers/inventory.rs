use actix_web::{web, HttpResponse};
use serde::Deserialize;
use utoipa::ToSchema;

use crate::domain::ports::InventorySource;
use crate::errors::AppError;
use crate::state::AppState;

use super::ErrorResponse;

// ── Request DTOs ─────────────────────────────────────────────────────────────

#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct LoadInventoryRequest {
    /// Path or absolute URL of the inventory file. Defaults to the configured
    /// `INVENTORY_PATH`.
    pub path: Option<String>,
}

// ── Handlers ─────────────────────────────────────────────────────────────────

/// GET /inventory
///
/// Returns the stored inventory, or `null` when none has been loaded.
#[utoipa::path(
    get,
    path = "/inventory",
    responses(
        (status = 200, description = "Stored inventory (JSON array of products) or null"),
        (status = 500, description = "Internal server error"),
    ),
    tag = "inventory"
)]
pub async fn get_inventory(state: web::Data<AppState>) -> Result<HttpResponse, AppError> {
    let inventory = web::block(move || state.storefront.inventory())
        .await
        .map_err(|e| AppError::Internal(e.to_string()))??;

    Ok(HttpResponse::Ok().json(inventory))
}

/// POST /inventory/load
///
/// Fetches an inventory file and replaces the stored inventory with it. The
/// body is optional; a malformed one is rejected before anything is fetched.
#[utoipa::path(
    post,
    path = "/inventory/load",
    request_body(content = LoadInventoryRequest, description = "Optional source path"),
    responses(
        (status = 200, description = "Inventory replaced; body is the new inventory"),
        (status = 400, description = "Malformed request, unresolvable path or invalid inventory file", body = ErrorResponse),
        (status = 502, description = "Inventory source answered with a failure status", body = ErrorResponse),
    ),
    tag = "inventory"
)]
pub async fn load_inventory(
    state: web::Data<AppState>,
    body: web::Bytes,
) -> Result<HttpResponse, AppError> {
    let request = parse_load_request(&body)?;
    let path = request
        .path
        .filter(|p| !p.trim().is_empty())
        .unwrap_or_else(|| state.inventory_path.clone());

    let document = state.inventory_source.fetch(&path).await?;

    let inventory = web::block(move || state.storefront.replace_inventory(&document))
        .await
        .map_err(|e| AppError::Internal(e.to_string()))??;

    Ok(HttpResponse::Ok().json(inventory))
}

/// An empty body means "use the default path"; anything else must be a valid
/// request object.
fn parse_load_request(body: &[u8]) -> Result<LoadInventoryRequest, AppError> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(LoadInventoryRequest::default());
    }
    serde_json::from_slice(body)
        .map_err(|e| AppError::BadRequest(format!("Invalid load request: {e}")))
}

/// POST /inventory/upload
///
/// Replaces the stored inventory with the uploaded file content.
#[utoipa::path(
    post,
    path = "/inventory/upload",
    request_body(content = String, description = "Inventory file (JSON array of products)", content_type = "application/json"),
    responses(
        (status = 200, description = "Inventory replaced; body is the new inventory"),
        (status = 400, description = "Upload is not a valid inventory", body = ErrorResponse),
    ),
    tag = "inventory"
)]
pub async fn upload_inventory(
    state: web::Data<AppState>,
    body: web::Bytes,
) -> Result<HttpResponse, AppError> {
    let inventory = web::block(move || state.storefront.load_inventory_from_upload(body.to_vec()))
        .await
        .map_err(|e| AppError::Internal(e.to_string()))??;

    Ok(HttpResponse::Ok().json(inventory))
}

/// POST /inventory/debit
///
/// Takes the current cart out of stock. The cart is not cleared.
#[utoipa::path(
    post,
    path = "/inventory/debit",
    responses(
        (status = 200, description = "Stock debited; body is the updated inventory"),
        (status = 500, description = "Internal server error"),
    ),
    tag = "inventory"
)]
pub async fn debit_inventory(state: web::Data<AppState>) -> Result<HttpResponse, AppError> {
    let inventory = web::block(move || state.storefront.debit_inventory())
        .await
        .map_err(|e| AppError::Internal(e.to_string()))??;

    Ok(HttpResponse::Ok().json(inventory))
}

use actix_web::{web, HttpResponse};
use serde::Deserialize;
use utoipa::ToSchema;

use crate::errors::AppError;
use crate::state::AppState;

use super::ErrorResponse;

#[derive(Debug, Deserialize, ToSchema)]
pub struct AddCartItemRequest {
    /// Position of the product in the current inventory.
    pub index: usize,
    /// Units to add. Defaults to 1.
    #[serde(rename = "quantidade")]
    pub quantity: Option<u32>,
}

/// GET /cart
#[utoipa::path(
    get,
    path = "/cart",
    responses(
        (status = 200, description = "Current cart lines"),
    ),
    tag = "cart"
)]
pub async fn get_cart(state: web::Data<AppState>) -> Result<HttpResponse, AppError> {
    let cart = web::block(move || state.storefront.cart())
        .await
        .map_err(|e| AppError::Internal(e.to_string()))??;

    Ok(HttpResponse::Ok().json(cart))
}

/// POST /cart/items
///
/// Adds units of a product, merging with an existing line for the same
/// product. Returns the whole cart.
#[utoipa::path(
    post,
    path = "/cart/items",
    request_body = AddCartItemRequest,
    responses(
        (status = 200, description = "Updated cart lines"),
        (status = 400, description = "Quantity is zero", body = ErrorResponse),
    ),
    tag = "cart"
)]
pub async fn add_cart_item(
    state: web::Data<AppState>,
    body: web::Json<AddCartItemRequest>,
) -> Result<HttpResponse, AppError> {
    let body = body.into_inner();

    let cart = web::block(move || state.storefront.add_to_cart(body.index, body.quantity))
        .await
        .map_err(|e| AppError::Internal(e.to_string()))??;

    Ok(HttpResponse::Ok().json(cart))
}

/// DELETE /cart
#[utoipa::path(
    delete,
    path = "/cart",
    responses(
        (status = 204, description = "Cart emptied"),
    ),
    tag = "cart"
)]
pub async fn clear_cart(state: web::Data<AppState>) -> Result<HttpResponse, AppError> {
    web::block(move || state.storefront.clear_cart())
        .await
        .map_err(|e| AppError::Internal(e.to_string()))??;

    Ok(HttpResponse::NoContent().finish())
}

pub mod cart;
pub mod inventory;
pub mod orders;

use actix_web::web;
use serde::Serialize;
use utoipa::{OpenApi, ToSchema};

/// Body of every error response.
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
    pub error: String,
}

#[derive(OpenApi)]
#[openapi(
    paths(
        inventory::get_inventory,
        inventory::load_inventory,
        inventory::upload_inventory,
        inventory::debit_inventory,
        cart::get_cart,
        cart::add_cart_item,
        cart::clear_cart,
        orders::checkout,
        orders::get_last_order,
        orders::download_last_order,
    ),
    components(schemas(ErrorResponse, inventory::LoadInventoryRequest, cart::AddCartItemRequest)),
    tags(
        (name = "inventory", description = "Load, read and debit the product inventory"),
        (name = "cart", description = "Shopping cart"),
        (name = "orders", description = "Order totals and export"),
    )
)]
pub struct ApiDoc;

/// Register the storefront routes. Expects `web::Data<AppState>` to be set on
/// the app.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/inventory")
            .route("", web::get().to(inventory::get_inventory))
            .route("/load", web::post().to(inventory::load_inventory))
            .route("/upload", web::post().to(inventory::upload_inventory))
            .route("/debit", web::post().to(inventory::debit_inventory)),
    )
    .service(
        web::scope("/cart")
            .route("", web::get().to(cart::get_cart))
            .route("", web::delete().to(cart::clear_cart))
            .route("/items", web::post().to(cart::add_cart_item)),
    )
    .route("/checkout", web::post().to(orders::checkout))
    .service(
        web::scope("/orders")
            .route("/last", web::get().to(orders::get_last_order))
            .route("/last/download", web::get().to(orders::download_last_order)),
    );
}

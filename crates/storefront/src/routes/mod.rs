//! HTTP route handlers for storefront.
//!
//! # Route Structure
//!
//! ```text
//! GET  /health                         - Liveness check
//! GET  /health/ready                   - Readiness check
//!
//! # Products
//! GET  /api/products                   - Search, filter and sort
//! GET  /api/products/featured          - Home page selection
//! GET  /api/products/{slug}            - Product detail with related products
//! GET  /api/products/{slug}/order      - WhatsApp quick order (?size=)
//!
//! # Cart (session scoped)
//! GET    /api/cart                     - Cart with totals
//! DELETE /api/cart                     - Clear cart
//! POST   /api/cart/items               - Add item
//! PATCH  /api/cart/items/{id}          - Set quantity
//! DELETE /api/cart/items/{id}          - Remove item
//! POST   /api/cart/toggle              - Toggle drawer
//! POST   /api/cart/close               - Close drawer
//! POST   /api/cart/checkout            - WhatsApp cart order
//!
//! # Contact
//! GET  /api/contact                    - General WhatsApp link
//! ```

pub mod cart;
pub mod contact;
pub mod products;

use axum::{
    Router,
    routing::{get, patch, post},
};

use crate::state::AppState;

/// Create the product routes router.
pub fn product_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(products::index))
        .route("/featured", get(products::featured))
        .route("/{slug}", get(products::show))
        .route("/{slug}/order", get(products::order))
}

/// Create the cart routes router.
pub fn cart_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(cart::show).delete(cart::clear))
        .route("/items", post(cart::add))
        .route("/items/{id}", patch(cart::update).delete(cart::remove))
        .route("/toggle", post(cart::toggle))
        .route("/close", post(cart::close))
        .route("/checkout", post(cart::checkout))
}

/// Create all API routes for the storefront.
pub fn routes() -> Router<AppState> {
    Router::new()
        .nest("/api/products", product_routes())
        .nest("/api/cart", cart_routes())
        .route("/api/contact", get(contact::whatsapp))
}

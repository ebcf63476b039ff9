//! HTTP route handlers.
//!
//! # Route Structure
//!
//! ```text
//! GET  /health                 - Health check
//!
//! # Auth
//! POST /auth/register          - Create an account (JSON)
//! POST /auth/login             - Password login (form), returns a bearer token
//! GET  /auth/me                - Current username (requires token)
//!
//! # Catalog
//! GET  /categories/            - Category listing
//! GET  /products/              - Product listing (?category_id=N)
//! GET  /products/{id}          - Product detail
//!
//! # Cart (requires token)
//! GET  /cart/                  - Cart contents and item total
//! POST /cart/add               - Merge a product quantity into the cart
//! POST /cart/clear             - Empty the cart (tolerates a missing token)
//! ```
//!
//! Collection routes answer with and without the trailing slash.

pub mod auth;
pub mod cart;
pub mod catalog;

use axum::{
    Router,
    routing::{get, post},
};

use crate::state::AppState;

/// Create the auth routes router.
pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/auth/register", post(auth::register))
        .route("/auth/login", post(auth::login))
        .route("/auth/me", get(auth::me))
}

/// Create the catalog routes router.
pub fn catalog_routes() -> Router<AppState> {
    Router::new()
        .route("/categories", get(catalog::list_categories))
        .route("/categories/", get(catalog::list_categories))
        .route("/products", get(catalog::list_products))
        .route("/products/", get(catalog::list_products))
        .route("/products/{id}", get(catalog::get_product))
}

/// Create the cart routes router.
pub fn cart_routes() -> Router<AppState> {
    Router::new()
        .route("/cart", get(cart::show))
        .route("/cart/", get(cart::show))
        .route("/cart/add", post(cart::add))
        .route("/cart/clear", post(cart::clear))
}

/// Create all API routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .merge(auth_routes())
        .merge(catalog_routes())
        .merge(cart_routes())
}

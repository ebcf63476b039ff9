//! Cart route handlers.
//!
//! Carts are keyed by the username in the caller's access token. Reading and
//! adding require a valid token; clearing answers the same way with or
//! without one, and only touches a cart when an identity resolves.

use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
};
use serde::{Deserialize, Serialize};
use tracing::instrument;

use pocket_shop_core::{Cart, ProductId, Quantity};

use crate::error::{AppError, Result, add_breadcrumb};
use crate::middleware::{OptionalIdentity, RequireIdentity};
use crate::state::AppState;

/// Add-to-cart request body.
#[derive(Debug, Deserialize)]
pub struct AddToCartRequest {
    pub product_id: ProductId,
    /// Checked against [`Quantity`] by the handler; values below 1 are a 422.
    #[serde(default = "default_quantity")]
    pub quantity: i64,
}

fn default_quantity() -> i64 {
    i64::from(Quantity::ONE.get())
}

/// Cart contents with the computed item total.
#[derive(Debug, Serialize)]
pub struct CartResponse {
    pub cart: Cart,
    pub total_items: u64,
    pub message: &'static str,
}

impl CartResponse {
    fn new(cart: Cart, message: &'static str) -> Self {
        Self {
            total_items: cart.total_items(),
            cart,
            message,
        }
    }
}

/// Plain acknowledgement.
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: &'static str,
}

/// Show the caller's cart.
#[instrument(skip_all)]
pub async fn show(
    State(state): State<AppState>,
    RequireIdentity(username): RequireIdentity,
) -> Json<CartResponse> {
    let cart = state.carts().get(&username);
    Json(CartResponse::new(cart, "Ok"))
}

/// Add units of a product to the caller's cart.
#[instrument(skip_all)]
pub async fn add(
    State(state): State<AppState>,
    RequireIdentity(username): RequireIdentity,
    payload: std::result::Result<Json<AddToCartRequest>, JsonRejection>,
) -> Result<Json<CartResponse>> {
    let Json(request) = payload.map_err(|e| AppError::Unprocessable(e.body_text()))?;
    let quantity = Quantity::try_from(request.quantity)?;

    let cart = state.carts().add(&username, request.product_id, quantity)?;

    let product_id = request.product_id.to_string();
    let quantity = quantity.to_string();
    add_breadcrumb(
        "cart",
        "Added to cart",
        Some(&[
            ("product_id", product_id.as_str()),
            ("quantity", quantity.as_str()),
        ]),
    );

    Ok(Json(CartResponse::new(cart, "Added to cart")))
}

/// Empty the caller's cart.
#[instrument(skip_all)]
pub async fn clear(
    State(state): State<AppState>,
    OptionalIdentity(username): OptionalIdentity,
) -> Json<MessageResponse> {
    match username {
        Some(username) => state.carts().clear(&username),
        None => tracing::debug!("Cart clear without identity; nothing to do"),
    }

    Json(MessageResponse {
        message: "Cart cleared",
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use axum::http::StatusCode;
    use serde_json::json;

    use crate::routes::test_support::TestApp;

    #[tokio::test]
    async fn test_empty_cart() {
        let app = TestApp::new();
        let token = app.register_and_login("alex", "secret123").await;

        let (status, body) = app.get("/cart/", Some(&token)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({"cart": {}, "total_items": 0, "message": "Ok"}));
    }

    #[tokio::test]
    async fn test_add_merges_quantities() {
        let app = TestApp::new();
        let token = app.register_and_login("alex", "secret123").await;

        let (_, first) = app
            .post_json("/cart/add", Some(&token), &json!({"product_id": 1, "quantity": 2}))
            .await;
        assert_eq!(first["cart"], json!({"1": 2}));
        assert_eq!(first["message"], "Added to cart");

        let (_, second) = app
            .post_json("/cart/add", Some(&token), &json!({"product_id": 1, "quantity": 3}))
            .await;
        assert_eq!(second["cart"], json!({"1": 5}));
        assert_eq!(second["total_items"], 5);
    }

    #[tokio::test]
    async fn test_quantity_defaults_to_one() {
        let app = TestApp::new();
        let token = app.register_and_login("alex", "secret123").await;

        let (status, body) = app
            .post_json("/cart/add", Some(&token), &json!({"product_id": 3}))
            .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["cart"], json!({"3": 1}));
    }

    #[tokio::test]
    async fn test_invalid_quantity_is_422() {
        let app = TestApp::new();
        let token = app.register_and_login("alex", "secret123").await;

        for quantity in [0, -3] {
            let (status, _) = app
                .post_json(
                    "/cart/add",
                    Some(&token),
                    &json!({"product_id": 1, "quantity": quantity}),
                )
                .await;
            assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        }

        let (_, body) = app.get("/cart/", Some(&token)).await;
        assert_eq!(body["total_items"], 0);
    }

    #[tokio::test]
    async fn test_unknown_product_is_404() {
        let app = TestApp::new();
        let token = app.register_and_login("alex", "secret123").await;

        let (status, body) = app
            .post_json("/cart/add", Some(&token), &json!({"product_id": 999}))
            .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["detail"], "Product not found");
    }

    #[tokio::test]
    async fn test_cart_requires_token() {
        let app = TestApp::new();

        let (status, body) = app.get("/cart/", None).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["detail"], "Not authenticated");

        let (status, _) = app
            .post_json("/cart/add", None, &json!({"product_id": 1}))
            .await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_unauthorized_wins_over_bad_body() {
        let app = TestApp::new();
        let (status, _) = app
            .post_json("/cart/add", None, &json!({"product_id": "nope"}))
            .await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_clear() {
        let app = TestApp::new();
        let token = app.register_and_login("alex", "secret123").await;
        app.post_json("/cart/add", Some(&token), &json!({"product_id": 2}))
            .await;

        let (status, body) = app.post_json("/cart/clear", Some(&token), &json!({})).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({"message": "Cart cleared"}));

        let (_, body) = app.get("/cart/", Some(&token)).await;
        assert_eq!(body["cart"], json!({}));
        assert_eq!(body["total_items"], 0);
    }

    #[tokio::test]
    async fn test_clear_without_token_is_tolerated() {
        let app = TestApp::new();
        let token = app.register_and_login("alex", "secret123").await;
        app.post_json("/cart/add", Some(&token), &json!({"product_id": 1}))
            .await;

        let (status, body) = app.post_json("/cart/clear", None, &json!({})).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["message"], "Cart cleared");

        let (_, body) = app.get("/cart/", Some(&token)).await;
        assert_eq!(body["total_items"], 1);
    }

    #[tokio::test]
    async fn test_carts_are_per_user() {
        let app = TestApp::new();
        let alex = app.register_and_login("alex", "secret123").await;
        let sam = app.register_and_login("sam", "hunter22").await;

        app.post_json("/cart/add", Some(&alex), &json!({"product_id": 1, "quantity": 4}))
            .await;

        let (_, body) = app.get("/cart/", Some(&sam)).await;
        assert_eq!(body["total_items"], 0);
    }
}

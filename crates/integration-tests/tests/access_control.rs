//! Token handling at the HTTP boundary.

#![allow(clippy::unwrap_used)]

use chrono::{Duration, Utc};
use pocket_shop_core::Username;
use pocket_shop_integration_tests::{PREVIOUS_KEY, TOKEN_TTL_MINUTES, TestServer, server_issuer};
use pocket_shop_server::services::tokens::TokenIssuer;
use reqwest::StatusCode;
use serde_json::json;

fn alex() -> Username {
    Username::parse("alex").unwrap()
}

#[tokio::test]
async fn test_cart_without_token_is_unauthorized() {
    let server = TestServer::spawn().await;

    let (status, body) = server.get("/cart/", None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["detail"], "Not authenticated");

    let (status, _) = server
        .post("/cart/add", None, &json!({"product_id": 1}))
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_expired_token_is_unauthorized() {
    let server = TestServer::spawn().await;
    server.register("alex", "secret123").await;
    let live = server.token("alex", "secret123").await;
    server
        .post("/cart/add", Some(&live), &json!({"product_id": 1, "quantity": 2}))
        .await;

    let issued_long_ago = Utc::now() - Duration::minutes(TOKEN_TTL_MINUTES + 1);
    let expired = server_issuer()
        .issue_at(&alex(), issued_long_ago)
        .unwrap()
        .token;

    let (status, _) = server.get("/cart/", Some(&expired)).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, _) = server
        .post("/cart/add", Some(&expired), &json!({"product_id": 1}))
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    // Tolerated, but must not touch the cart.
    let (status, _) = server.post("/cart/clear", Some(&expired), &json!({})).await;
    assert_eq!(status, StatusCode::OK);

    let (_, body) = server.get("/cart/", Some(&live)).await;
    assert_eq!(body["cart"], json!({"1": 2}));
}

#[tokio::test]
async fn test_previous_key_still_accepted() {
    let server = TestServer::spawn().await;

    let old_issuer =
        TokenIssuer::from_secrets(PREVIOUS_KEY, &[], Duration::minutes(TOKEN_TTL_MINUTES));
    let token = old_issuer.issue(&alex()).unwrap().token;

    let (status, body) = server.get("/auth/me", Some(&token)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["username"], "alex");
}

#[tokio::test]
async fn test_foreign_key_rejected() {
    let server = TestServer::spawn().await;

    let stranger = TokenIssuer::from_secrets(
        b"some-other-deployment-key-8a1f0c3e",
        &[],
        Duration::minutes(TOKEN_TTL_MINUTES),
    );
    let token = stranger.issue(&alex()).unwrap().token;

    let (status, _) = server.get("/auth/me", Some(&token)).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_login_errors_are_uniform() {
    let server = TestServer::spawn().await;
    server.register("alex", "secret123").await;

    let wrong_password = server.login("alex", "wrong").await;
    let unknown_user = server.login("nobody", "secret123").await;

    assert_eq!(wrong_password.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(unknown_user.status(), StatusCode::UNAUTHORIZED);

    let a: serde_json::Value = wrong_password.json().await.unwrap();
    let b: serde_json::Value = unknown_user.json().await.unwrap();
    assert_eq!(a, b);
    assert_eq!(a["detail"], "Incorrect username or password");
}

#[tokio::test]
async fn test_duplicate_registration() {
    let server = TestServer::spawn().await;
    server.register("alex", "secret123").await;

    let (status, body) = server
        .post(
            "/auth/register",
            None,
            &json!({"username": "alex", "password": "different"}),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["detail"], "Username already exists");

    // First credential still works, second does not.
    assert_eq!(server.login("alex", "secret123").await.status(), StatusCode::OK);
    assert_eq!(
        server.login("alex", "different").await.status(),
        StatusCode::UNAUTHORIZED
    );
}

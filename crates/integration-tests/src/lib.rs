//! End-to-end tests for Pocket Shop.
//!
//! Each test boots the real router on an ephemeral local port and talks to it
//! over HTTP with `reqwest`, exactly as a browser client would.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p pocket-shop-integration-tests
//! ```

use chrono::Duration;
use reqwest::{Client, StatusCode};
use serde_json::{Value, json};
use tokio::task::JoinHandle;

use pocket_shop_server::app::router;
use pocket_shop_server::config::CorsOrigins;
use pocket_shop_server::services::catalog::Catalog;
use pocket_shop_server::services::tokens::TokenIssuer;
use pocket_shop_server::state::AppState;

/// Key the test server signs with.
pub const SIGNING_KEY: &[u8] = b"integration-signing-key-4f9c2e7a1b8d";

/// Rotated-out key the test server still accepts.
pub const PREVIOUS_KEY: &[u8] = b"integration-previous-key-0d6b3a9e5c71";

/// Token lifetime used by the test server.
pub const TOKEN_TTL_MINUTES: i64 = 60;

/// An issuer sharing the test server's keys, for crafting tokens directly.
#[must_use]
pub fn server_issuer() -> TokenIssuer {
    TokenIssuer::from_secrets(
        SIGNING_KEY,
        &[PREVIOUS_KEY],
        Duration::minutes(TOKEN_TTL_MINUTES),
    )
}

/// A running server plus an HTTP client pointed at it.
pub struct TestServer {
    pub base_url: String,
    pub client: Client,
    handle: JoinHandle<()>,
}

impl TestServer {
    /// Start a server with fresh in-memory state and the demo catalog.
    ///
    /// # Panics
    ///
    /// Panics if the listener cannot bind or the state cannot be built.
    pub async fn spawn() -> Self {
        let catalog = Catalog::seeded().expect("Built-in catalog is invalid");
        let state = AppState::with_parts(server_issuer(), catalog)
            .expect("Failed to build application state");
        let app = router(state, &CorsOrigins::Any);

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind to address");
        let addr = listener.local_addr().expect("Failed to read local address");

        let handle = tokio::spawn(async move {
            axum::serve(listener, app).await.expect("Server error");
        });

        Self {
            base_url: format!("http://{addr}"),
            client: Client::new(),
            handle,
        }
    }

    #[must_use]
    pub fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    /// Register an account and assert it succeeded.
    ///
    /// # Panics
    ///
    /// Panics if the request fails or the server rejects the registration.
    pub async fn register(&self, username: &str, password: &str) {
        let resp = self
            .client
            .post(self.url("/auth/register"))
            .json(&json!({"username": username, "password": password}))
            .send()
            .await
            .expect("Failed to send register request");
        assert_eq!(resp.status(), StatusCode::OK);
    }

    /// Log in and return the raw response.
    ///
    /// # Panics
    ///
    /// Panics if the request cannot be sent.
    pub async fn login(&self, username: &str, password: &str) -> reqwest::Response {
        self.client
            .post(self.url("/auth/login"))
            .form(&[("username", username), ("password", password)])
            .send()
            .await
            .expect("Failed to send login request")
    }

    /// Log in and return the access token.
    ///
    /// # Panics
    ///
    /// Panics if login fails.
    pub async fn token(&self, username: &str, password: &str) -> String {
        let resp = self.login(username, password).await;
        assert_eq!(resp.status(), StatusCode::OK);
        let body: Value = resp.json().await.expect("Login response is not JSON");
        body["access_token"]
            .as_str()
            .expect("Login response has no access_token")
            .to_string()
    }

    /// `GET` with an optional bearer token; returns status and JSON body.
    ///
    /// # Panics
    ///
    /// Panics if the request fails or the body is not JSON.
    pub async fn get(&self, path: &str, token: Option<&str>) -> (StatusCode, Value) {
        let mut request = self.client.get(self.url(path));
        if let Some(token) = token {
            request = request.bearer_auth(token);
        }
        Self::into_json(request.send().await.expect("Failed to send request")).await
    }

    /// `POST` a JSON body with an optional bearer token.
    ///
    /// # Panics
    ///
    /// Panics if the request fails or the body is not JSON.
    pub async fn post(&self, path: &str, token: Option<&str>, body: &Value) -> (StatusCode, Value) {
        let mut request = self.client.post(self.url(path)).json(body);
        if let Some(token) = token {
            request = request.bearer_auth(token);
        }
        Self::into_json(request.send().await.expect("Failed to send request")).await
    }

    async fn into_json(resp: reqwest::Response) -> (StatusCode, Value) {
        let status = resp.status();
        let body = resp.json().await.expect("Response is not JSON");
        (status, body)
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

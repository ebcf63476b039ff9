//! Account route handlers.

use axum::{
    Form, Json,
    extract::{
        State,
        rejection::{FormRejection, JsonRejection},
    },
};
use serde::{Deserialize, Serialize};
use tracing::instrument;

use pocket_shop_core::Username;

use crate::error::{AppError, Result};
use crate::middleware::RequireIdentity;
use crate::services::auth::AuthService;
use crate::state::AppState;

/// Registration request body.
#[derive(Deserialize)]
pub struct RegisterRequest {
    pub username: String,
    pub password: String,
}

/// Login form data (OAuth2 password flow field names).
#[derive(Deserialize)]
pub struct LoginForm {
    pub username: String,
    pub password: String,
}

/// Public view of an account.
#[derive(Debug, Serialize)]
pub struct UserResponse {
    pub username: Username,
}

/// Successful login.
#[derive(Debug, Serialize)]
pub struct TokenResponse {
    pub access_token: String,
    pub token_type: &'static str,
    /// Seconds until the token expires.
    pub expires_in: i64,
}

/// Handle account registration.
#[instrument(skip(state, payload))]
pub async fn register(
    State(state): State<AppState>,
    payload: std::result::Result<Json<RegisterRequest>, JsonRejection>,
) -> Result<Json<UserResponse>> {
    let Json(request) = payload.map_err(|e| AppError::Unprocessable(e.body_text()))?;

    let auth = AuthService::new(state.credentials(), state.tokens());
    let username = auth.register(&request.username, &request.password)?;

    Ok(Json(UserResponse { username }))
}

/// Handle password login.
#[instrument(skip(state, form))]
pub async fn login(
    State(state): State<AppState>,
    form: std::result::Result<Form<LoginForm>, FormRejection>,
) -> Result<Json<TokenResponse>> {
    let Form(form) = form.map_err(|e| AppError::Unprocessable(e.body_text()))?;

    let auth = AuthService::new(state.credentials(), state.tokens());
    let issued = auth.login(&form.username, &form.password)?;

    Ok(Json(TokenResponse {
        access_token: issued.token,
        token_type: "bearer",
        expires_in: issued.expires_in,
    }))
}

/// Return the caller's username.
#[instrument(skip_all)]
pub async fn me(RequireIdentity(username): RequireIdentity) -> Json<UserResponse> {
    Json(UserResponse { username })
}

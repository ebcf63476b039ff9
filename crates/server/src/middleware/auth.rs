//! Access gate: bearer-token extractors.
//!
//! Resolves the current identity from an `Authorization: Bearer <token>`
//! header. A missing header, a malformed header, a bad signature and an
//! expired token all resolve to "anonymous"; handlers pick whether anonymous
//! callers are rejected ([`RequireIdentity`]) or tolerated
//! ([`OptionalIdentity`]).

use axum::{
    extract::{FromRef, FromRequestParts},
    http::{HeaderMap, header, request::Parts},
};

use pocket_shop_core::Username;

use crate::error::{AppError, set_sentry_user};
use crate::services::tokens::TokenIssuer;
use crate::state::AppState;

/// Extract the token from an `Authorization: Bearer` header.
///
/// The scheme is matched case-insensitively. Returns `None` if the header is
/// absent, not valid UTF-8, uses another scheme, or carries an empty token.
#[must_use]
pub fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    let value = headers.get(header::AUTHORIZATION)?.to_str().ok()?;
    let (scheme, token) = value.split_once(' ')?;

    if !scheme.eq_ignore_ascii_case("bearer") {
        return None;
    }

    let token = token.trim();
    (!token.is_empty()).then_some(token)
}

/// Map an optional token to an identity.
#[must_use]
pub fn resolve_identity(tokens: &TokenIssuer, token: Option<&str>) -> Option<Username> {
    token.and_then(|token| tokens.verify(token))
}

fn identity_from_parts(parts: &Parts, state: &AppState) -> Option<Username> {
    let username = resolve_identity(state.tokens(), bearer_token(&parts.headers))?;
    tracing::Span::current().record("username", username.as_str());
    set_sentry_user(&username);
    Some(username)
}

/// Extractor that requires a valid access token.
///
/// Rejects with `401 {"detail": "Not authenticated"}` otherwise.
///
/// # Example
///
/// ```rust,ignore
/// async fn protected_handler(
///     RequireIdentity(username): RequireIdentity,
/// ) -> impl IntoResponse {
///     format!("Hello, {username}!")
/// }
/// ```
#[derive(Debug, Clone)]
pub struct RequireIdentity(pub Username);

impl<S> FromRequestParts<S> for RequireIdentity
where
    AppState: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let state = AppState::from_ref(state);
        identity_from_parts(parts, &state)
            .map(Self)
            .ok_or(AppError::Unauthorized)
    }
}

/// Extractor that resolves the identity if there is one.
///
/// Unlike `RequireIdentity`, this never rejects the request.
#[derive(Debug, Clone)]
pub struct OptionalIdentity(pub Option<Username>);

impl<S> FromRequestParts<S> for OptionalIdentity
where
    AppState: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let state = AppState::from_ref(state);
        Ok(Self(identity_from_parts(parts, &state)))
    }
}

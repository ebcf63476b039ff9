//! Signed, expiring access tokens.
//!
//! Tokens are HS256 JWTs carrying the account username (`sub`), the issue
//! time (`iat`), and the expiry (`exp`), both in Unix seconds. A token is
//! valid while `now < exp`; the boundary second is already expired.
//!
//! New tokens are always signed with the current key. Verification also
//! accepts keys from the previous-key list, so a key can be rotated without
//! logging everyone out.

use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use pocket_shop_core::Username;

use crate::config::{TokenConfig, secret_bytes};

/// JWT claims.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    pub sub: Username,
    pub iat: i64,
    pub exp: i64,
}

/// A freshly signed token.
#[derive(Debug, Clone)]
pub struct IssuedToken {
    pub token: String,
    pub expires_at: DateTime<Utc>,
    /// Lifetime in seconds.
    pub expires_in: i64,
}

/// Why a token was not accepted.
///
/// Only used for logging; every variant looks the same to the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum TokenRejection {
    #[error("malformed token")]
    Malformed,
    #[error("signature does not match any known key")]
    BadSignature,
    #[error("token expired")]
    Expired,
}

/// Errors that can occur while signing a token.
#[derive(Debug, Error)]
pub enum TokenError {
    #[error("failed to sign token: {0}")]
    Signing(#[from] jsonwebtoken::errors::Error),
}

/// Issues and verifies access tokens.
pub struct TokenIssuer {
    signing_key: EncodingKey,
    /// Current key first, then previous keys in configured order.
    verifying_keys: Vec<DecodingKey>,
    ttl: Duration,
    validation: Validation,
}

impl TokenIssuer {
    /// Build an issuer from validated configuration.
    #[must_use]
    pub fn new(config: &TokenConfig) -> Self {
        let previous: Vec<&[u8]> = config.previous_secrets.iter().map(secret_bytes).collect();
        Self::from_secrets(secret_bytes(&config.current_secret), &previous, config.ttl)
    }

    /// Build an issuer from raw key material.
    #[must_use]
    pub fn from_secrets(current: &[u8], previous: &[&[u8]], ttl: Duration) -> Self {
        let verifying_keys = std::iter::once(current)
            .chain(previous.iter().copied())
            .map(DecodingKey::from_secret)
            .collect();

        // Expiry is checked by hand against an injectable clock.
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = false;
        validation.leeway = 0;
        validation.set_required_spec_claims(&["exp", "sub"]);

        Self {
            signing_key: EncodingKey::from_secret(current),
            verifying_keys,
            ttl,
            validation,
        }
    }

    /// Sign a token for `username`, valid from now.
    ///
    /// # Errors
    ///
    /// Returns `TokenError::Signing` if encoding fails.
    pub fn issue(&self, username: &Username) -> Result<IssuedToken, TokenError> {
        self.issue_at(username, Utc::now())
    }

    /// Sign a token for `username` as if the current time were `now`.
    ///
    /// # Errors
    ///
    /// Returns `TokenError::Signing` if encoding fails.
    pub fn issue_at(
        &self,
        username: &Username,
        now: DateTime<Utc>,
    ) -> Result<IssuedToken, TokenError> {
        let expires_at = now + self.ttl;
        let claims = Claims {
            sub: username.clone(),
            iat: now.timestamp(),
            exp: expires_at.timestamp(),
        };

        let token = encode(&Header::new(Algorithm::HS256), &claims, &self.signing_key)?;

        tracing::debug!(username = %username, expires_at = %expires_at, "Issued access token");

        Ok(IssuedToken {
            token,
            expires_at,
            expires_in: self.ttl.num_seconds(),
        })
    }

    /// Resolve a token to its username, or `None` if it is not acceptable.
    #[must_use]
    pub fn verify(&self, token: &str) -> Option<Username> {
        self.verify_at(token, Utc::now())
    }

    /// [`Self::verify`] against a fixed clock.
    #[must_use]
    pub fn verify_at(&self, token: &str, now: DateTime<Utc>) -> Option<Username> {
        match self.verify_detailed(token, now) {
            Ok(claims) => Some(claims.sub),
            Err(reason) => {
                tracing::debug!(%reason, "Rejected access token");
                None
            }
        }
    }

    /// Verify a token and return its claims, or the reason it was rejected.
    ///
    /// # Errors
    ///
    /// Returns `TokenRejection` for bad structure, an unknown signing key, or
    /// an expired token.
    pub fn verify_detailed(
        &self,
        token: &str,
        now: DateTime<Utc>,
    ) -> Result<Claims, TokenRejection> {
        let mut rejection = TokenRejection::BadSignature;

        for key in &self.verifying_keys {
            match decode::<Claims>(token, key, &self.validation) {
                Ok(data) => {
                    if now.timestamp() < data.claims.exp {
                        return Ok(data.claims);
                    }
                    return Err(TokenRejection::Expired);
                }
                Err(e) if matches!(e.kind(), ErrorKind::InvalidSignature) => {}
                Err(_) => {
                    rejection = TokenRejection::Malformed;
                    break;
                }
            }
        }

        Err(rejection)
    }
}

impl std::fmt::Debug for TokenIssuer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenIssuer")
            .field("verifying_keys", &self.verifying_keys.len())
            .field("ttl", &self.ttl)
            .finish_non_exhaustive()
    }
}

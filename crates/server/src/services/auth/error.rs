//! Authentication error types.

use thiserror::Error;

use pocket_shop_core::UsernameError;

use crate::services::tokens::TokenError;
use crate::store::CredentialError;

/// Errors that can occur during authentication operations.
#[derive(Debug, Error)]
pub enum AuthError {
    /// Username failed validation.
    #[error("invalid username: {0}")]
    InvalidUsername(#[from] UsernameError),

    /// Username is already registered.
    #[error("username already exists")]
    DuplicateUsername,

    /// Invalid credentials (wrong password or unknown username).
    #[error("invalid credentials")]
    InvalidCredentials,

    /// Password hashing error.
    #[error("password hashing error")]
    PasswordHash,

    /// Token signing error.
    #[error("token error: {0}")]
    Token(#[from] TokenError),
}

impl From<CredentialError> for AuthError {
    fn from(err: CredentialError) -> Self {
        match err {
            CredentialError::DuplicateUsername => Self::DuplicateUsername,
            CredentialError::PasswordHash => Self::PasswordHash,
        }
    }
}

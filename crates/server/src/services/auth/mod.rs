//! Authentication service.
//!
//! Ties the credential store to the token issuer: registration stores a
//! password hash, login checks it and hands back a signed access token.

mod error;

pub use error::AuthError;

use pocket_shop_core::Username;

use crate::services::tokens::{IssuedToken, TokenIssuer};
use crate::store::CredentialStore;

/// Authentication service.
///
/// Borrows the shared stores for the duration of one request.
pub struct AuthService<'a> {
    credentials: &'a CredentialStore,
    tokens: &'a TokenIssuer,
}

impl<'a> AuthService<'a> {
    /// Create a new authentication service.
    #[must_use]
    pub const fn new(credentials: &'a CredentialStore, tokens: &'a TokenIssuer) -> Self {
        Self {
            credentials,
            tokens,
        }
    }

    /// Register a new account.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::InvalidUsername` if the username is too long.
    /// Returns `AuthError::DuplicateUsername` if the username is already taken.
    /// Returns `AuthError::PasswordHash` if hashing fails.
    pub fn register(&self, username: &str, password: &str) -> Result<Username, AuthError> {
        let username = Username::parse(username)?;
        let username = self.credentials.register(username, password)?;

        tracing::info!(username = %username, "Account registered");
        Ok(username)
    }

    /// Check a username/password pair and issue an access token.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::InvalidCredentials` if the username is unknown or
    /// the password is wrong; the two cases are indistinguishable.
    /// Returns `AuthError::Token` if signing fails.
    pub fn login(&self, username: &str, password: &str) -> Result<IssuedToken, AuthError> {
        if !self.credentials.verify(username, password) {
            tracing::info!("Login failed");
            return Err(AuthError::InvalidCredentials);
        }

        // Only validated usernames are ever stored.
        let username = Username::parse(username).map_err(|_| AuthError::InvalidCredentials)?;
        let issued = self.tokens.issue(&username)?;

        tracing::info!(username = %username, "Login succeeded");
        Ok(issued)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use chrono::Duration;

    use super::*;

    fn fixtures() -> (CredentialStore, TokenIssuer) {
        let credentials = CredentialStore::new().unwrap();
        let tokens = TokenIssuer::from_secrets(
            b"auth-service-test-key-0123456789abcdef",
            &[],
            Duration::minutes(60),
        );
        (credentials, tokens)
    }

    #[test]
    fn test_register_then_login() {
        let (credentials, tokens) = fixtures();
        let auth = AuthService::new(&credentials, &tokens);

        let username = auth.register("alex", "secret123").unwrap();
        assert_eq!(username.as_str(), "alex");

        let issued = auth.login("alex", "secret123").unwrap();
        assert_eq!(tokens.verify(&issued.token), Some(username));
        assert_eq!(issued.expires_in, 3600);
    }

    #[test]
    fn test_register_duplicate() {
        let (credentials, tokens) = fixtures();
        let auth = AuthService::new(&credentials, &tokens);

        auth.register("alex", "secret123").unwrap();
        assert!(matches!(
            auth.register("alex", "secret456"),
            Err(AuthError::DuplicateUsername)
        ));
        assert!(auth.login("alex", "secret123").is_ok());
    }

    #[test]
    fn test_register_invalid_username() {
        let (credentials, tokens) = fixtures();
        let auth = AuthService::new(&credentials, &tokens);

        let long = "a".repeat(Username::MAX_LENGTH + 1);
        assert!(matches!(
            auth.register(&long, "secret123"),
            Err(AuthError::InvalidUsername(_))
        ));
        assert!(credentials.is_empty());
    }

    #[test]
    fn test_register_empty_username() {
        let (credentials, tokens) = fixtures();
        let auth = AuthService::new(&credentials, &tokens);

        let username = auth.register("", "secret123").unwrap();
        assert_eq!(username.as_str(), "");
        assert!(auth.login("", "secret123").is_ok());
        assert!(matches!(
            auth.register("", "other"),
            Err(AuthError::DuplicateUsername)
        ));
    }

    #[test]
    fn test_login_failures_are_indistinguishable() {
        let (credentials, tokens) = fixtures();
        let auth = AuthService::new(&credentials, &tokens);
        auth.register("alex", "secret123").unwrap();

        let wrong_password = auth.login("alex", "nope").unwrap_err();
        let unknown_user = auth.login("sam", "secret123").unwrap_err();
        let empty_user = auth.login("", "secret123").unwrap_err();

        assert!(matches!(wrong_password, AuthError::InvalidCredentials));
        assert!(matches!(unknown_user, AuthError::InvalidCredentials));
        assert!(matches!(empty_user, AuthError::InvalidCredentials));
        assert_eq!(wrong_password.to_string(), unknown_user.to_string());
    }
}

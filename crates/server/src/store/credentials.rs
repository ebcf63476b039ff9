//! Username to password-hash storage.

use std::collections::HashMap;
use std::collections::hash_map::Entry;

use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};
use parking_lot::RwLock;
use thiserror::Error;

use pocket_shop_core::Username;

/// Errors that can occur while storing credentials.
#[derive(Debug, Error)]
pub enum CredentialError {
    /// The username is already registered.
    #[error("username already exists")]
    DuplicateUsername,

    /// Password hashing error.
    #[error("password hashing error")]
    PasswordHash,
}

/// Registered accounts, keyed by username.
///
/// Each entry is an Argon2id PHC string with its own random salt. Entries are
/// never updated or removed.
pub struct CredentialStore {
    hashes: RwLock<HashMap<Username, String>>,
    /// Verified against when the username is unknown, so a miss costs the
    /// same as a wrong password.
    decoy_hash: String,
}

impl CredentialStore {
    /// Create an empty store.
    ///
    /// # Errors
    ///
    /// Returns `CredentialError::PasswordHash` if the decoy hash cannot be
    /// computed.
    pub fn new() -> Result<Self, CredentialError> {
        let decoy_hash = hash_password("decoy password, never matches a login")?;

        Ok(Self {
            hashes: RwLock::new(HashMap::new()),
            decoy_hash,
        })
    }

    /// Register a new account.
    ///
    /// # Errors
    ///
    /// Returns `CredentialError::DuplicateUsername` if the username is taken;
    /// the existing credential is left untouched.
    /// Returns `CredentialError::PasswordHash` if hashing fails.
    pub fn register(&self, username: Username, password: &str) -> Result<Username, CredentialError> {
        // Cheap early exit; the authoritative check happens under the write lock.
        if self.contains(username.as_str()) {
            return Err(CredentialError::DuplicateUsername);
        }

        let password_hash = hash_password(password)?;

        match self.hashes.write().entry(username) {
            Entry::Occupied(_) => Err(CredentialError::DuplicateUsername),
            Entry::Vacant(slot) => {
                let username = slot.key().clone();
                slot.insert(password_hash);
                Ok(username)
            }
        }
    }

    /// Check a username/password pair.
    ///
    /// Returns `false` both for an unknown username and for a wrong password.
    /// An unknown username still pays for a full hash verification.
    #[must_use]
    pub fn verify(&self, username: &str, password: &str) -> bool {
        let stored = self.hashes.read().get(username).cloned();

        match stored {
            Some(hash) => verify_password(password, &hash),
            None => {
                let _ = verify_password(password, &self.decoy_hash);
                false
            }
        }
    }

    /// Whether an account exists.
    #[must_use]
    pub fn contains(&self, username: &str) -> bool {
        self.hashes.read().contains_key(username)
    }

    /// Number of registered accounts.
    #[must_use]
    pub fn len(&self) -> usize {
        self.hashes.read().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.hashes.read().is_empty()
    }
}

impl std::fmt::Debug for CredentialStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CredentialStore")
            .field("accounts", &self.len())
            .finish_non_exhaustive()
    }
}

/// Hash a password using Argon2id.
fn hash_password(password: &str) -> Result<String, CredentialError> {
    let salt = SaltString::generate(&mut OsRng);
    let argon2 = Argon2::default();

    argon2
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|_| CredentialError::PasswordHash)
}

/// Verify a password against a stored hash.
fn verify_password(password: &str, hash: &str) -> bool {
    let Ok(parsed_hash) = PasswordHash::new(hash) else {
        return false;
    };

    Argon2::default()
        .verify_password(password.as_bytes(), &parsed_hash)
        .is_ok()
}

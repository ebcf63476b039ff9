//! Signing key generation.
//!
//! # Usage
//!
//! ```bash
//! # 48 random bytes, base64-encoded (64 characters)
//! shop-cli keygen
//!
//! # Longer key
//! shop-cli keygen --bytes 64
//! ```
//!
//! Paste the output into `SHOP_TOKEN_SECRET`. When rotating, move the old
//! value into `SHOP_TOKEN_PREVIOUS_SECRETS` so outstanding tokens keep working
//! until they expire.

use base64::{Engine, engine::general_purpose::STANDARD};
use rand::RngCore;
use thiserror::Error;

use pocket_shop_server::config::validate_secret_strength;

/// Fewest random bytes accepted; encodes to exactly 32 base64 characters.
pub const MIN_KEY_BYTES: usize = 24;

/// Default key size in bytes.
pub const DEFAULT_KEY_BYTES: usize = 48;

/// Draws before giving up on producing a key that passes validation.
const MAX_ATTEMPTS: usize = 16;

/// Errors that can occur while generating a key.
#[derive(Debug, Error)]
pub enum KeygenError {
    #[error("key must be at least 24 bytes (got {0})")]
    TooShort(usize),

    #[error("could not generate a key that passes validation")]
    Exhausted,
}

/// Generate a random base64 key that the server will accept.
///
/// A random draw can, rarely, spell out a blocked placeholder pattern; such
/// draws are discarded.
///
/// # Errors
///
/// Returns `KeygenError::TooShort` if `bytes` is below [`MIN_KEY_BYTES`].
pub fn generate(bytes: usize) -> Result<String, KeygenError> {
    if bytes < MIN_KEY_BYTES {
        return Err(KeygenError::TooShort(bytes));
    }

    let mut rng = rand::rng();
    let mut buf = vec![0u8; bytes];

    for _ in 0..MAX_ATTEMPTS {
        rng.fill_bytes(&mut buf);
        let key = STANDARD.encode(&buf);
        if validate_secret_strength(&key, "SHOP_TOKEN_SECRET").is_ok() {
            return Ok(key);
        }
    }

    Err(KeygenError::Exhausted)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_default_key_length() {
        let key = generate(DEFAULT_KEY_BYTES).unwrap();
        assert_eq!(key.len(), 64);
        assert_eq!(STANDARD.decode(&key).unwrap().len(), DEFAULT_KEY_BYTES);
    }

    #[test]
    fn test_keys_differ() {
        assert_ne!(generate(32).unwrap(), generate(32).unwrap());
    }

    #[test]
    fn test_minimum_enforced() {
        assert!(matches!(generate(16), Err(KeygenError::TooShort(16))));
        assert_eq!(generate(MIN_KEY_BYTES).unwrap().len(), 32);
    }

    #[test]
    fn test_generated_key_passes_server_validation() {
        let key = generate(DEFAULT_KEY_BYTES).unwrap();
        assert!(validate_secret_strength(&key, "SHOP_TOKEN_SECRET").is_ok());
    }
}

//! Username type.

use core::borrow::Borrow;
use core::fmt;

use serde::{Deserialize, Serialize};

/// Errors that can occur when parsing a [`Username`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum UsernameError {
    /// The input string is too long.
    #[error("username must be at most {max} characters")]
    TooLong {
        /// Maximum allowed length.
        max: usize,
    },
}

/// An account username; the identity that owns a cart.
///
/// Usernames are case-sensitive and compared byte-for-byte: `alex` and `Alex`
/// are different accounts. No other normalization is applied.
///
/// ## Constraints
///
/// - Length: at most 64 characters. The empty string is a valid username.
///
/// ## Examples
///
/// ```
/// use pocket_shop_core::Username;
///
/// assert!(Username::parse("alex").is_ok());
/// assert!(Username::parse("").is_ok());
/// assert!(Username::parse(&"a".repeat(65)).is_err());
/// assert_ne!(Username::parse("alex").ok(), Username::parse("Alex").ok());
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(try_from = "String", into = "String")]
pub struct Username(String);

impl Username {
    /// Maximum length of a username, in characters.
    pub const MAX_LENGTH: usize = 64;

    /// Parse a `Username` from a string.
    ///
    /// # Errors
    ///
    /// Returns an error if the input is longer than 64 characters.
    pub fn parse(s: &str) -> Result<Self, UsernameError> {
        if s.chars().count() > Self::MAX_LENGTH {
            return Err(UsernameError::TooLong {
                max: Self::MAX_LENGTH,
            });
        }

        Ok(Self(s.to_owned()))
    }

    /// Returns the username as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

}

impl fmt::Display for Username {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for Username {
    type Err = UsernameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for Username {
    type Error = UsernameError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<Username> for String {
    fn from(username: Username) -> Self {
        username.0
    }
}

impl AsRef<str> for Username {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

// Hash and Eq agree with `str`, so maps keyed by `Username` can be probed
// with a raw `&str` that was never validated.
impl Borrow<str> for Username {
    fn borrow(&self) -> &str {
        &self.0
    }
}

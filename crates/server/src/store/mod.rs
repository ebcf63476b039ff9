//! In-process state for accounts and carts.
//!
//! Nothing here survives a restart. Both stores are `Sync` and meant to be
//! shared through [`crate::state::AppState`].
//!
//! # Locking
//!
//! - [`CredentialStore`] - one `RwLock` over the username map. Password
//!   hashing runs outside the lock.
//! - [`CartStore`] - one `RwLock` over the cart index, plus one `Mutex` per
//!   account's cart. Mutations for the same account serialize on that mutex;
//!   different accounts never share a cart lock.
//!
//! All locks are `parking_lot` and never held across an `.await`.

pub mod carts;
pub mod credentials;

pub use carts::{CartError, CartStore};
pub use credentials::{CredentialError, CredentialStore};

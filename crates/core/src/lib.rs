//! Pocket Shop Core - Shared types library.
//!
//! This crate provides common types used across all Pocket Shop components:
//! - `server` - HTTP API for accounts, catalog, and carts
//! - `cli` - Command-line tools for signing keys and catalog files
//!
//! # Architecture
//!
//! The core crate contains only types and traits - no I/O, no locking,
//! no HTTP. This keeps it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for IDs, usernames, quantities, prices,
//!   catalog entries, and carts

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;

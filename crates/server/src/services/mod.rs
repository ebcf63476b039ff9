//! Business logic services.
//!
//! # Services
//!
//! - `auth` - Registration and password login
//! - `catalog` - Read-only categories and products
//! - `tokens` - Access token signing and verification

pub mod auth;
pub mod catalog;
pub mod tokens;

//! Pocket Shop server library.
//!
//! Accounts, a read-only catalog, and per-account carts held in process
//! memory, served over a small JSON API. The binary in `main.rs` wires this
//! library to configuration, logging, and a TCP listener; tests drive the
//! same router in-process.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod app;
pub mod config;
pub mod error;
pub mod middleware;
pub mod routes;
pub mod services;
pub mod state;
pub mod store;

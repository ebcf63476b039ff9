//! HTTP middleware and extractors.
//!
//! # Middleware Order (outermost first)
//!
//! 1. Sentry layers (hub per request, HTTP transaction)
//! 2. CORS
//! 3. `TraceLayer` (request span)
//! 4. Request ID (recorded into the span opened above)
//!
//! The access gate runs per handler as an extractor, not as a layer.

pub mod auth;
pub mod request_id;

pub use auth::{OptionalIdentity, RequireIdentity, bearer_token, resolve_identity};
pub use request_id::{REQUEST_ID_HEADER, request_id_middleware};

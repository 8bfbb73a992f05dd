// crates/backend-lib/src/middleware/mod.rs

//! Middleware for the recipes API.

mod require_auth;

pub use require_auth::require_auth;

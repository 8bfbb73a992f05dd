// ============================
// crates/backend-lib/src/auth/mod.rs
// ============================
//! Authentication module.

pub mod password;
mod service;
mod token;

pub use password::{hash_password, verify_password};
pub use service::AuthService;
pub use token::{Claims, TokenSigner};

// ============================
// crates/backend-lib/src/auth/service.rs
// ============================
//! Credential validation and token issuance over the account store.
use std::sync::Arc;

use crate::auth::password::{hash_password, verify_password};
use crate::auth::token::{Claims, TokenSigner};
use crate::error::AppError;
use crate::store::{UserRecord, UserStore};
use recipes_common::{Credentials, TokenPair};

pub struct AuthService {
    users: Arc<dyn UserStore>,
    signer: TokenSigner,
}

impl AuthService {
    pub fn new(users: Arc<dyn UserStore>, signer: TokenSigner) -> Self {
        Self { users, signer }
    }

    /// Create an account and mint its first token.
    ///
    /// Uniqueness is enforced by check-then-insert against the store. The
    /// two steps are not atomic; a concurrent duplicate slipping between
    /// them is accepted as out of scope, matching the original design.
    pub async fn sign_up(&self, credentials: &Credentials) -> Result<TokenPair, AppError> {
        if credentials.username.is_empty() || credentials.password.is_empty() {
            return Err(AppError::Validation(
                "username and password cannot be empty".to_string(),
            ));
        }

        if self
            .users
            .find_by_username(&credentials.username)
            .await?
            .is_some()
        {
            return Err(AppError::Conflict("username already in use".to_string()));
        }

        let password_hash = hash_password(&credentials.password)
            .map_err(|e| AppError::Internal(format!("failed to hash password: {e}")))?;
        self.users
            .insert(&UserRecord {
                username: credentials.username.clone(),
                password_hash,
            })
            .await?;

        tracing::info!(username = %credentials.username, "account created");
        self.signer.mint(&credentials.username)
    }

    /// Validate credentials and mint a fresh token.
    ///
    /// Unknown username and wrong password produce the same response, so
    /// the endpoint does not leak which accounts exist.
    pub async fn sign_in(&self, credentials: &Credentials) -> Result<TokenPair, AppError> {
        let user = self
            .users
            .find_by_username(&credentials.username)
            .await?
            .ok_or_else(|| AppError::Unauthorized("invalid username or password".to_string()))?;

        if !verify_password(&user.password_hash, &credentials.password) {
            return Err(AppError::Unauthorized(
                "invalid username or password".to_string(),
            ));
        }

        tracing::debug!(username = %user.username, "sign-in succeeded");
        self.signer.mint(&user.username)
    }

    /// Replace an already-verified token close to its expiry.
    pub fn refresh(&self, claims: &Claims) -> Result<TokenPair, AppError> {
        self.signer.refresh(claims)
    }

    /// Verify a raw bearer token. Used by the middleware gate.
    pub fn verify(&self, token: &str) -> Result<Claims, AppError> {
        self.signer.verify(token)
    }
}

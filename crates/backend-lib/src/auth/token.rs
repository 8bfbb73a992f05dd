// ============================
// crates/backend-lib/src/auth/token.rs
// ============================
//! Signed bearer-token minting, verification, and refresh.
//!
//! The deployment uses a single token strategy: stateless HS256-signed
//! claims carried in the `Authorization` header. There is no server-side
//! session table and no revocation list; tokens expire at their `exp`.
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use crate::config::Settings;
use crate::error::AppError;
use recipes_common::TokenPair;

/// Claims embedded in every token issued by the server.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Standard JWT subject — set to the username.
    pub sub: String,
    /// Expiry, seconds since the Unix epoch.
    pub exp: i64,
    /// Issued-at, seconds since the Unix epoch.
    pub iat: i64,
}

/// Mints and verifies tokens with the configured lifetimes.
#[derive(Clone)]
pub struct TokenSigner {
    encoding: EncodingKey,
    decoding: DecodingKey,
    session_ttl: Duration,
    refresh_ttl: Duration,
    refresh_grace: Duration,
}

impl TokenSigner {
    pub fn new(settings: &Settings) -> Self {
        let secret = settings.token_secret.as_bytes();
        Self {
            encoding: EncodingKey::from_secret(secret),
            decoding: DecodingKey::from_secret(secret),
            session_ttl: Duration::seconds(settings.session_ttl_secs as i64),
            refresh_ttl: Duration::seconds(settings.refresh_ttl_secs as i64),
            refresh_grace: Duration::seconds(settings.refresh_grace_secs as i64),
        }
    }

    /// Mint a token for a freshly authenticated subject.
    pub fn mint(&self, username: &str) -> Result<TokenPair, AppError> {
        self.mint_with_ttl(username, self.session_ttl)
    }

    fn mint_with_ttl(&self, username: &str, ttl: Duration) -> Result<TokenPair, AppError> {
        let now = Utc::now();
        let expires = now + ttl;
        let claims = Claims {
            sub: username.to_string(),
            exp: expires.timestamp(),
            iat: now.timestamp(),
        };

        let token = encode(&Header::default(), &claims, &self.encoding)
            .map_err(|e| AppError::Internal(format!("failed to sign token: {e}")))?;

        Ok(TokenPair { token, expires })
    }

    /// Verify a token's signature and expiry, returning its claims.
    pub fn verify(&self, token: &str) -> Result<Claims, AppError> {
        let mut validation = Validation::default();
        // the default 60s leeway would defeat the refresh grace window
        validation.leeway = 0;

        decode::<Claims>(token, &self.decoding, &validation)
            .map(|data| data.claims)
            .map_err(|e| AppError::Unauthorized(format!("invalid token: {e}")))
    }

    /// Replace a still-valid token close to its expiry.
    ///
    /// Refresh is only honored within the grace window before `exp`; an
    /// earlier attempt fails without minting anything. The replacement
    /// carries the same subject with a fresh refresh-lifetime expiry.
    pub fn refresh(&self, claims: &Claims) -> Result<TokenPair, AppError> {
        let remaining = claims.exp - Utc::now().timestamp();
        if remaining > self.refresh_grace.num_seconds() {
            return Err(AppError::RefreshTooEarly);
        }
        self.mint_with_ttl(&claims.sub, self.refresh_ttl)
    }
}

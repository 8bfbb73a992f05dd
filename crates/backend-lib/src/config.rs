// ============================
// crates/backend-lib/src/config.rs
// ============================
//! Configuration management.
use anyhow::Result;
use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;

/// Application settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Server bind address
    pub bind_addr: SocketAddr,
    /// MongoDB connection string
    pub mongo_uri: String,
    /// MongoDB database name
    pub mongo_database: String,
    /// Redis connection address
    pub redis_url: String,
    /// HMAC secret for signing bearer tokens
    pub token_secret: String,
    /// Lifetime of tokens minted at sign-up / sign-in, in seconds
    pub session_ttl_secs: u64,
    /// Lifetime of tokens minted on refresh, in seconds
    pub refresh_ttl_secs: u64,
    /// Refresh is only honored within this many seconds of expiry
    pub refresh_grace_secs: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            bind_addr: "127.0.0.1:3000".parse().unwrap(),
            mongo_uri: "mongodb://localhost:27017".to_string(),
            mongo_database: "recipes".to_string(),
            redis_url: "redis://127.0.0.1:6379".to_string(),
            token_secret: "insecure-dev-secret".to_string(),
            session_ttl_secs: 10 * 60,
            refresh_ttl_secs: 5 * 60,
            refresh_grace_secs: 30,
        }
    }
}

impl Settings {
    /// Load settings: defaults, then `recipes.toml`, then `RECIPES_*`
    /// environment variables, later sources winning.
    pub fn load() -> Result<Self> {
        let settings = Figment::from(Serialized::defaults(Settings::default()))
            .merge(Toml::file("recipes.toml"))
            .merge(Env::prefixed("RECIPES_"))
            .extract()?;

        Ok(settings)
    }
}

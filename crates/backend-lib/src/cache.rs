// ============================
// crates/backend-lib/src/cache.rs
// ============================
//! Read-through cache for the full recipe listing.
//!
//! Policy: invalidate on write, repopulate on the next read. The cache is
//! never updated in place, so staleness is bounded to at most one read
//! after each write as long as every mutating path invalidates.
use async_trait::async_trait;
use redis::{aio::ConnectionManager, AsyncCommands, Client};

use crate::error::AppError;
use recipes_common::Recipe;

/// Fixed key holding the serialized listing snapshot.
const LISTING_KEY: &str = "recipes";

/// Trait for listing-cache backends
#[async_trait]
pub trait ListingCache: Send + Sync {
    /// Fetch the cached listing, if present and decodable.
    async fn get(&self) -> Result<Option<Vec<Recipe>>, AppError>;

    /// Store a listing snapshot. No expiry: the snapshot lives until the
    /// next invalidation.
    async fn put(&self, recipes: &[Recipe]) -> Result<(), AppError>;

    /// Drop the cached snapshot so the next read recomputes it.
    async fn invalidate(&self) -> Result<(), AppError>;
}

/// Open a multiplexed Redis connection with automatic reconnection.
pub async fn connect(redis_url: &str) -> Result<ConnectionManager, AppError> {
    let client = Client::open(redis_url)?;
    let connection = client.get_connection_manager().await?;
    tracing::info!("connected to Redis");
    Ok(connection)
}

/// Redis-backed implementation of the `ListingCache` trait
#[derive(Clone)]
pub struct RedisListingCache {
    connection: ConnectionManager,
}

impl RedisListingCache {
    pub fn new(connection: ConnectionManager) -> Self {
        Self { connection }
    }
}

#[async_trait]
impl ListingCache for RedisListingCache {
    async fn get(&self) -> Result<Option<Vec<Recipe>>, AppError> {
        let mut connection = self.connection.clone();
        let raw: Option<String> = connection.get(LISTING_KEY).await?;

        match raw {
            Some(json) => match serde_json::from_str(&json) {
                Ok(recipes) => {
                    tracing::debug!(key = LISTING_KEY, "cache hit");
                    Ok(Some(recipes))
                }
                Err(e) => {
                    // An undecodable snapshot is treated as a miss; the
                    // next `put` overwrites it.
                    tracing::warn!(key = LISTING_KEY, error = %e, "discarding undecodable cache entry");
                    Ok(None)
                }
            },
            None => {
                tracing::debug!(key = LISTING_KEY, "cache miss");
                Ok(None)
            }
        }
    }

    async fn put(&self, recipes: &[Recipe]) -> Result<(), AppError> {
        let json = serde_json::to_string(recipes)?;
        let mut connection = self.connection.clone();
        connection.set::<_, _, ()>(LISTING_KEY, json).await?;
        tracing::debug!(key = LISTING_KEY, entries = recipes.len(), "cache populated");
        Ok(())
    }

    async fn invalidate(&self) -> Result<(), AppError> {
        let mut connection = self.connection.clone();
        connection.del::<_, ()>(LISTING_KEY).await?;
        tracing::debug!(key = LISTING_KEY, "cache invalidated");
        Ok(())
    }
}

use std::sync::Arc;

use anyhow::Context;
use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

use recipes_backend_lib::{
    cache::{self, RedisListingCache},
    config::Settings,
    router,
    store::{self, MongoRecipeStore, MongoUserStore},
    AppState,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    // Initialize configuration
    let settings = Settings::load().context("failed to load configuration")?;

    // Connect to the document store and the cache
    let database = store::connect(&settings.mongo_uri, &settings.mongo_database)
        .await
        .context("failed to connect to MongoDB")?;
    let redis = cache::connect(&settings.redis_url)
        .await
        .context("failed to connect to Redis")?;

    let recipes = Arc::new(MongoRecipeStore::new(&database));
    let users = Arc::new(MongoUserStore::new(&database));
    let cache = Arc::new(RedisListingCache::new(redis));

    // Create application state and the router
    let state = AppState::new(recipes, users, cache, settings);
    let bind_addr = state.settings.bind_addr;
    let app = router::create_router(state);

    // Start the server
    let listener = TcpListener::bind(bind_addr).await?;
    tracing::info!(addr = %bind_addr, "listening");

    axum::serve(listener, app).await?;

    Ok(())
}

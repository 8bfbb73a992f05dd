// ============================
// crates/backend-lib/src/lib.rs
// ============================
//! Core library for the recipes REST API: configuration, store and cache
//! adapters, authentication, handlers, and the router.

pub mod auth;
pub mod cache;
pub mod config;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod router;
pub mod store;

use std::sync::Arc;

use crate::auth::{AuthService, TokenSigner};
use crate::cache::ListingCache;
use crate::config::Settings;
use crate::store::{RecipeStore, UserStore};

/// Application state shared across all handlers.
///
/// All connection handles live behind these trait objects; there are no
/// ambient globals, and each request works against the same injected
/// adapters.
#[derive(Clone)]
pub struct AppState {
    /// Recipe store adapter
    pub recipes: Arc<dyn RecipeStore>,
    /// Listing cache adapter
    pub cache: Arc<dyn ListingCache>,
    /// Authentication service
    pub auth: Arc<AuthService>,
    /// Settings
    pub settings: Arc<Settings>,
}

impl AppState {
    /// Create a new application state
    pub fn new(
        recipes: Arc<dyn RecipeStore>,
        users: Arc<dyn UserStore>,
        cache: Arc<dyn ListingCache>,
        settings: Settings,
    ) -> Self {
        let signer = TokenSigner::new(&settings);
        let auth = Arc::new(AuthService::new(users, signer));

        Self {
            recipes,
            cache,
            auth,
            settings: Arc::new(settings),
        }
    }
}

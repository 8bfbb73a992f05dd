//! In-memory adapters and request helpers shared by the integration tests.
//!
//! The memory cache keeps its snapshot serialized, so listing reads served
//! from it go through the same JSON round-trip as the Redis backend.
#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
    Router,
};
use http_body_util::BodyExt;
use serde_json::Value;
use tokio::sync::RwLock;
use tower::ServiceExt;
use uuid::Uuid;

use recipes_backend_lib::{
    cache::ListingCache,
    config::Settings,
    error::AppError,
    router::create_router,
    store::{RecipeStore, UserRecord, UserStore},
    AppState,
};
use recipes_common::{Recipe, RecipeDraft};

#[derive(Default)]
pub struct MemoryRecipeStore {
    recipes: RwLock<Vec<Recipe>>,
}

#[async_trait]
impl RecipeStore for MemoryRecipeStore {
    async fn find_all(&self) -> Result<Vec<Recipe>, AppError> {
        Ok(self.recipes.read().await.clone())
    }

    async fn find_by_tag(&self, tag: &str) -> Result<Vec<Recipe>, AppError> {
        Ok(self
            .recipes
            .read()
            .await
            .iter()
            .filter(|r| r.tags.iter().any(|t| t == tag))
            .cloned()
            .collect())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Recipe>, AppError> {
        Ok(self.recipes.read().await.iter().find(|r| r.id == id).cloned())
    }

    async fn insert(&self, recipe: &Recipe) -> Result<(), AppError> {
        self.recipes.write().await.push(recipe.clone());
        Ok(())
    }

    async fn update(&self, id: Uuid, draft: &RecipeDraft) -> Result<bool, AppError> {
        let mut recipes = self.recipes.write().await;
        match recipes.iter_mut().find(|r| r.id == id) {
            Some(recipe) => {
                recipe.name = draft.name.clone();
                recipe.tags = draft.tags.clone();
                recipe.ingredients = draft.ingredients.clone();
                recipe.instructions = draft.instructions.clone();
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn delete(&self, id: Uuid) -> Result<bool, AppError> {
        let mut recipes = self.recipes.write().await;
        let before = recipes.len();
        recipes.retain(|r| r.id != id);
        Ok(recipes.len() < before)
    }
}

#[derive(Default)]
pub struct MemoryUserStore {
    users: RwLock<HashMap<String, UserRecord>>,
}

#[async_trait]
impl UserStore for MemoryUserStore {
    async fn find_by_username(&self, username: &str) -> Result<Option<UserRecord>, AppError> {
        Ok(self.users.read().await.get(username).cloned())
    }

    async fn insert(&self, user: &UserRecord) -> Result<(), AppError> {
        self.users
            .write()
            .await
            .insert(user.username.clone(), user.clone());
        Ok(())
    }
}

/// Serialized snapshot cache with populate/invalidate counters, so tests
/// can tell a cache-served listing apart from a store-served one.
#[derive(Default)]
pub struct MemoryCache {
    snapshot: RwLock<Option<String>>,
    puts: AtomicUsize,
    invalidations: AtomicUsize,
}

impl MemoryCache {
    pub fn puts(&self) -> usize {
        self.puts.load(Ordering::SeqCst)
    }

    pub fn invalidations(&self) -> usize {
        self.invalidations.load(Ordering::SeqCst)
    }

    pub async fn is_empty(&self) -> bool {
        self.snapshot.read().await.is_none()
    }
}

#[async_trait]
impl ListingCache for MemoryCache {
    async fn get(&self) -> Result<Option<Vec<Recipe>>, AppError> {
        match self.snapshot.read().await.as_deref() {
            Some(json) => Ok(serde_json::from_str(json).ok()),
            None => Ok(None),
        }
    }

    async fn put(&self, recipes: &[Recipe]) -> Result<(), AppError> {
        let json = serde_json::to_string(recipes)?;
        *self.snapshot.write().await = Some(json);
        self.puts.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    async fn invalidate(&self) -> Result<(), AppError> {
        *self.snapshot.write().await = None;
        self.invalidations.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

pub fn test_settings() -> Settings {
    Settings {
        token_secret: "integration-secret".to_string(),
        ..Settings::default()
    }
}

pub fn state_with(settings: Settings) -> (AppState, Arc<MemoryCache>) {
    let cache = Arc::new(MemoryCache::default());
    let state = AppState::new(
        Arc::new(MemoryRecipeStore::default()),
        Arc::new(MemoryUserStore::default()),
        cache.clone(),
        settings,
    );
    (state, cache)
}

/// Router over fresh in-memory adapters, plus a handle on the cache.
pub fn test_app() -> (Router, Arc<MemoryCache>) {
    let (state, cache) = state_with(test_settings());
    (create_router(state), cache)
}

/// Fire one request and decode the JSON response body (if any).
pub async fn send(
    app: &Router,
    method: Method,
    uri: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> (StatusCode, Value) {
    send_raw(app, method, uri, token, body.map(|b| b.to_string())).await
}

/// Same as [`send`], but with a raw body string so tests can post
/// deliberately malformed JSON.
pub async fn send_raw(
    app: &Router,
    method: Method,
    uri: &str,
    token: Option<&str>,
    body: Option<String>,
) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }

    let request = match body {
        Some(raw) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(raw))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, value)
}

/// Sign up a user and return the bearer token.
pub async fn sign_up(app: &Router, username: &str, password: &str) -> String {
    let (status, body) = send(
        app,
        Method::POST,
        "/signup",
        None,
        Some(serde_json::json!({ "username": username, "password": password })),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "sign-up failed: {body}");
    body["token"].as_str().unwrap().to_string()
}

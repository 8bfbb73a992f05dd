// ============================
// crates/backend-lib/src/handlers/recipes.rs
// ============================
//! CRUD endpoints for the recipes resource.
//!
//! The full listing goes through the read-through cache; every mutating
//! handler invalidates the cached snapshot before answering, delete
//! included, so no write path can leave the listing stale beyond one read.
use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Path, Query, State,
    },
    Json,
};
use serde::Deserialize;
use uuid::Uuid;

use crate::{error::AppError, AppState};
use recipes_common::{Ack, Recipe, RecipeDraft};

/// `GET /recipes` — read-through: cache first, store on a miss, then
/// populate the cache for subsequent reads.
pub async fn list(State(state): State<AppState>) -> Result<Json<Vec<Recipe>>, AppError> {
    if let Some(recipes) = state.cache.get().await? {
        return Ok(Json(recipes));
    }

    let recipes = state.recipes.find_all().await?;
    state.cache.put(&recipes).await?;
    Ok(Json(recipes))
}

#[derive(Debug, Deserialize)]
pub struct SearchParams {
    tag: String,
}

/// `GET /recipes/search?tag=X` — exact tag equality against the store.
/// Deliberately bypasses the cache: only the full listing is cached.
pub async fn search(
    State(state): State<AppState>,
    params: Result<Query<SearchParams>, QueryRejection>,
) -> Result<Json<Vec<Recipe>>, AppError> {
    let Query(params) = params.map_err(|e| AppError::Validation(e.body_text()))?;
    let recipes = state.recipes.find_by_tag(&params.tag).await?;
    Ok(Json(recipes))
}

/// `GET /recipes/{id}`
pub async fn get_one(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Recipe>, AppError> {
    let id = parse_id(&id)?;
    let recipe = state
        .recipes
        .find_by_id(id)
        .await?
        .ok_or_else(|| AppError::NotFound("recipe not found".to_string()))?;
    Ok(Json(recipe))
}

/// `POST /recipes`
pub async fn create(
    State(state): State<AppState>,
    payload: Result<Json<RecipeDraft>, JsonRejection>,
) -> Result<Json<Recipe>, AppError> {
    let Json(draft) = payload.map_err(|e| AppError::Validation(e.body_text()))?;

    let recipe = Recipe::from_draft(draft);
    state.recipes.insert(&recipe).await?;
    state.cache.invalidate().await?;

    tracing::info!(id = %recipe.id, name = %recipe.name, "recipe created");
    Ok(Json(recipe))
}

/// `PUT /recipes/{id}` — overwrites name, tags, ingredients, and
/// instructions; id and publishedAt are immutable. Returns an ack rather
/// than the updated record.
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<RecipeDraft>, JsonRejection>,
) -> Result<Json<Ack>, AppError> {
    let id = parse_id(&id)?;
    let Json(draft) = payload.map_err(|e| AppError::Validation(e.body_text()))?;

    if !state.recipes.update(id, &draft).await? {
        return Err(AppError::NotFound("recipe not found".to_string()));
    }
    state.cache.invalidate().await?;

    tracing::info!(id = %id, "recipe updated");
    Ok(Json(Ack::new("recipe updated")))
}

/// `DELETE /recipes/{id}`
pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Ack>, AppError> {
    let id = parse_id(&id)?;

    if !state.recipes.delete(id).await? {
        return Err(AppError::NotFound("recipe not found".to_string()));
    }
    state.cache.invalidate().await?;

    tracing::info!(id = %id, "recipe deleted");
    Ok(Json(Ack::new("recipe deleted")))
}

fn parse_id(raw: &str) -> Result<Uuid, AppError> {
    Uuid::parse_str(raw).map_err(|_| AppError::Validation(format!("invalid recipe id: {raw}")))
}

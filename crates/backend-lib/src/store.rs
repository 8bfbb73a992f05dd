// ============================
// crates/backend-lib/src/store.rs
// ============================
//! Store abstraction over the document database collections.
//!
//! The traits are the seams the handlers and the auth service talk to; the
//! Mongo-backed implementations below are the production backends, and the
//! integration tests substitute in-memory ones.
use async_trait::async_trait;
use futures_util::TryStreamExt;
use mongodb::{
    bson::doc,
    options::ClientOptions,
    Client, Collection, Database,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::AppError;
use recipes_common::{Recipe, RecipeDraft};

/// A stored account record: the username is the unique, case-sensitive key,
/// the hash is a salted scrypt PHC string. Immutable after sign-up.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserRecord {
    pub username: String,
    pub password_hash: String,
}

/// Trait for recipe persistence backends
#[async_trait]
pub trait RecipeStore: Send + Sync {
    /// Fetch the full listing.
    async fn find_all(&self) -> Result<Vec<Recipe>, AppError>;

    /// Fetch recipes whose tag list contains `tag` exactly.
    async fn find_by_tag(&self, tag: &str) -> Result<Vec<Recipe>, AppError>;

    /// Fetch a single recipe by id.
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Recipe>, AppError>;

    /// Persist a freshly created recipe.
    async fn insert(&self, recipe: &Recipe) -> Result<(), AppError>;

    /// Overwrite the mutable fields of an existing recipe. Returns whether
    /// a record with that id existed.
    async fn update(&self, id: Uuid, draft: &RecipeDraft) -> Result<bool, AppError>;

    /// Remove a recipe. Returns whether a record with that id existed.
    async fn delete(&self, id: Uuid) -> Result<bool, AppError>;
}

/// Trait for account persistence backends
#[async_trait]
pub trait UserStore: Send + Sync {
    async fn find_by_username(&self, username: &str) -> Result<Option<UserRecord>, AppError>;
    async fn insert(&self, user: &UserRecord) -> Result<(), AppError>;
}

/// Connect to MongoDB and verify the deployment is reachable before serving.
pub async fn connect(uri: &str, database: &str) -> Result<Database, AppError> {
    let options = ClientOptions::parse(uri).await?;
    let client = Client::with_options(options)?;

    // fail fast at startup rather than on the first request
    client
        .database("admin")
        .run_command(doc! { "ping": 1 })
        .await?;
    tracing::info!(database = %database, "connected to MongoDB");

    Ok(client.database(database))
}

/// Mongo-backed implementation of the `RecipeStore` trait
#[derive(Clone)]
pub struct MongoRecipeStore {
    collection: Collection<Recipe>,
}

impl MongoRecipeStore {
    pub fn new(database: &Database) -> Self {
        Self {
            collection: database.collection("recipes"),
        }
    }
}

#[async_trait]
impl RecipeStore for MongoRecipeStore {
    async fn find_all(&self) -> Result<Vec<Recipe>, AppError> {
        let cursor = self.collection.find(doc! {}).await?;
        let recipes = cursor.try_collect().await?;
        Ok(recipes)
    }

    async fn find_by_tag(&self, tag: &str) -> Result<Vec<Recipe>, AppError> {
        // Mongo array-equality: matches documents whose `tags` array
        // contains the value.
        let cursor = self.collection.find(doc! { "tags": tag }).await?;
        let recipes = cursor.try_collect().await?;
        Ok(recipes)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Recipe>, AppError> {
        let recipe = self
            .collection
            .find_one(doc! { "_id": id.to_string() })
            .await?;
        Ok(recipe)
    }

    async fn insert(&self, recipe: &Recipe) -> Result<(), AppError> {
        self.collection.insert_one(recipe).await?;
        Ok(())
    }

    async fn update(&self, id: Uuid, draft: &RecipeDraft) -> Result<bool, AppError> {
        // id and publishedAt are immutable; only the four draft fields are
        // ever overwritten.
        let update = doc! { "$set": {
            "name": draft.name.clone(),
            "tags": draft.tags.clone(),
            "ingredients": draft.ingredients.clone(),
            "instructions": draft.instructions.clone(),
        }};

        let result = self
            .collection
            .update_one(doc! { "_id": id.to_string() }, update)
            .await?;
        Ok(result.matched_count > 0)
    }

    async fn delete(&self, id: Uuid) -> Result<bool, AppError> {
        let result = self
            .collection
            .delete_one(doc! { "_id": id.to_string() })
            .await?;
        Ok(result.deleted_count > 0)
    }
}

/// Mongo-backed implementation of the `UserStore` trait
#[derive(Clone)]
pub struct MongoUserStore {
    collection: Collection<UserRecord>,
}

impl MongoUserStore {
    pub fn new(database: &Database) -> Self {
        Self {
            collection: database.collection("users"),
        }
    }
}

#[async_trait]
impl UserStore for MongoUserStore {
    async fn find_by_username(&self, username: &str) -> Result<Option<UserRecord>, AppError> {
        let user = self
            .collection
            .find_one(doc! { "username": username })
            .await?;
        Ok(user)
    }

    async fn insert(&self, user: &UserRecord) -> Result<(), AppError> {
        self.collection.insert_one(user).await?;
        Ok(())
    }
}

// ================
// common/src/lib.rs
// ================
//! Shared wire types for the recipes API.
//!
//! These structs are serialized both into HTTP JSON bodies and into the
//! document store, so field renames here define the wire format in both
//! places (`_id` for the store's primary key, `publishedAt` to match the
//! published JSON contract).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A stored recipe.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recipe {
    /// Immutable identifier, assigned by the server at creation.
    #[serde(rename = "_id")]
    pub id: Uuid,
    pub name: String,
    pub tags: Vec<String>,
    pub ingredients: Vec<String>,
    pub instructions: Vec<String>,
    /// Set once at creation, never mutated afterwards.
    #[serde(rename = "publishedAt")]
    pub published_at: DateTime<Utc>,
}

impl Recipe {
    /// Materialize a client draft into a stored recipe, assigning the
    /// identifier and publication timestamp.
    pub fn from_draft(draft: RecipeDraft) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: draft.name,
            tags: draft.tags,
            ingredients: draft.ingredients,
            instructions: draft.instructions,
            published_at: Utc::now(),
        }
    }
}

/// Client payload for creating or updating a recipe.
///
/// Absent fields default to empty, matching the lenient binding of the
/// original API; the only hard requirement is a well-formed JSON body.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RecipeDraft {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub ingredients: Vec<String>,
    #[serde(default)]
    pub instructions: Vec<String>,
}

/// Sign-up / sign-in request body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

/// A freshly minted bearer token together with its absolute expiry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenPair {
    pub token: String,
    pub expires: DateTime<Utc>,
}

/// Plain acknowledgment body for mutations that do not echo the resource.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ack {
    pub message: String,
}

impl Ack {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

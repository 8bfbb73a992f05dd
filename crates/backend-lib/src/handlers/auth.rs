// ============================
// crates/backend-lib/src/handlers/auth.rs
// ============================
//! Sign-up, sign-in, and token refresh endpoints.
use axum::{
    extract::{rejection::JsonRejection, State},
    Extension, Json,
};

use crate::{auth::Claims, error::AppError, AppState};
use recipes_common::{Credentials, TokenPair};

/// `POST /signup`
pub async fn sign_up(
    State(state): State<AppState>,
    payload: Result<Json<Credentials>, JsonRejection>,
) -> Result<Json<TokenPair>, AppError> {
    let Json(credentials) = payload.map_err(|e| AppError::Validation(e.body_text()))?;
    let pair = state.auth.sign_up(&credentials).await?;
    Ok(Json(pair))
}

/// `POST /signin`
pub async fn sign_in(
    State(state): State<AppState>,
    payload: Result<Json<Credentials>, JsonRejection>,
) -> Result<Json<TokenPair>, AppError> {
    let Json(credentials) = payload.map_err(|e| AppError::Validation(e.body_text()))?;
    let pair = state.auth.sign_in(&credentials).await?;
    Ok(Json(pair))
}

/// `POST /refresh`
///
/// Runs behind the auth middleware: the claims in the request extensions
/// have already passed signature and expiry checks, so only the grace
/// window is decided here.
pub async fn refresh(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
) -> Result<Json<TokenPair>, AppError> {
    let pair = state.auth.refresh(&claims)?;
    Ok(Json(pair))
}

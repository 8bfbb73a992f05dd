// ============================
// crates/backend-lib/src/router.rs
// ============================
//! Route table and middleware wiring.
use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::handlers::{auth, recipes};
use crate::middleware::require_auth;
use crate::AppState;

/// Assemble the application router.
///
/// Public surface: sign-up, sign-in, and the cached listing. Everything
/// else sits behind the bearer-token gate.
pub fn create_router(state: AppState) -> Router {
    let protected = Router::new()
        .route("/refresh", post(auth::refresh))
        .route("/recipes", post(recipes::create))
        .route("/recipes/search", get(recipes::search))
        .route(
            "/recipes/{id}",
            get(recipes::get_one)
                .put(recipes::update)
                .delete(recipes::delete),
        )
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            require_auth,
        ));

    Router::new()
        .route("/signup", post(auth::sign_up))
        .route("/signin", post(auth::sign_in))
        .route("/recipes", get(recipes::list))
        .merge(protected)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

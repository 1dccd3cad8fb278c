//! Admin API: operator-facing status and reload triggers.
//!
//! Authorization is a bearer token checked in middleware; whoever holds the
//! token is the admin identity. The reload endpoint always answers with an
//! explicit changed/unchanged result, never silence.

pub mod auth;
pub mod handlers;

use axum::{
    middleware,
    routing::{get, post},
    Router,
};

use self::auth::admin_auth_middleware;
use self::handlers::{get_keywords, get_status, post_reload};
use crate::http::server::AppState;

pub fn admin_router(state: AppState) -> Router {
    Router::new()
        .route("/admin/status", get(get_status))
        .route("/admin/keywords", get(get_keywords))
        .route("/admin/reload", post(post_reload))
        .layer(middleware::from_fn_with_state(
            state.clone(),
            admin_auth_middleware,
        ))
        .with_state(state)
}

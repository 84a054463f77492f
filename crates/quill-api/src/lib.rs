pub mod comments;
pub mod credentials;
pub mod error;
pub mod guard;
pub mod mailer;
pub mod middleware;
pub mod pagination;
pub mod posts;
pub mod strings;
mod timestamps;
pub mod users;
pub mod validate;
pub mod verification;
pub mod views;

use std::sync::Arc;

use axum::{
    Router,
    routing::{get, patch, post},
};

use quill_db::Database;

use crate::mailer::Mailer;

pub type AppState = Arc<AppStateInner>;

pub struct AppStateInner {
    pub db: Database,
    pub mailer: Mailer,
}

/// The production router. Tests mount the same thing on an ephemeral port so
/// there is no drift between what ships and what gets exercised.
pub fn router(state: AppState) -> Router {
    let public_routes = Router::new()
        .route("/users/register", post(users::register))
        .route("/users/login", post(users::login))
        .route("/users/activate", get(users::activate))
        .with_state(state.clone());

    let protected_routes = Router::new()
        .route("/users/logout", post(users::logout))
        .route("/users/{id}", get(users::get_user))
        .route("/posts", get(posts::get_paginated).post(posts::create))
        .route(
            "/posts/{id}",
            get(posts::get_singular)
                .patch(posts::update)
                .delete(posts::delete),
        )
        .route(
            "/posts/{id}/comments",
            get(comments::get_paginated).post(comments::create),
        )
        .route(
            "/posts/{id}/comments/{comment_id}",
            patch(comments::update).delete(comments::delete),
        )
        .layer(axum::middleware::from_fn_with_state(
            state.clone(),
            middleware::require_auth,
        ))
        .with_state(state);

    Router::new().merge(public_routes).merge(protected_routes)
}

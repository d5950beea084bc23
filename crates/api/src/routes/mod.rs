pub mod auth;
pub mod categories;
pub mod health;
pub mod notes;

use axum::Router;

use crate::state::AppState;

/// Build the `/api` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /auth/register                 register (public)
/// /auth/login                    login (public)
/// /auth/refresh                  refresh (public)
/// /auth/logout                   logout (requires auth)
/// /auth/me                       profile (requires auth)
///
/// /categories                    list, create
/// /categories/{id}               get, update, delete
/// /categories/seed_defaults      idempotent starter-set seeding (POST)
///
/// /notes                         list (?category=&limit=&offset=), create
/// /notes/{id}                    get, update, delete
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/auth", auth::router())
        .nest("/categories", categories::router())
        .nest("/notes", notes::router())
}

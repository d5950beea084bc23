//! Route definitions for the `/categories` resource.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::categories;
use crate::state::AppState;

/// Routes mounted at `/categories` (all require auth).
///
/// ```text
/// GET    /               -> list_categories
/// POST   /               -> create_category
/// POST   /seed_defaults  -> seed_defaults
/// GET    /{id}           -> get_category
/// PATCH  /{id}           -> update_category
/// DELETE /{id}           -> delete_category
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(categories::list_categories).post(categories::create_category),
        )
        .route("/seed_defaults", post(categories::seed_defaults))
        .route(
            "/{id}",
            get(categories::get_category)
                .patch(categories::update_category)
                .delete(categories::delete_category),
        )
}

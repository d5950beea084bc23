//! Route definitions for the `/notes` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::notes;
use crate::state::AppState;

/// Routes mounted at `/notes` (all require auth).
///
/// ```text
/// GET    /      -> list_notes (?category=&limit=&offset=)
/// POST   /      -> create_note
/// GET    /{id}  -> get_note
/// PATCH  /{id}  -> update_note
/// DELETE /{id}  -> delete_note
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(notes::list_notes).post(notes::create_note))
        .route(
            "/{id}",
            get(notes::get_note)
                .patch(notes::update_note)
                .delete(notes::delete_note),
        )
}

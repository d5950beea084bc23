//! Shared query parameter types for API handlers.

use serde::Deserialize;

use quillpad_core::types::DbId;

/// Query parameters for the note listing (`?category=&limit=&offset=`).
///
/// `limit`/`offset` are clamped in the repository layer.
#[derive(Debug, Deserialize)]
pub struct NoteListParams {
    /// Restrict to notes with this category id.
    pub category: Option<DbId>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

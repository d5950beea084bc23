//! Note model and DTOs.

use serde::{Deserialize, Deserializer, Serialize};
use sqlx::FromRow;

use quillpad_core::types::{DbId, Timestamp};

/// A note joined with its category's name and color.
///
/// The category fields are `None` when the note is uncategorized (or its
/// category was deleted, which clears the reference).
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct NoteWithCategory {
    pub id: DbId,
    pub title: String,
    pub content: String,
    pub category_id: Option<DbId>,
    pub category_name: Option<String>,
    pub category_color: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a new note. Title and content default to empty.
/// The owning user always comes from the authenticated identity.
#[derive(Debug, Deserialize)]
pub struct CreateNote {
    pub title: Option<String>,
    pub content: Option<String>,
    #[serde(alias = "category")]
    pub category_id: Option<DbId>,
}

/// DTO for partially updating a note.
///
/// `category_id` is tri-state: absent leaves the reference alone, `null`
/// clears it, an id re-points it (after an ownership check).
#[derive(Debug, Default, Deserialize)]
pub struct UpdateNote {
    pub title: Option<String>,
    pub content: Option<String>,
    #[serde(
        default,
        alias = "category",
        deserialize_with = "deserialize_explicit_null"
    )]
    pub category_id: Option<Option<DbId>>,
}

/// Deserialize a present field (possibly `null`) into `Some(inner)`,
/// so `#[serde(default)]` keeps absence as `None`.
fn deserialize_explicit_null<'de, D>(deserializer: D) -> Result<Option<Option<DbId>>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<DbId>::deserialize(deserializer).map(Some)
}

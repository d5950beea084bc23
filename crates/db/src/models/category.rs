//! Category model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use quillpad_core::types::{DbId, Timestamp};

/// A raw row from the `categories` table.
///
/// Internal to the persistence layer; API responses use
/// [`CategoryWithCount`], which carries the live note count and omits
/// `user_id`.
#[derive(Debug, Clone, FromRow)]
pub struct Category {
    pub id: DbId,
    pub user_id: DbId,
    pub name: String,
    pub color: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// A category annotated with the number of notes referencing it.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct CategoryWithCount {
    pub id: DbId,
    pub name: String,
    pub color: String,
    pub notes_count: i64,
    pub created_at: Timestamp,
}

/// DTO for creating a new category. The owning user is never part of the
/// payload; it comes from the authenticated identity.
#[derive(Debug, Deserialize)]
pub struct CreateCategory {
    pub name: String,
    pub color: Option<String>,
}

/// DTO for updating a category.
#[derive(Debug, Deserialize)]
pub struct UpdateCategory {
    pub name: Option<String>,
    pub color: Option<String>,
}

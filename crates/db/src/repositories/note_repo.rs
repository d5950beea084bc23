//! Repository for the `notes` table.
//!
//! Scoped like `CategoryRepo`: the owning user is a predicate in every
//! query. Reads and writes return the note joined with its category's
//! name and color so handlers answer in one round trip.

use sqlx::PgPool;

use quillpad_core::types::DbId;

use crate::models::note::{CreateNote, NoteWithCategory, UpdateNote};
use crate::repositories::{clamp_limit, clamp_offset};

/// Joined column list shared across queries.
const COLUMNS: &str = "n.id, n.title, n.content, n.category_id, \
                       c.name AS category_name, c.color AS category_color, \
                       n.created_at, n.updated_at";

/// Provides user-scoped CRUD operations for notes.
pub struct NoteRepo;

impl NoteRepo {
    /// List a user's notes, most recently updated first.
    ///
    /// `category` further restricts to notes with that category id. The
    /// base predicate already scopes to the user, so a filter value owned
    /// by someone else simply matches nothing.
    pub async fn list_for_user(
        pool: &PgPool,
        user_id: DbId,
        category: Option<DbId>,
        limit: Option<i64>,
        offset: Option<i64>,
    ) -> Result<Vec<NoteWithCategory>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS}
             FROM notes n
             LEFT JOIN categories c ON c.id = n.category_id
             WHERE n.user_id = $1
               AND ($2::BIGINT IS NULL OR n.category_id = $2)
             ORDER BY n.updated_at DESC
             LIMIT $3 OFFSET $4"
        );
        sqlx::query_as::<_, NoteWithCategory>(&query)
            .bind(user_id)
            .bind(category)
            .bind(clamp_limit(limit))
            .bind(clamp_offset(offset))
            .fetch_all(pool)
            .await
    }

    /// Count a user's notes under the same filter as [`Self::list_for_user`].
    pub async fn count_for_user(
        pool: &PgPool,
        user_id: DbId,
        category: Option<DbId>,
    ) -> Result<i64, sqlx::Error> {
        let (count,): (i64,) = sqlx::query_as(
            "SELECT COUNT(*) FROM notes
             WHERE user_id = $1
               AND ($2::BIGINT IS NULL OR category_id = $2)",
        )
        .bind(user_id)
        .bind(category)
        .fetch_one(pool)
        .await?;
        Ok(count)
    }

    /// Find one of the user's notes by id.
    ///
    /// Returns `None` both when the id does not exist and when the note
    /// belongs to a different user.
    pub async fn find_for_user(
        pool: &PgPool,
        user_id: DbId,
        id: DbId,
    ) -> Result<Option<NoteWithCategory>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS}
             FROM notes n
             LEFT JOIN categories c ON c.id = n.category_id
             WHERE n.user_id = $1 AND n.id = $2"
        );
        sqlx::query_as::<_, NoteWithCategory>(&query)
            .bind(user_id)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Create a note for the user, returning it joined with its category.
    ///
    /// Category ownership must already be validated by the caller; this
    /// method only persists.
    pub async fn create(
        pool: &PgPool,
        user_id: DbId,
        input: &CreateNote,
    ) -> Result<NoteWithCategory, sqlx::Error> {
        let query = format!(
            "WITH n AS (
                 INSERT INTO notes (user_id, title, content, category_id)
                 VALUES ($1, COALESCE($2, ''), COALESCE($3, ''), $4)
                 RETURNING *
             )
             SELECT {COLUMNS}
             FROM n
             LEFT JOIN categories c ON c.id = n.category_id"
        );
        sqlx::query_as::<_, NoteWithCategory>(&query)
            .bind(user_id)
            .bind(&input.title)
            .bind(&input.content)
            .bind(input.category_id)
            .fetch_one(pool)
            .await
    }

    /// Partially update one of the user's notes.
    ///
    /// `title`/`content` apply when present; the category reference is
    /// re-pointed or cleared only when `category_id` was explicitly sent.
    /// `updated_at` advances on every successful update. Returns `None`
    /// when the id is absent or owned by another user.
    pub async fn update_for_user(
        pool: &PgPool,
        user_id: DbId,
        id: DbId,
        input: &UpdateNote,
    ) -> Result<Option<NoteWithCategory>, sqlx::Error> {
        let query = format!(
            "WITH n AS (
                 UPDATE notes SET
                     title = COALESCE($3, title),
                     content = COALESCE($4, content),
                     category_id = CASE WHEN $5 THEN $6 ELSE category_id END,
                     updated_at = NOW()
                 WHERE user_id = $1 AND id = $2
                 RETURNING *
             )
             SELECT {COLUMNS}
             FROM n
             LEFT JOIN categories c ON c.id = n.category_id"
        );
        sqlx::query_as::<_, NoteWithCategory>(&query)
            .bind(user_id)
            .bind(id)
            .bind(&input.title)
            .bind(&input.content)
            .bind(input.category_id.is_some())
            .bind(input.category_id.flatten())
            .fetch_optional(pool)
            .await
    }

    /// Delete one of the user's notes. Returns `true` if a row was deleted.
    pub async fn delete_for_user(
        pool: &PgPool,
        user_id: DbId,
        id: DbId,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM notes WHERE user_id = $1 AND id = $2")
            .bind(user_id)
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}

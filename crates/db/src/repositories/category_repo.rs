//! Repository for the `categories` table.
//!
//! Every query here is scoped to the owning user: the `user_id` predicate
//! is part of the SQL, so a category id belonging to another user behaves
//! exactly like a nonexistent one.

use sqlx::PgPool;

use quillpad_core::types::DbId;

use crate::models::category::{Category, CategoryWithCount, CreateCategory, UpdateCategory};

/// Provides user-scoped CRUD operations for categories.
pub struct CategoryRepo;

impl CategoryRepo {
    /// List a user's categories ordered by name ascending, each annotated
    /// with a live count of referencing notes.
    pub async fn list_for_user(
        pool: &PgPool,
        user_id: DbId,
    ) -> Result<Vec<CategoryWithCount>, sqlx::Error> {
        sqlx::query_as::<_, CategoryWithCount>(
            "SELECT c.id, c.name, c.color, COUNT(n.id) AS notes_count, c.created_at
             FROM categories c
             LEFT JOIN notes n ON n.category_id = c.id
             WHERE c.user_id = $1
             GROUP BY c.id
             ORDER BY c.name ASC",
        )
        .bind(user_id)
        .fetch_all(pool)
        .await
    }

    /// Find one of the user's categories by id, with its note count.
    ///
    /// Returns `None` both when the id does not exist and when it belongs
    /// to a different user; callers cannot tell the cases apart.
    pub async fn find_for_user(
        pool: &PgPool,
        user_id: DbId,
        id: DbId,
    ) -> Result<Option<CategoryWithCount>, sqlx::Error> {
        sqlx::query_as::<_, CategoryWithCount>(
            "SELECT c.id, c.name, c.color, COUNT(n.id) AS notes_count, c.created_at
             FROM categories c
             LEFT JOIN notes n ON n.category_id = c.id
             WHERE c.user_id = $1 AND c.id = $2
             GROUP BY c.id",
        )
        .bind(user_id)
        .bind(id)
        .fetch_optional(pool)
        .await
    }

    /// Resolve the raw category row if it exists and belongs to the user.
    ///
    /// Used by the note handlers to validate category ownership before
    /// persisting a note.
    pub async fn resolve_owned(
        pool: &PgPool,
        user_id: DbId,
        id: DbId,
    ) -> Result<Option<Category>, sqlx::Error> {
        sqlx::query_as::<_, Category>(
            "SELECT id, user_id, name, color, created_at, updated_at
             FROM categories
             WHERE user_id = $1 AND id = $2",
        )
        .bind(user_id)
        .bind(id)
        .fetch_optional(pool)
        .await
    }

    /// Find one of the user's categories by name.
    pub async fn find_by_name(
        pool: &PgPool,
        user_id: DbId,
        name: &str,
    ) -> Result<Option<CategoryWithCount>, sqlx::Error> {
        sqlx::query_as::<_, CategoryWithCount>(
            "SELECT c.id, c.name, c.color, COUNT(n.id) AS notes_count, c.created_at
             FROM categories c
             LEFT JOIN notes n ON n.category_id = c.id
             WHERE c.user_id = $1 AND c.name = $2
             GROUP BY c.id",
        )
        .bind(user_id)
        .bind(name)
        .fetch_optional(pool)
        .await
    }

    /// Create a new category for the user, returning the created row.
    ///
    /// A fresh category has no notes, so `notes_count` is zero by
    /// construction. A duplicate (user, name) pair fails with a unique
    /// violation on `uq_categories_user_name`.
    pub async fn create(
        pool: &PgPool,
        user_id: DbId,
        input: &CreateCategory,
    ) -> Result<CategoryWithCount, sqlx::Error> {
        sqlx::query_as::<_, CategoryWithCount>(
            "INSERT INTO categories (user_id, name, color)
             VALUES ($1, $2, COALESCE($3, '#F5C4A1'))
             RETURNING id, name, color, 0::BIGINT AS notes_count, created_at",
        )
        .bind(user_id)
        .bind(&input.name)
        .bind(&input.color)
        .fetch_one(pool)
        .await
    }

    /// Fetch the user's category with the given name, creating it with the
    /// given color if absent. Returns the row and whether it was created.
    ///
    /// Concurrency-safe: the insert uses `ON CONFLICT DO NOTHING` against
    /// the storage-level uniqueness constraint, so two simultaneous calls
    /// cannot produce duplicates. Losing the race is treated as "already
    /// exists" and the lookup is retried once.
    pub async fn get_or_create(
        pool: &PgPool,
        user_id: DbId,
        name: &str,
        color: &str,
    ) -> Result<(CategoryWithCount, bool), sqlx::Error> {
        if let Some(existing) = Self::find_by_name(pool, user_id, name).await? {
            return Ok((existing, false));
        }

        let inserted = sqlx::query_as::<_, CategoryWithCount>(
            "INSERT INTO categories (user_id, name, color)
             VALUES ($1, $2, $3)
             ON CONFLICT ON CONSTRAINT uq_categories_user_name DO NOTHING
             RETURNING id, name, color, 0::BIGINT AS notes_count, created_at",
        )
        .bind(user_id)
        .bind(name)
        .bind(color)
        .fetch_optional(pool)
        .await?;

        match inserted {
            Some(category) => Ok((category, true)),
            // Another request created it between the lookup and the insert.
            None => {
                tracing::debug!(user_id, name, "lost seeding race, retrying lookup");
                let existing = Self::find_by_name(pool, user_id, name)
                    .await?
                    .ok_or(sqlx::Error::RowNotFound)?;
                Ok((existing, false))
            }
        }
    }

    /// Update one of the user's categories. Only non-`None` fields apply.
    ///
    /// Returns `None` when the id is absent or owned by another user.
    pub async fn update_for_user(
        pool: &PgPool,
        user_id: DbId,
        id: DbId,
        input: &UpdateCategory,
    ) -> Result<Option<CategoryWithCount>, sqlx::Error> {
        sqlx::query_as::<_, CategoryWithCount>(
            "WITH updated AS (
                 UPDATE categories SET
                     name = COALESCE($3, name),
                     color = COALESCE($4, color),
                     updated_at = NOW()
                 WHERE user_id = $1 AND id = $2
                 RETURNING id, name, color, created_at
             )
             SELECT u.id, u.name, u.color, COUNT(n.id) AS notes_count, u.created_at
             FROM updated u
             LEFT JOIN notes n ON n.category_id = u.id
             GROUP BY u.id, u.name, u.color, u.created_at",
        )
        .bind(user_id)
        .bind(id)
        .bind(&input.name)
        .bind(&input.color)
        .fetch_optional(pool)
        .await
    }

    /// Delete one of the user's categories. Returns `true` if a row was
    /// deleted.
    ///
    /// Referencing notes survive: the `ON DELETE SET NULL` foreign key
    /// clears their category reference at the storage layer.
    pub async fn delete_for_user(
        pool: &PgPool,
        user_id: DbId,
        id: DbId,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM categories WHERE user_id = $1 AND id = $2")
            .bind(user_id)
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}

//! Handlers for the `/categories` resource.
//!
//! Every operation is scoped to the authenticated user: listings only
//! show the caller's rows, and a category id owned by someone else is
//! indistinguishable from a missing one.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde::Serialize;

use quillpad_core::categories::{validate_category_name, validate_color, DEFAULT_CATEGORIES};
use quillpad_core::error::CoreError;
use quillpad_core::types::DbId;
use quillpad_db::models::category::{CategoryWithCount, CreateCategory, UpdateCategory};
use quillpad_db::repositories::CategoryRepo;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// Response body for `POST /categories/seed_defaults`.
#[derive(Debug, Serialize)]
pub struct SeedDefaultsResponse {
    pub message: String,
    /// Newly created categories only; pre-existing ones are omitted.
    pub created: Vec<CategoryWithCount>,
}

/// GET /api/categories
///
/// List the caller's categories ordered by name, each with a live note
/// count. Unpaginated: the per-user cardinality is expected to be small.
pub async fn list_categories(
    auth: AuthUser,
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    let categories = CategoryRepo::list_for_user(&state.pool, auth.user_id).await?;
    Ok(Json(DataResponse { data: categories }))
}

/// POST /api/categories
///
/// Create a category for the caller. The owning user always comes from
/// the authenticated identity, never from the payload. A duplicate name
/// within the account is a validation failure.
pub async fn create_category(
    auth: AuthUser,
    State(state): State<AppState>,
    Json(input): Json<CreateCategory>,
) -> AppResult<impl IntoResponse> {
    validate_category_name(&input.name)
        .map_err(|e| AppError::Core(CoreError::Validation(e)))?;
    if let Some(ref color) = input.color {
        validate_color(color).map_err(|e| AppError::Core(CoreError::Validation(e)))?;
    }

    let category = CategoryRepo::create(&state.pool, auth.user_id, &input)
        .await
        .map_err(|e| {
            if quillpad_db::is_unique_violation(&e, "uq_categories_user_name") {
                AppError::Core(CoreError::Validation(
                    "You already have a category with this name".into(),
                ))
            } else {
                AppError::Database(e)
            }
        })?;

    tracing::info!(
        user_id = auth.user_id,
        category_id = category.id,
        name = %category.name,
        "Category created"
    );

    Ok((StatusCode::CREATED, Json(DataResponse { data: category })))
}

/// GET /api/categories/{id}
///
/// Get one of the caller's categories.
pub async fn get_category(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let category = CategoryRepo::find_for_user(&state.pool, auth.user_id, id)
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::NotFound {
                entity: "Category",
                id,
            })
        })?;

    Ok(Json(DataResponse { data: category }))
}

/// PATCH /api/categories/{id}
///
/// Update one of the caller's categories. Only supplied fields change.
pub async fn update_category(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateCategory>,
) -> AppResult<impl IntoResponse> {
    if let Some(ref name) = input.name {
        validate_category_name(name).map_err(|e| AppError::Core(CoreError::Validation(e)))?;
    }
    if let Some(ref color) = input.color {
        validate_color(color).map_err(|e| AppError::Core(CoreError::Validation(e)))?;
    }

    let category = CategoryRepo::update_for_user(&state.pool, auth.user_id, id, &input)
        .await
        .map_err(|e| {
            if quillpad_db::is_unique_violation(&e, "uq_categories_user_name") {
                AppError::Core(CoreError::Validation(
                    "You already have a category with this name".into(),
                ))
            } else {
                AppError::Database(e)
            }
        })?
        .ok_or_else(|| {
            AppError::Core(CoreError::NotFound {
                entity: "Category",
                id,
            })
        })?;

    tracing::info!(user_id = auth.user_id, category_id = id, "Category updated");

    Ok(Json(DataResponse { data: category }))
}

/// DELETE /api/categories/{id}
///
/// Delete one of the caller's categories. Referencing notes survive with
/// their category reference cleared.
pub async fn delete_category(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let deleted = CategoryRepo::delete_for_user(&state.pool, auth.user_id, id).await?;

    if !deleted {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "Category",
            id,
        }));
    }

    tracing::info!(user_id = auth.user_id, category_id = id, "Category deleted");

    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/categories/seed_defaults
///
/// Idempotently ensure the starter categories exist for the caller.
/// Reports only the ones this call actually created; calling again once
/// all three exist creates nothing.
pub async fn seed_defaults(
    auth: AuthUser,
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    let mut created = Vec::new();
    for default in DEFAULT_CATEGORIES {
        let (category, was_created) =
            CategoryRepo::get_or_create(&state.pool, auth.user_id, default.name, default.color)
                .await?;
        if was_created {
            created.push(category);
        }
    }

    tracing::info!(
        user_id = auth.user_id,
        created = created.len(),
        "Default categories seeded"
    );

    Ok(Json(SeedDefaultsResponse {
        message: format!("Created {} default categories", created.len()),
        created,
    }))
}

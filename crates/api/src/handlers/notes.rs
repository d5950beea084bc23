//! Handlers for the `/notes` resource.
//!
//! Scoped like the category handlers. The one cross-entity rule lives
//! here: a note's category must belong to the note's owner, checked
//! before anything is persisted.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;

use quillpad_core::error::CoreError;
use quillpad_core::notes::validate_note_title;
use quillpad_core::types::DbId;
use quillpad_db::models::note::{CreateNote, UpdateNote};
use quillpad_db::repositories::{clamp_limit, clamp_offset, CategoryRepo, NoteRepo};

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::query::NoteListParams;
use crate::response::{DataResponse, PagedResponse};
use crate::state::AppState;

/// Reject a category id that does not resolve within the caller's scope.
///
/// Covers both "someone else's category" and "no such category" with a
/// single message; the distinction is never revealed.
async fn ensure_category_owned(
    state: &AppState,
    user_id: DbId,
    category_id: DbId,
) -> AppResult<()> {
    let owned = CategoryRepo::resolve_owned(&state.pool, user_id, category_id).await?;
    if owned.is_none() {
        return Err(AppError::Core(CoreError::Validation(
            "Category does not belong to you".into(),
        )));
    }
    Ok(())
}

/// GET /api/notes?category=&limit=&offset=
///
/// List the caller's notes, most recently updated first. A `category`
/// value owned by another user matches nothing and yields an empty page.
pub async fn list_notes(
    auth: AuthUser,
    State(state): State<AppState>,
    Query(params): Query<NoteListParams>,
) -> AppResult<impl IntoResponse> {
    let notes = NoteRepo::list_for_user(
        &state.pool,
        auth.user_id,
        params.category,
        params.limit,
        params.offset,
    )
    .await?;
    let total = NoteRepo::count_for_user(&state.pool, auth.user_id, params.category).await?;

    Ok(Json(PagedResponse {
        data: notes,
        total,
        limit: clamp_limit(params.limit),
        offset: clamp_offset(params.offset),
    }))
}

/// POST /api/notes
///
/// Create a note for the caller. If a category is supplied it must belong
/// to the caller; the check happens before the insert and a violation is
/// a validation failure, never a silent correction.
pub async fn create_note(
    auth: AuthUser,
    State(state): State<AppState>,
    Json(input): Json<CreateNote>,
) -> AppResult<impl IntoResponse> {
    if let Some(ref title) = input.title {
        validate_note_title(title).map_err(|e| AppError::Core(CoreError::Validation(e)))?;
    }
    if let Some(category_id) = input.category_id {
        ensure_category_owned(&state, auth.user_id, category_id).await?;
    }

    let note = NoteRepo::create(&state.pool, auth.user_id, &input).await?;

    tracing::info!(user_id = auth.user_id, note_id = note.id, "Note created");

    Ok((StatusCode::CREATED, Json(DataResponse { data: note })))
}

/// GET /api/notes/{id}
///
/// Get one of the caller's notes. A foreign id is a 404, same as a
/// missing one.
pub async fn get_note(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let note = NoteRepo::find_for_user(&state.pool, auth.user_id, id)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::NotFound { entity: "Note", id }))?;

    Ok(Json(DataResponse { data: note }))
}

/// PATCH /api/notes/{id}
///
/// Partially update one of the caller's notes. Re-pointing the category
/// goes through the same ownership check as creation; sending `null`
/// clears the reference.
pub async fn update_note(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateNote>,
) -> AppResult<impl IntoResponse> {
    if let Some(ref title) = input.title {
        validate_note_title(title).map_err(|e| AppError::Core(CoreError::Validation(e)))?;
    }
    if let Some(Some(category_id)) = input.category_id {
        ensure_category_owned(&state, auth.user_id, category_id).await?;
    }

    let note = NoteRepo::update_for_user(&state.pool, auth.user_id, id, &input)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::NotFound { entity: "Note", id }))?;

    tracing::info!(user_id = auth.user_id, note_id = id, "Note updated");

    Ok(Json(DataResponse { data: note }))
}

/// DELETE /api/notes/{id}
///
/// Delete one of the caller's notes.
pub async fn delete_note(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let deleted = NoteRepo::delete_for_user(&state.pool, auth.user_id, id).await?;

    if !deleted {
        return Err(AppError::Core(CoreError::NotFound { entity: "Note", id }));
    }

    tracing::info!(user_id = auth.user_id, note_id = id, "Note deleted");

    Ok(StatusCode::NO_CONTENT)
}

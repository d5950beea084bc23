//! Shared response envelope types for API handlers.
//!
//! Data endpoints use a `{ "data": ... }` envelope. Use [`DataResponse`]
//! and [`PagedResponse`] instead of ad-hoc `serde_json::json!` blocks to
//! get compile-time type safety and consistent serialization.

use serde::Serialize;

/// Standard `{ "data": T }` response envelope.
///
/// # Example
///
/// ```ignore
/// Ok(Json(DataResponse { data: items }))
/// ```
#[derive(Debug, Serialize)]
pub struct DataResponse<T: Serialize> {
    pub data: T,
}

/// Envelope for paginated listings: the page plus the window that
/// produced it and the unwindowed total.
#[derive(Debug, Serialize)]
pub struct PagedResponse<T: Serialize> {
    pub data: Vec<T>,
    pub total: i64,
    pub limit: i64,
    pub offset: i64,
}

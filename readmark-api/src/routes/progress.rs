/// Reading progress endpoints
///
/// # Endpoints
///
/// - `POST /books-data/` - Record where a user is in a book
/// - `GET /user-books/:user_id/:book_id` - Fetch that record

use crate::{
    app::AppState,
    error::{ApiError, ApiResult},
};
use axum::{
    extract::{Path, State},
    Json,
};
use readmark_shared::{catalog, models::user_book::UpsertUserBook};
use serde::{Deserialize, Serialize};

/// Save progress request
///
/// Only the JSON shape is checked; any integer is stored as given, including
/// negative pages. Omitted fields are stored as null, replacing whatever was
/// there before.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaveProgressRequest {
    pub user_id: i64,

    pub book_id: i64,

    #[serde(default)]
    pub current_page: Option<i64>,

    /// Unix timestamp (seconds)
    #[serde(default)]
    pub last_open_date: Option<i64>,
}

/// Progress response
#[derive(Debug, Serialize)]
pub struct ProgressResponse {
    pub user_id: i64,
    pub book_id: i64,
    pub current_page: Option<i64>,
    pub last_open_date: Option<i64>,
}

/// Record reading progress
///
/// # Endpoint
///
/// ```text
/// POST /books-data/
/// Content-Type: application/json
///
/// { "userId": 1, "bookId": 1, "currentPage": 42, "lastOpenDate": 1735689600 }
/// ```
///
/// # Response
///
/// ```json
/// "success"
/// ```
pub async fn save_progress(
    State(state): State<AppState>,
    Json(req): Json<SaveProgressRequest>,
) -> ApiResult<Json<&'static str>> {
    catalog::save_progress(
        &state.db,
        UpsertUserBook {
            user_id: req.user_id,
            book_id: req.book_id,
            current_page: req.current_page,
            last_open_date: req.last_open_date,
        },
    )
    .await?;

    Ok(Json("success"))
}

/// Fetch reading progress
///
/// # Endpoint
///
/// ```text
/// GET /user-books/:user_id/:book_id
/// ```
///
/// # Response
///
/// ```json
/// { "user_id": 1, "book_id": 1, "current_page": 42, "last_open_date": 1735689600 }
/// ```
///
/// # Errors
///
/// - `404 Not Found`: The user has no progress in this book
pub async fn get_progress(
    State(state): State<AppState>,
    Path((user_id, book_id)): Path<(i64, i64)>,
) -> ApiResult<Json<ProgressResponse>> {
    let progress = catalog::get_progress(&state.db, user_id, book_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("User progress not found".to_string()))?;

    Ok(Json(ProgressResponse {
        user_id: progress.user_id,
        book_id: progress.book_id,
        current_page: progress.current_page,
        last_open_date: progress.last_open_date,
    }))
}

/// Book catalog endpoints
///
/// # Endpoints
///
/// - `POST /books/` - Upload a book
/// - `GET /books/` - List book metadata
/// - `GET /books/:book_id` - Fetch a book with its file contents

use crate::{
    app::AppState,
    error::{ApiError, ApiResult},
};
use axum::{
    extract::{Path, State},
    Json,
};
use readmark_shared::catalog::{self, NewBook};
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Create book request
///
/// Stricter than the JSON shape alone: an empty or overlong title, author or
/// file type and a negative page count are rejected with 422 before anything
/// is stored. An empty title would otherwise produce a file named after the
/// author alone, and an empty file type a file ending in a bare dot.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateBookRequest {
    #[validate(length(min = 1, max = 255, message = "Title must be 1-255 characters"))]
    pub title: String,

    #[validate(length(min = 1, max = 255, message = "Author must be 1-255 characters"))]
    pub author: String,

    /// Book content as text
    pub file: String,

    /// Extension of the stored file (e.g. "txt")
    #[validate(length(min = 1, max = 16, message = "File type must be 1-16 characters"))]
    pub file_type: String,

    /// Cover image content as text
    #[serde(default)]
    pub image: Option<String>,

    #[serde(default)]
    #[validate(range(min = 0, message = "Page count cannot be negative"))]
    pub count_pages: Option<i64>,
}

/// Create book response
#[derive(Debug, Serialize)]
pub struct CreateBookResponse {
    pub message: String,
    pub book_id: i64,
}

/// Book with contents
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BookResponse {
    pub book_id: i64,
    pub title: String,
    pub author: String,
    pub count_pages: Option<i64>,
    pub file_type: String,

    /// Book content
    pub file: String,

    /// Cover image content
    pub image: Option<String>,
}

/// Book list item (metadata only)
#[derive(Debug, Serialize)]
pub struct BookListItem {
    pub book_id: i64,
    pub title: String,
    pub author: String,
    pub count_pages: Option<i64>,

    /// Where the cover is stored; the image itself is not included
    pub image_path: Option<String>,
}

/// Upload a book
///
/// # Endpoint
///
/// ```text
/// POST /books/
/// Content-Type: application/json
///
/// {
///   "title": "T",
///   "author": "A",
///   "file": "hello",
///   "fileType": "txt",
///   "image": "<cover>",
///   "countPages": 12
/// }
/// ```
///
/// # Response
///
/// ```json
/// { "message": "Book created successfully", "book_id": 1 }
/// ```
///
/// # Errors
///
/// - `400 Bad Request`: A book with this author and title already exists
/// - `422 Unprocessable Entity`: Validation failed
/// - `500 Internal Server Error`: Files could not be written
pub async fn create_book(
    State(state): State<AppState>,
    Json(req): Json<CreateBookRequest>,
) -> ApiResult<Json<CreateBookResponse>> {
    req.validate()?;

    let book = catalog::create_book(
        &state.db,
        &state.store,
        NewBook {
            title: req.title,
            author: req.author,
            file: req.file,
            file_type: req.file_type,
            image: req.image,
            count_pages: req.count_pages,
        },
    )
    .await?;

    Ok(Json(CreateBookResponse {
        message: "Book created successfully".to_string(),
        book_id: book.id,
    }))
}

/// Fetch a book with its content and cover
///
/// # Endpoint
///
/// ```text
/// GET /books/:book_id
/// ```
///
/// # Response
///
/// ```json
/// {
///   "bookId": 1,
///   "title": "T",
///   "author": "A",
///   "countPages": null,
///   "fileType": "txt",
///   "file": "hello",
///   "image": null
/// }
/// ```
///
/// # Errors
///
/// - `404 Not Found`: No book with this ID
/// - `500 Internal Server Error`: A stored file is missing or unreadable
pub async fn get_book(
    State(state): State<AppState>,
    Path(book_id): Path<i64>,
) -> ApiResult<Json<BookResponse>> {
    let loaded = catalog::get_book(&state.db, book_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Book not found".to_string()))?;

    Ok(Json(BookResponse {
        book_id: loaded.book.id,
        title: loaded.book.title,
        author: loaded.book.author,
        count_pages: loaded.book.count_pages,
        file_type: loaded.book.file_type,
        file: loaded.file,
        image: loaded.image,
    }))
}

/// List all books without their contents
///
/// # Endpoint
///
/// ```text
/// GET /books/
/// ```
///
/// # Response
///
/// ```json
/// [
///   {
///     "book_id": 1,
///     "title": "T",
///     "author": "A",
///     "count_pages": 12,
///     "image_path": "images/A_T"
///   }
/// ]
/// ```
pub async fn list_books(State(state): State<AppState>) -> ApiResult<Json<Vec<BookListItem>>> {
    let books = catalog::list_books(&state.db).await?;

    let items = books
        .into_iter()
        .map(|book| BookListItem {
            book_id: book.id,
            title: book.title,
            author: book.author,
            count_pages: book.count_pages,
            image_path: book.image_path,
        })
        .collect();

    Ok(Json(items))
}

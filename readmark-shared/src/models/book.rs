/// Book model and database operations
///
/// A book row is catalog metadata plus the on-disk locations of its content
/// file and cover image. The bytes themselves live in the file store.
///
/// # Schema
///
/// ```sql
/// CREATE TABLE books (
///     id INTEGER PRIMARY KEY AUTOINCREMENT,
///     title TEXT NOT NULL,
///     author TEXT NOT NULL,
///     file_path TEXT NOT NULL,
///     file_type TEXT NOT NULL,
///     count_pages INTEGER,
///     image_path TEXT
/// );
/// CREATE UNIQUE INDEX idx_books_author_title ON books (author, title);
/// ```
///
/// Queries that take any SQLite executor accept both `&SqlitePool` and a
/// connection or transaction (`&mut *tx`).

use serde::{Deserialize, Serialize};
use sqlx::{Executor, Sqlite, SqlitePool};

/// Book model
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Book {
    /// Unique book ID
    pub id: i64,

    pub title: String,

    pub author: String,

    /// Location of the content file
    pub file_path: String,

    /// Declared file extension (e.g. "txt", "fb2")
    pub file_type: String,

    pub count_pages: Option<i64>,

    /// Location of the cover image, if one was uploaded
    pub image_path: Option<String>,
}

/// Input for creating a new book row
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateBook {
    pub title: String,
    pub author: String,
    pub file_path: String,
    pub file_type: String,
    pub count_pages: Option<i64>,
    pub image_path: Option<String>,
}

impl Book {
    /// Inserts a new book
    ///
    /// # Errors
    ///
    /// Returns a database error carrying a unique violation when another row
    /// already has the same author and title.
    pub async fn create<'e, E>(executor: E, data: CreateBook) -> Result<Self, sqlx::Error>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        let book = sqlx::query_as::<_, Book>(
            r#"
            INSERT INTO books (title, author, file_path, file_type, count_pages, image_path)
            VALUES (?, ?, ?, ?, ?, ?)
            RETURNING id, title, author, file_path, file_type, count_pages, image_path
            "#,
        )
        .bind(data.title)
        .bind(data.author)
        .bind(data.file_path)
        .bind(data.file_type)
        .bind(data.count_pages)
        .bind(data.image_path)
        .fetch_one(executor)
        .await?;

        Ok(book)
    }

    /// Finds a book by ID
    pub async fn find_by_id(pool: &SqlitePool, id: i64) -> Result<Option<Self>, sqlx::Error> {
        let book = sqlx::query_as::<_, Book>(
            r#"
            SELECT id, title, author, file_path, file_type, count_pages, image_path
            FROM books
            WHERE id = ?
            "#,
        )
        .bind(id)
        .fetch_optional(pool)
        .await?;

        Ok(book)
    }

    /// Finds the book with exactly this author and title
    pub async fn find_by_author_and_title<'e, E>(
        executor: E,
        author: &str,
        title: &str,
    ) -> Result<Option<Self>, sqlx::Error>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        let book = sqlx::query_as::<_, Book>(
            r#"
            SELECT id, title, author, file_path, file_type, count_pages, image_path
            FROM books
            WHERE author = ? AND title = ?
            "#,
        )
        .bind(author)
        .bind(title)
        .fetch_optional(executor)
        .await?;

        Ok(book)
    }

    /// Lists every book in insertion order
    pub async fn list_all(pool: &SqlitePool) -> Result<Vec<Self>, sqlx::Error> {
        let books = sqlx::query_as::<_, Book>(
            r#"
            SELECT id, title, author, file_path, file_type, count_pages, image_path
            FROM books
            ORDER BY id
            "#,
        )
        .fetch_all(pool)
        .await?;

        Ok(books)
    }

    /// Deletes a book row
    ///
    /// Returns whether a row was removed. Only used to undo an upload whose
    /// files could not be written.
    pub async fn delete(pool: &SqlitePool, id: i64) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM books WHERE id = ?")
            .bind(id)
            .execute(pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}

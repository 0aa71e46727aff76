/// Reading progress model
///
/// One row per (user, book) pair holding where the reader stopped and when
/// they last opened the book.
///
/// # Schema
///
/// ```sql
/// CREATE TABLE user_books (
///     user_id INTEGER NOT NULL REFERENCES users (id),
///     book_id INTEGER NOT NULL REFERENCES books (id),
///     current_page INTEGER,
///     last_open_date INTEGER,
///     PRIMARY KEY (user_id, book_id)
/// );
/// ```
///
/// # Example
///
/// ```no_run
/// use readmark_shared::models::user_book::{UpsertUserBook, UserBook};
/// # use sqlx::SqlitePool;
///
/// # async fn example(pool: SqlitePool) -> Result<(), sqlx::Error> {
/// UserBook::upsert(&pool, UpsertUserBook {
///     user_id: 1,
///     book_id: 7,
///     current_page: Some(42),
///     last_open_date: Some(1_735_689_600),
/// }).await?;
///
/// let progress = UserBook::find(&pool, 1, 7).await?;
/// # Ok(())
/// # }
/// ```

use serde::{Deserialize, Serialize};
use sqlx::SqlitePool;

/// Reading position of one user in one book
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct UserBook {
    pub user_id: i64,

    pub book_id: i64,

    pub current_page: Option<i64>,

    /// Unix timestamp (seconds) of the last time the book was opened
    pub last_open_date: Option<i64>,
}

/// Input for recording progress
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpsertUserBook {
    pub user_id: i64,
    pub book_id: i64,
    pub current_page: Option<i64>,
    pub last_open_date: Option<i64>,
}

impl UserBook {
    /// Inserts progress for a new pair or overwrites an existing one
    ///
    /// Both progress fields are always replaced. A `None` clears the stored
    /// value; nothing is merged from the previous row.
    pub async fn upsert(pool: &SqlitePool, data: UpsertUserBook) -> Result<Self, sqlx::Error> {
        let user_book = sqlx::query_as::<_, UserBook>(
            r#"
            INSERT INTO user_books (user_id, book_id, current_page, last_open_date)
            VALUES (?, ?, ?, ?)
            ON CONFLICT (user_id, book_id) DO UPDATE SET
                current_page = excluded.current_page,
                last_open_date = excluded.last_open_date
            RETURNING user_id, book_id, current_page, last_open_date
            "#,
        )
        .bind(data.user_id)
        .bind(data.book_id)
        .bind(data.current_page)
        .bind(data.last_open_date)
        .fetch_one(pool)
        .await?;

        Ok(user_book)
    }

    /// Finds progress by composite key
    pub async fn find(
        pool: &SqlitePool,
        user_id: i64,
        book_id: i64,
    ) -> Result<Option<Self>, sqlx::Error> {
        let user_book = sqlx::query_as::<_, UserBook>(
            r#"
            SELECT user_id, book_id, current_page, last_open_date
            FROM user_books
            WHERE user_id = ? AND book_id = ?
            "#,
        )
        .bind(user_id)
        .bind(book_id)
        .fetch_optional(pool)
        .await?;

        Ok(user_book)
    }
}

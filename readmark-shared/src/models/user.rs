/// User model
///
/// Users are the owners of reading progress. No HTTP endpoint creates them;
/// rows are seeded out of band.
///
/// # Schema
///
/// ```sql
/// CREATE TABLE users (
///     id INTEGER PRIMARY KEY AUTOINCREMENT,
///     username TEXT UNIQUE,
///     password_hash TEXT
/// );
/// ```
///
/// Only the row type lives here. Nothing in the service reads or writes
/// users; they exist as the target of `user_books.user_id`.

use serde::{Deserialize, Serialize};

/// User model representing a reader
///
/// Passwords are never stored in plaintext; `password_hash` holds whatever
/// opaque hash the seeding tool produced.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct User {
    /// Unique user ID
    pub id: i64,

    /// Optional login name, unique when present
    pub username: Option<String>,

    /// Password hash
    #[serde(skip_serializing)]
    pub password_hash: Option<String>,
}

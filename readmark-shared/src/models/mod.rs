/// Database models for Readmark
///
/// Each model owns its row type and the SQL that reads and writes it.
///
/// # Models
///
/// - `user`: Readers (reference target for progress, not exposed over HTTP)
/// - `book`: Catalog entries pointing at stored content and cover files
/// - `user_book`: Per-user reading progress keyed by (user, book)

pub mod book;
pub mod user;
pub mod user_book;

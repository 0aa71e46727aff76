/// Catalog operations
///
/// The data-access layer behind the HTTP API. Each function combines the
/// database models with the file store and holds no state between calls:
/// it borrows a pooled connection, does its work and releases it.
///
/// # Example
///
/// ```no_run
/// use readmark_shared::catalog::{self, NewBook};
/// use readmark_shared::storage::{FileStore, StorageConfig};
/// # use sqlx::SqlitePool;
///
/// # async fn example(pool: SqlitePool) -> Result<(), Box<dyn std::error::Error>> {
/// let store = FileStore::init(StorageConfig::default()).await?;
///
/// let book = catalog::create_book(&pool, &store, NewBook {
///     title: "T".to_string(),
///     author: "A".to_string(),
///     file: "hello".to_string(),
///     file_type: "txt".to_string(),
///     image: None,
///     count_pages: None,
/// }).await?;
///
/// let loaded = catalog::get_book(&pool, book.id).await?;
/// # Ok(())
/// # }
/// ```

use crate::models::book::{Book, CreateBook};
use crate::models::user_book::{UpsertUserBook, UserBook};
use crate::storage::{file_stem, FileStore, StorageError};
use sqlx::SqlitePool;
use std::path::Path;
use thiserror::Error;
use tracing::{debug, info, warn};

/// Catalog operation errors
#[derive(Error, Debug)]
pub enum CatalogError {
    /// A book with the same author and title is already stored
    #[error("Book '{title}' by '{author}' already exists")]
    Duplicate { title: String, author: String },

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// An uploaded book
#[derive(Debug, Clone)]
pub struct NewBook {
    pub title: String,
    pub author: String,

    /// Book content, stored as UTF-8 text
    pub file: String,

    /// File extension for the stored content
    pub file_type: String,

    /// Cover image content, stored as UTF-8 text
    pub image: Option<String>,

    pub count_pages: Option<i64>,
}

/// A book together with the contents of its files
#[derive(Debug, Clone)]
pub struct BookWithContent {
    pub book: Book,
    pub file: String,
    pub image: Option<String>,
}

/// Stores a new book and its files
///
/// A book that already exists is rejected before anything is written. The
/// row is inserted in a single autocommit statement, so concurrent uploads
/// queue on SQLite's write lock instead of failing, and the unique
/// `(author, title)` index turns a lost race into a duplicate. Files are
/// written after the insert with no lock held; if a write fails the row is
/// deleted again. Files written before the failure are left on disk.
///
/// The cover file is only written when an image was supplied; otherwise the
/// row's `image_path` stays empty.
///
/// Two different books can derive the same file name (see
/// [`file_stem`]); the later upload then replaces the earlier one's files.
///
/// # Errors
///
/// - [`CatalogError::Duplicate`] if (author, title) is taken, including when a
///   concurrent upload wins the race to insert
/// - [`CatalogError::Storage`] if a file cannot be written
/// - [`CatalogError::Database`] for any other database failure
pub async fn create_book(
    pool: &SqlitePool,
    store: &FileStore,
    new_book: NewBook,
) -> Result<Book, CatalogError> {
    let duplicate = || {
        warn!(
            title = %new_book.title,
            author = %new_book.author,
            "Rejected duplicate book"
        );
        CatalogError::Duplicate {
            title: new_book.title.clone(),
            author: new_book.author.clone(),
        }
    };

    if Book::find_by_author_and_title(pool, &new_book.author, &new_book.title)
        .await?
        .is_some()
    {
        return Err(duplicate());
    }

    let stem = file_stem(&new_book.author, &new_book.title);
    let file_path = store.book_path(&stem, &new_book.file_type);
    let image_path = new_book.image.as_ref().map(|_| store.image_path(&stem));

    let book = Book::create(
        pool,
        CreateBook {
            title: new_book.title.clone(),
            author: new_book.author.clone(),
            file_path: file_path.to_string_lossy().into_owned(),
            file_type: new_book.file_type.clone(),
            count_pages: new_book.count_pages,
            image_path: image_path
                .as_ref()
                .map(|path| path.to_string_lossy().into_owned()),
        },
    )
    .await
    .map_err(|err| match err {
        sqlx::Error::Database(ref db_err) if db_err.is_unique_violation() => duplicate(),
        other => CatalogError::Database(other),
    })?;

    if let Err(err) = write_files(&file_path, image_path.as_deref(), &new_book).await {
        warn!(book_id = book.id, error = %err, "Removing book after failed write");
        Book::delete(pool, book.id).await?;
        return Err(err.into());
    }

    info!(
        book_id = book.id,
        title = %book.title,
        author = %book.author,
        file_path = %book.file_path,
        "Book created"
    );

    Ok(book)
}

async fn write_files(
    file_path: &Path,
    image_path: Option<&Path>,
    new_book: &NewBook,
) -> Result<(), StorageError> {
    FileStore::write_text(file_path, &new_book.file).await?;

    if let (Some(path), Some(image)) = (image_path, &new_book.image) {
        FileStore::write_text(path, image).await?;
    }

    Ok(())
}

/// Records a user's reading progress in a book
///
/// Creates the row on first report and overwrites both fields afterwards,
/// clearing any field the caller left out. Neither the user nor the book is
/// checked for existence.
pub async fn save_progress(
    pool: &SqlitePool,
    progress: UpsertUserBook,
) -> Result<UserBook, CatalogError> {
    let user_book = UserBook::upsert(pool, progress).await?;

    debug!(
        user_id = user_book.user_id,
        book_id = user_book.book_id,
        current_page = ?user_book.current_page,
        last_open_date = ?user_book.last_open_date,
        "Progress saved"
    );

    Ok(user_book)
}

/// Loads a book and reads its files
///
/// Returns `Ok(None)` when no book has this ID. A row whose files have gone
/// missing yields [`CatalogError::Storage`].
pub async fn get_book(pool: &SqlitePool, id: i64) -> Result<Option<BookWithContent>, CatalogError> {
    let Some(book) = Book::find_by_id(pool, id).await? else {
        debug!(book_id = id, "Book not found");
        return Ok(None);
    };

    let file = FileStore::read_text(Path::new(&book.file_path)).await?;

    let image = match &book.image_path {
        Some(path) => Some(FileStore::read_text(Path::new(path)).await?),
        None => None,
    };

    Ok(Some(BookWithContent { book, file, image }))
}

/// Lists every book's metadata without touching the file store
pub async fn list_books(pool: &SqlitePool) -> Result<Vec<Book>, CatalogError> {
    Ok(Book::list_all(pool).await?)
}

/// Loads one user's progress in one book
pub async fn get_progress(
    pool: &SqlitePool,
    user_id: i64,
    book_id: i64,
) -> Result<Option<UserBook>, CatalogError> {
    Ok(UserBook::find(pool, user_id, book_id).await?)
}

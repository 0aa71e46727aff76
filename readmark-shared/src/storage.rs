/// Local file storage for book content and cover images
///
/// Books and covers are plain text files under two directories chosen at
/// startup. Both are named after the book's author and title, so the same
/// book always maps to the same pair of paths:
///
/// ```text
/// <books_dir>/<Author>_<Title>.<file_type>
/// <images_dir>/<Author>_<Title>
/// ```
///
/// # Example
///
/// ```no_run
/// use readmark_shared::storage::{FileStore, StorageConfig};
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let store = FileStore::init(StorageConfig::default()).await?;
///
/// let stem = readmark_shared::storage::file_stem("Leo Tolstoy", "War and Peace");
/// let path = store.book_path(&stem, "txt");
/// FileStore::write_text(&path, "Well, Prince...").await?;
/// # Ok(())
/// # }
/// ```

use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info};

/// Characters replaced in derived file names besides whitespace
const UNSAFE_CHARS: &[char] = &['/', '\\', ':', '*', '?', '"', '<', '>', '|'];

/// File storage errors
#[derive(Error, Debug)]
pub enum StorageError {
    #[error("failed to create directory {path}: {source}")]
    CreateDir {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Directory layout of the file store
#[derive(Debug, Clone)]
pub struct StorageConfig {
    /// Directory holding book content files
    pub books_dir: PathBuf,

    /// Directory holding cover images
    pub images_dir: PathBuf,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            books_dir: PathBuf::from("books"),
            images_dir: PathBuf::from("images"),
        }
    }
}

/// Handle to the initialized storage directories
///
/// Cheap to clone; holds only the two directory paths.
#[derive(Debug, Clone)]
pub struct FileStore {
    books_dir: PathBuf,
    images_dir: PathBuf,
}

impl FileStore {
    /// Creates both storage directories (if missing) and returns a handle
    ///
    /// Run once at startup, before the server accepts requests.
    pub async fn init(config: StorageConfig) -> Result<Self, StorageError> {
        for dir in [&config.books_dir, &config.images_dir] {
            tokio::fs::create_dir_all(dir)
                .await
                .map_err(|source| StorageError::CreateDir {
                    path: dir.clone(),
                    source,
                })?;
        }

        info!(
            books_dir = %config.books_dir.display(),
            images_dir = %config.images_dir.display(),
            "File store initialized"
        );

        Ok(Self {
            books_dir: config.books_dir,
            images_dir: config.images_dir,
        })
    }

    pub fn books_dir(&self) -> &Path {
        &self.books_dir
    }

    pub fn images_dir(&self) -> &Path {
        &self.images_dir
    }

    /// Path of the content file for `stem` with the given extension
    pub fn book_path(&self, stem: &str, file_type: &str) -> PathBuf {
        self.books_dir
            .join(format!("{}.{}", stem, sanitize(file_type)))
    }

    /// Path of the cover image for `stem`
    pub fn image_path(&self, stem: &str) -> PathBuf {
        self.images_dir.join(stem)
    }

    /// Writes UTF-8 text, replacing any existing file
    pub async fn write_text(path: &Path, content: &str) -> Result<(), StorageError> {
        debug!(path = %path.display(), bytes = content.len(), "Writing file");

        tokio::fs::write(path, content)
            .await
            .map_err(|source| StorageError::Write {
                path: path.to_path_buf(),
                source,
            })
    }

    /// Reads a whole file as UTF-8 text
    pub async fn read_text(path: &Path) -> Result<String, StorageError> {
        debug!(path = %path.display(), "Reading file");

        tokio::fs::read_to_string(path)
            .await
            .map_err(|source| StorageError::Read {
                path: path.to_path_buf(),
                source,
            })
    }
}

/// Derives the shared file name of a book's content and cover
///
/// Author and title are joined by a space, then every space, path separator
/// and other character unsafe in a file name becomes `_`.
///
/// The mapping is not injective: "A B" + "C" and "A" + "B C" are different
/// books with the same stem, so they share files and the later upload
/// overwrites the earlier one's content and cover.
///
/// ```
/// use readmark_shared::storage::file_stem;
///
/// assert_eq!(file_stem("Leo Tolstoy", "War and Peace"), "Leo_Tolstoy_War_and_Peace");
/// ```
pub fn file_stem(author: &str, title: &str) -> String {
    sanitize(&format!("{} {}", author, title))
}

fn sanitize(name: &str) -> String {
    name.chars()
        .map(|c| {
            if c.is_whitespace() || c.is_control() || UNSAFE_CHARS.contains(&c) {
                '_'
            } else {
                c
            }
        })
        .collect()
}

//! # Readmark Shared Library
//!
//! Storage and data-access layers of the Readmark book tracker, used by the
//! API server.
//!
//! ## Module Organization
//!
//! - `db`: Connection pool and migrations
//! - `models`: Row types and their SQL
//! - `storage`: On-disk book content and cover images
//! - `catalog`: Book and reading-progress operations built on the above

pub mod catalog;
pub mod db;
pub mod models;
pub mod storage;

/// Current version of the Readmark shared library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_is_set() {
        assert!(!VERSION.is_empty());
    }
}

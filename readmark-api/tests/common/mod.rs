/// Common test utilities for integration tests
///
/// Each `TestContext` owns a fresh database and a temporary directory for
/// book and cover files, and exposes the full router.

use axum::body::Body;
use axum::http::{Request, StatusCode};
use readmark_api::app::{build_router, AppState};
use readmark_api::config::Config;
use readmark_shared::db::migrations::run_migrations;
use readmark_shared::db::pool::create_pool;
use readmark_shared::storage::FileStore;
use serde_json::Value;
use sqlx::SqlitePool;
use tempfile::TempDir;
use tower::ServiceExt;

/// Test context containing all necessary resources
pub struct TestContext {
    pub db: SqlitePool,
    pub app: axum::Router,
    pub store: FileStore,
    _dir: TempDir,
}

impl TestContext {
    /// Context over a private in-memory database (one connection)
    pub async fn new() -> anyhow::Result<Self> {
        Self::build(false).await
    }

    /// Context over a database file with the default pool size
    pub async fn with_file_database() -> anyhow::Result<Self> {
        Self::build(true).await
    }

    async fn build(file_database: bool) -> anyhow::Result<Self> {
        let dir = TempDir::new()?;

        let books_dir = dir.path().join("books");
        let images_dir = dir.path().join("images");
        let database_url = if file_database {
            format!("sqlite://{}", dir.path().join("books.db").display())
        } else {
            "sqlite::memory:".to_string()
        };
        let config = Config::from_lookup(|key| match key {
            "DATABASE_URL" => Some(database_url.clone()),
            "BOOKS_DIR" => Some(books_dir.display().to_string()),
            "IMAGES_DIR" => Some(images_dir.display().to_string()),
            _ => None,
        })?;

        let db = create_pool(config.pool_config()).await?;
        run_migrations(&db).await?;

        let store = FileStore::init(config.storage.clone()).await?;

        let app = build_router(AppState::new(db.clone(), store.clone(), config));

        Ok(TestContext {
            db,
            app,
            store,
            _dir: dir,
        })
    }

    /// Sends a request and returns the status and parsed JSON body
    pub async fn send(&self, request: Request<Body>) -> (StatusCode, Value) {
        let response = self.app.clone().oneshot(request).await.unwrap();
        let status = response.status();

        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let json = if body.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&body).unwrap_or_else(|_| {
                Value::String(String::from_utf8_lossy(&body).into_owned())
            })
        };

        (status, json)
    }

    pub async fn get(&self, uri: &str) -> (StatusCode, Value) {
        let request = Request::builder()
            .method("GET")
            .uri(uri)
            .body(Body::empty())
            .unwrap();

        self.send(request).await
    }

    pub async fn post_json(&self, uri: &str, body: Value) -> (StatusCode, Value) {
        let request = Request::builder()
            .method("POST")
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap();

        self.send(request).await
    }
}

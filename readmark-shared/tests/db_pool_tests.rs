/// Integration tests for the database connection pool
///
/// Each test uses its own temporary SQLite file or in-memory database, so
/// they need no external services.

use readmark_shared::db::pool::{close_pool, create_pool, health_check, DatabaseConfig};
use sqlx::Row;
use tempfile::TempDir;

fn file_config(dir: &TempDir) -> DatabaseConfig {
    DatabaseConfig {
        url: format!("sqlite://{}", dir.path().join("pool.db").display()),
        max_connections: 3,
        min_connections: 0,
        connect_timeout_seconds: 5,
        ..Default::default()
    }
}

#[tokio::test]
async fn test_create_pool_creates_missing_file() {
    let dir = TempDir::new().unwrap();
    let db_file = dir.path().join("pool.db");
    assert!(!db_file.exists());

    let pool = create_pool(file_config(&dir)).await.expect("Failed to create pool");

    assert!(db_file.exists(), "Database file should be created on connect");

    close_pool(pool).await;
}

#[tokio::test]
async fn test_create_pool_with_unreachable_path() {
    let config = DatabaseConfig {
        url: "sqlite:///nonexistent-readmark-dir/nested/pool.db".to_string(),
        max_connections: 1,
        min_connections: 0,
        connect_timeout_seconds: 2,
        ..Default::default()
    };

    let result = create_pool(config).await;
    assert!(result.is_err(), "Should fail when the parent directory is missing");
}

#[tokio::test]
async fn test_health_check_success() {
    let pool = create_pool(DatabaseConfig::in_memory()).await.unwrap();

    let result = health_check(&pool).await;
    assert!(result.is_ok(), "Health check should succeed");

    close_pool(pool).await;
}

#[tokio::test]
async fn test_pool_query_execution() {
    let dir = TempDir::new().unwrap();
    let pool = create_pool(file_config(&dir)).await.unwrap();

    let row = sqlx::query("SELECT ? AS value, ? AS text")
        .bind(42i64)
        .bind("hello")
        .fetch_one(&pool)
        .await
        .expect("Query should succeed");

    let value: i64 = row.get("value");
    let text: String = row.get("text");

    assert_eq!(value, 42);
    assert_eq!(text, "hello");

    close_pool(pool).await;
}

#[tokio::test]
async fn test_in_memory_pool_keeps_state_between_queries() {
    let pool = create_pool(DatabaseConfig::in_memory()).await.unwrap();

    sqlx::query("CREATE TABLE scratch (id INTEGER PRIMARY KEY)")
        .execute(&pool)
        .await
        .unwrap();
    sqlx::query("INSERT INTO scratch (id) VALUES (1)")
        .execute(&pool)
        .await
        .unwrap();

    let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM scratch")
        .fetch_one(&pool)
        .await
        .unwrap();

    assert_eq!(count, 1);

    close_pool(pool).await;
}

#[tokio::test]
async fn test_close_pool() {
    let pool = create_pool(DatabaseConfig::in_memory()).await.unwrap();
    let pool_clone = pool.clone();

    close_pool(pool).await;

    assert!(pool_clone.is_closed());
    let result = sqlx::query("SELECT 1").fetch_one(&pool_clone).await;
    assert!(result.is_err(), "Query should fail after pool is closed");
}

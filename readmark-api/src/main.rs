//! # Readmark API Server
//!
//! HTTP server for the Readmark book tracker: book upload and retrieval,
//! catalog listing and per-user reading progress.
//!
//! ## Usage
//!
//! ```bash
//! cargo run -p readmark-api
//! ```

use readmark_api::{
    app::{build_router, AppState},
    config::Config,
};
use readmark_shared::{
    db::{
        migrations::run_migrations,
        pool::{close_pool, create_pool},
    },
    storage::FileStore,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "readmark_api=debug,readmark_shared=debug,tower_http=debug".into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!(
        "Readmark API Server v{} starting...",
        env!("CARGO_PKG_VERSION")
    );

    let config = Config::from_env()?;

    let pool = create_pool(config.pool_config()).await?;
    run_migrations(&pool).await?;

    let store = FileStore::init(config.storage.clone()).await?;

    let bind_address = config.bind_address();
    let app = build_router(AppState::new(pool.clone(), store, config));

    let listener = tokio::net::TcpListener::bind(&bind_address).await?;
    tracing::info!("Server listening on http://{}", bind_address);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    close_pool(pool).await;
    tracing::info!("Server stopped");

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        return;
    }
    tracing::info!("Shutdown signal received, exiting...");
}

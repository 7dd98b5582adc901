//! HTTP server initialization and runtime setup.
//!
//! Handles database connections, migrations, ledger setup and the Axum
//! server lifecycle.

use crate::application::services::{AccountService, LinkService, TokenService};
use crate::config::Config;
use crate::domain::repositories::RevocationLedger;
use crate::infrastructure::ledger::{MemoryLedger, RedisLedger};
use crate::infrastructure::persistence::{PgLinkRepository, PgUserRepository};
use crate::routes::app_router;
use crate::state::AppState;

use anyhow::{Context, Result};
use axum::ServiceExt;
use axum::extract::Request;
use sqlx::postgres::PgPoolOptions;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tower::Layer;
use tower_http::normalize_path::NormalizePathLayer;

/// Runs the HTTP server with the given configuration.
///
/// Initializes:
/// - PostgreSQL connection pool and migrations
/// - Revocation ledger (Redis, or process-local without `REDIS_URL`)
/// - Core services and the Axum router
///
/// # Errors
///
/// Returns an error if the database or a configured Redis is unreachable,
/// migrations fail, or the listener cannot bind. A configured-but-down
/// Redis is fatal rather than silently degraded: revocations must not
/// quietly become process-local.
pub async fn run(config: Config) -> Result<()> {
    let pool = PgPoolOptions::new()
        .max_connections(config.db_max_connections)
        .acquire_timeout(Duration::from_secs(config.db_connect_timeout))
        .connect(&config.database_url)
        .await
        .context("Failed to connect to database")?;
    tracing::info!("Connected to database");

    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .context("Failed to migrate")?;

    let ledger: Arc<dyn RevocationLedger> = match &config.redis_url {
        Some(redis_url) => {
            let redis = RedisLedger::connect(redis_url)
                .await
                .map_err(|e| anyhow::anyhow!("Failed to connect to Redis: {e}"))?;
            tracing::info!("Revocation ledger: Redis");
            Arc::new(redis)
        }
        None => {
            tracing::info!("Revocation ledger: in-memory (single process only)");
            Arc::new(MemoryLedger::new())
        }
    };

    let pool = Arc::new(pool);
    let user_repository = Arc::new(PgUserRepository::new(pool.clone()));
    let link_repository = Arc::new(PgLinkRepository::new(pool.clone()));

    let accounts = Arc::new(AccountService::new(user_repository.clone()));
    let tokens = Arc::new(TokenService::new(
        &config.token_signing_secret,
        user_repository,
        ledger,
    ));
    let links = Arc::new(LinkService::new(link_repository));

    let state = AppState::new(accounts, tokens, links);

    let app = NormalizePathLayer::trim_trailing_slash().layer(app_router(state));

    let addr: SocketAddr = config.listen_addr.parse()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Listening on http://{addr}");

    axum::serve(listener, ServiceExt::<Request>::into_make_service(app))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    tokio::signal::ctrl_c()
        .await
        .expect("failed to install Ctrl+C handler");
    tracing::info!("Shutdown signal received");
}

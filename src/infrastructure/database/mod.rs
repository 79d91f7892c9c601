mod postgres_repository;

pub use postgres_repository::create_postgres_repository;

use crate::config::DatabaseConfig;
use anyhow::{Context, Result};
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use std::time::Duration;

/// Delay between connection attempts while the database comes up.
const RETRY_DELAY: Duration = Duration::from_millis(500);

/// Opens the process-scoped connection pool and applies pending migrations.
///
/// Connection failures are retried up to `retry_count` times so the service
/// can start while the database is still warming up. The pool lives for the
/// whole process and is closed when it is dropped at shutdown.
pub async fn init_pool(config: &DatabaseConfig) -> Result<PgPool> {
    // ---
    let mut attempts: u32 = 0;

    let pool = loop {
        let result = PgPoolOptions::new()
            .min_connections(config.min_connections)
            .max_connections(config.max_connections)
            .acquire_timeout(config.acquire_timeout)
            .connect(&config.database_url)
            .await;

        match result {
            Ok(pool) => break pool,
            Err(err) if attempts < config.retry_count => {
                attempts += 1;
                tracing::warn!(
                    "database not ready (attempt {attempts}/{}): {err}",
                    config.retry_count
                );
                tokio::time::sleep(RETRY_DELAY).await;
            }
            Err(err) => {
                return Err(err).context("failed to connect to PostgreSQL");
            }
        }
    };

    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .context("failed to run database migrations")?;

    Ok(pool)
}

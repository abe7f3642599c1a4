//! Embedded schema migrations

use std::time::Duration;

use sqlx::migrate::{Migrate, MigrateError, Migrator};
use sqlx::postgres::{PgPool, PgPoolOptions};
use thiserror::Error;
use tracing::{info, warn};

/// Migrations under `crates/seller-db/migrations`, embedded at build time
pub static MIGRATOR: Migrator = sqlx::migrate!("./migrations");

#[derive(Debug, Error)]
pub enum MigrationError {
    #[error("postgres unreachable after {attempts} attempts: {source}")]
    Unreachable {
        attempts: u32,
        #[source]
        source: sqlx::Error,
    },

    #[error("migration failed: {0}")]
    Migrate(#[from] MigrateError),

    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// Result of a migration run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MigrationOutcome {
    NoChange,
    Applied(usize),
}

/// Connect to `url`, retrying up to `attempts` times `delay` apart, then apply every
/// pending migration.
pub async fn migrate_with_retry(
    url: &str,
    attempts: u32,
    delay: Duration,
) -> Result<MigrationOutcome, MigrationError> {
    let attempts = attempts.max(1);
    let mut left = attempts;

    let pool = loop {
        match connect_once(url).await {
            Ok(pool) => break pool,
            Err(err) => {
                left -= 1;
                if left == 0 {
                    return Err(MigrationError::Unreachable {
                        attempts,
                        source: err,
                    });
                }
                warn!(attempts_left = left, error = %err, "postgres is not ready, retrying");
                tokio::time::sleep(delay).await;
            }
        }
    };

    let outcome = migrate(&pool).await;
    pool.close().await;
    outcome
}

/// Apply pending migrations on an open pool.
pub async fn migrate(pool: &PgPool) -> Result<MigrationOutcome, MigrationError> {
    let pending = pending_count(pool).await?;
    MIGRATOR.run(pool).await?;

    let outcome = match pending {
        0 => MigrationOutcome::NoChange,
        n => MigrationOutcome::Applied(n),
    };
    match outcome {
        MigrationOutcome::NoChange => info!("migrate: no change"),
        MigrationOutcome::Applied(n) => info!(applied = n, "migrate: up success"),
    }
    Ok(outcome)
}

async fn connect_once(url: &str) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(1)
        .acquire_timeout(Duration::from_secs(5))
        .connect(url)
        .await
}

async fn pending_count(pool: &PgPool) -> Result<usize, MigrationError> {
    let mut conn = pool.acquire().await?;
    conn.ensure_migrations_table().await?;
    let applied = conn.list_applied_migrations().await?;

    Ok(MIGRATOR
        .iter()
        .filter(|m| !m.migration_type.is_down_migration())
        .filter(|m| !applied.iter().any(|a| a.version == m.version))
        .count())
}

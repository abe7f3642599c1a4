//! Database connection pool management

use std::time::Duration;

use seller_core::config::PgConfig;
use seller_core::{ErrorContext, RequestContext, StoreResult};
use sqlx::postgres::{PgPool, PgPoolOptions};

use crate::error::map_sqlx;

/// Pool settings
#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    pub url: String,
    /// Upper bound on concurrently open connections
    pub max_connections: u32,
    pub min_connections: u32,
    /// How long an operation waits for a free connection
    pub acquire_timeout: Duration,
}

impl DatabaseConfig {
    pub fn with_url(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            max_connections: 10,
            min_connections: 1,
            acquire_timeout: Duration::from_secs(30),
        }
    }

    pub fn max_connections(mut self, max: u32) -> Self {
        self.max_connections = max.max(1);
        self.min_connections = self.min_connections.min(self.max_connections);
        self
    }
}

impl From<&PgConfig> for DatabaseConfig {
    fn from(pg: &PgConfig) -> Self {
        Self {
            url: pg.url.clone(),
            max_connections: pg.pool_max,
            min_connections: pg.pool_min.min(pg.pool_max),
            acquire_timeout: Duration::from_secs(pg.acquire_timeout_seconds),
        }
    }
}

/// Shared connection pool. Cloning is cheap and yields a handle to the same pool.
#[derive(Clone, Debug)]
pub struct Database {
    pool: PgPool,
}

impl Database {
    /// Open the pool and establish `min_connections` connections.
    pub async fn connect(config: &DatabaseConfig) -> Result<Self, sqlx::Error> {
        let pool = PgPoolOptions::new()
            .max_connections(config.max_connections)
            .min_connections(config.min_connections)
            .acquire_timeout(config.acquire_timeout)
            .connect(&config.url)
            .await?;

        tracing::info!(
            max_connections = config.max_connections,
            "database pool created"
        );

        Ok(Self { pool })
    }

    /// Wrap a pool opened elsewhere, e.g. by `#[sqlx::test]`.
    pub fn from_pool(pool: PgPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Check that the database answers within the context's deadline.
    pub async fn ping(&self, ctx: &RequestContext) -> StoreResult<()> {
        ctx.run(async {
            sqlx::query("SELECT 1")
                .execute(&self.pool)
                .await
                .map_err(map_sqlx)?;
            Ok(())
        })
        .await
        .context("Database.ping")
    }

    /// Close the pool, waiting for checked-out connections to be returned.
    pub async fn close(&self) {
        self.pool.close().await;
        tracing::info!("database pool closed");
    }

    pub fn is_closed(&self) -> bool {
        self.pool.is_closed()
    }

    pub fn stats(&self) -> PoolStats {
        PoolStats {
            size: self.pool.size(),
            idle: self.pool.num_idle(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PoolStats {
    pub size: u32,
    pub idle: usize,
}

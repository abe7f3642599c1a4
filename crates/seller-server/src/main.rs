//! AI-Seller RS Server

use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use axum::{routing::get, Router};
use tower::ServiceBuilder;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing::{error, info};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use seller_api::AppState;
use seller_core::config::{AppConfig, LogConfig};
use seller_db::{migrate_with_retry, Database, DatabaseConfig, MigrationOutcome, PgStorage};
use seller_usecases::UseCase;

mod health;

/// Delay between migration connection attempts
const MIGRATE_RETRY_DELAY: Duration = Duration::from_secs(1);

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = AppConfig::load().context("failed to load configuration")?;
    init_tracing(&config.log);

    info!(
        name = %config.app.name,
        version = %config.app.version,
        addr = %config.server_addr(),
        "starting server"
    );

    if config.pg.migrate {
        let outcome = migrate_with_retry(
            &config.pg.url,
            config.pg.migrate_attempts,
            MIGRATE_RETRY_DELAY,
        )
        .await
        .context("failed to migrate database")?;
        if let MigrationOutcome::Applied(n) = outcome {
            info!(applied = n, "schema migrated");
        }
    }

    let db = Database::connect(&DatabaseConfig::from(&config.pg))
        .await
        .context("failed to connect to postgres")?;

    let storage = PgStorage::new(&db);
    let state = AppState::new(
        Arc::new(UseCase::from_storage(&storage)),
        Duration::from_secs(config.http.request_timeout_seconds),
    );
    let app = build_router(state, db.clone());

    let addr = config.server_addr();
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {}", addr))?;
    info!("listening on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    db.close().await;
    info!("server shutdown complete");
    Ok(())
}

/// Initialize tracing. `RUST_LOG` takes precedence over `LOG_LEVEL`.
fn init_tracing(log: &LogConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("{},tower_http=debug", log.level)));
    let registry = tracing_subscriber::registry().with(filter);

    if log.json {
        registry.with(fmt::layer().json()).init();
    } else {
        registry.with(fmt::layer().with_target(true)).init();
    }
}

/// API routes plus the readiness probe, wrapped in tracing and CORS layers
fn build_router(state: AppState, db: Database) -> Router {
    let probes = Router::new()
        .route("/readyz", get(health::readiness))
        .with_state(db);

    seller_api::router(state).merge(probes).layer(
        ServiceBuilder::new().layer(TraceLayer::new_for_http()).layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        ),
    )
}

/// Resolves on Ctrl-C or SIGTERM
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            error!(error = %err, "failed to install Ctrl-C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(err) => {
                error!(error = %err, "failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("received Ctrl-C, initiating graceful shutdown");
        }
        _ = terminate => {
            info!("received SIGTERM, initiating graceful shutdown");
        }
    }
}

//! ClubHub server entry point.
//!
//! Loads configuration, connects to PostgreSQL and serves the HTTP API
//! until Ctrl+C or SIGTERM.

use tracing::{error, info};
use tracing_subscriber::{EnvFilter, fmt};

use clubhub_core::config::AppConfig;
use clubhub_core::error::AppError;
use clubhub_database::DatabasePool;

#[tokio::main]
async fn main() {
    let config = match AppConfig::load_from_env() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load configuration: {e}");
            std::process::exit(1);
        }
    };

    init_logging(&config);

    if let Err(e) = run(config).await {
        error!(error = %e, "Server error");
        std::process::exit(1);
    }
}

/// Initialize tracing from the `[logging]` section; `RUST_LOG` wins.
fn init_logging(config: &AppConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.logging.level));

    match config.logging.format.as_str() {
        "json" => fmt().json().with_env_filter(filter).with_target(true).init(),
        _ => fmt().pretty().with_env_filter(filter).with_target(true).init(),
    }
}

async fn run(config: AppConfig) -> Result<(), AppError> {
    info!(version = env!("CARGO_PKG_VERSION"), "Starting ClubHub");

    let db = DatabasePool::connect(&config.database).await?;
    let stores = db.stores();

    clubhub_api::serve(config, stores, shutdown_signal()).await?;

    db.close().await;
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!(error = %e, "Failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                error!(error = %e, "Failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("Shutdown signal received");
}

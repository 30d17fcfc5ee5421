//! hrms-server binary
//!
//! Loads `.env`, reads configuration from the environment, opens and migrates
//! the database, then serves HTTP until Ctrl+C or SIGTERM.

use hrms_server::utils::init_logger;
use hrms_server::{AppState, Config, DbService, create_router};

type BoxError = Box<dyn std::error::Error + Send + Sync>;

#[tokio::main]
async fn main() -> Result<(), BoxError> {
    // Load .env file
    let _ = dotenvy::dotenv();

    let config = Config::from_env()?;
    init_logger(&config.log_level, config.log_json, config.log_dir.as_deref());

    tracing::info!("Starting hrms-server (env: {})", config.environment);

    let db = DbService::new(&config.database_url, config.db_max_connections).await?;
    let http_addr = format!("0.0.0.0:{}", config.http_port);
    let state = AppState::new(config, db.pool)?;
    let app = create_router(state);

    let listener = tokio::net::TcpListener::bind(&http_addr).await?;
    tracing::info!("hrms-server HTTP listening on {http_addr}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server shutdown complete");
    Ok(())
}

async fn shutdown_signal() {
    use tokio::signal;

    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl+C: {e}");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {e}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C signal, shutting down gracefully...");
        },
        _ = terminate => {
            tracing::info!("Received SIGTERM signal, shutting down gracefully...");
        },
    }
}

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use api_rest::AppState;
use labtrack_core::{CoreConfig, TestService, config::database_path_from_env_value};

/// Main entry point for the labtrack server
///
/// Resolves configuration once, initialises the record store, and serves the REST API until
/// interrupted.
///
/// # Environment Variables
/// - `LABTRACK_REST_ADDR`: REST server address (default: "0.0.0.0:3000")
/// - `LABTRACK_DATABASE_PATH`: SQLite database file (default: "labtrack.db")
///
/// A `.env` file in the working directory is loaded first, if present.
///
/// # Errors
/// Returns an error if:
/// - the logging/tracing configuration cannot be initialised,
/// - the database cannot be opened or its schema applied,
/// - the server address cannot be bound, or
/// - the HTTP server fails while running.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("labtrack_run=info".parse()?)
                .add_directive("labtrack_core=info".parse()?)
                .add_directive("api_rest=info".parse()?),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let rest_addr =
        std::env::var("LABTRACK_REST_ADDR").unwrap_or_else(|_| "0.0.0.0:3000".into());
    let database_path = database_path_from_env_value(std::env::var("LABTRACK_DATABASE_PATH").ok());

    let cfg = CoreConfig::new(database_path)?;
    tracing::info!("++ Using database {}", cfg.database_path().display());

    let test_service = TestService::new(&cfg)?;
    let app = api_rest::router(AppState::new(test_service));

    tracing::info!("++ Starting labtrack REST on {}", rest_addr);
    let listener = tokio::net::TcpListener::bind(&rest_addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("-- labtrack REST stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("failed to listen for shutdown signal: {}", e);
    }
}

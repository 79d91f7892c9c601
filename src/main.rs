use anyhow::Result;
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env before anything reads the environment
    dotenvy::dotenv().ok();

    // Initialize tracing subscriber to log to stdout
    tracing_subscriber::fmt::init();
    info!(
        "Starting Vinyl Market API server v{}...",
        env!("CARGO_PKG_VERSION")
    );

    // Builds state, opens the database pool, runs migrations
    let app = vinyl_market::create_router().await?;

    let server = vinyl_market::ServerConfig::from_env()?;
    let listener =
        tokio::net::TcpListener::bind((server.host.as_str(), server.port)).await?;
    info!("listening on {}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("server stopped");
    Ok(())
}

/// Resolves when Ctrl+C is received, letting in-flight requests drain.
async fn shutdown_signal() {
    // ---
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!("failed to listen for shutdown signal: {err}");
        return;
    }
    info!("shutdown signal received, draining connections");
}

use anyhow::Result;
use portfolio_server::{config::Config, server};
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file (ignored in production)
    let _ = dotenvy::dotenv();

    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("portfolio_server=info".parse()?),
        )
        .init();

    info!("Starting portfolio server");

    // Load configuration from environment
    let config = Config::from_env()?;
    let port = config.port;

    if config.email.is_none() {
        info!("Email service not configured; /api/contact will answer 503");
    }

    let state = server::AppState::new(config);
    let app = server::build_router(state);

    let listener = tokio::net::TcpListener::bind(("0.0.0.0", port)).await?;
    info!("Listening on port {}", port);

    axum::serve(listener, app).await?;

    Ok(())
}

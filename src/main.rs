use anyhow::Context;
use bistrobot::configuration::get_configuration;
use bistrobot::database::{get_connection_pool, migrate_database};
use bistrobot::server::config::configure_app;
use bistrobot::server::services::gemini::GeminiService;
use std::net::SocketAddr;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // Load environment variables
    dotenvy::dotenv().ok();

    let settings = get_configuration().context("Failed to load configuration")?;

    let gemini = Arc::new(
        GeminiService::new(settings.ai.resolved_api_key(), &settings.ai)
            .context("Failed to build AI client")?,
    );

    let pool = match &settings.database {
        Some(database) => {
            let pool = get_connection_pool(database)
                .await
                .context("Failed to connect to Postgres")?;
            migrate_database(&pool)
                .await
                .context("Failed to run database migrations")?;
            Some(pool)
        }
        None => {
            info!("No database configured; menu rule answers with canned text");
            None
        }
    };

    let app = configure_app(gemini, pool);

    // Get port from environment variable or use configured default
    let port = std::env::var("PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or(settings.application.port);

    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    info!("Starting server on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .context("Failed to bind address")?;

    axum::serve(listener, app).await.context("Server error")?;

    Ok(())
}

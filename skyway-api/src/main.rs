use std::net::SocketAddr;

use anyhow::Context;
use skyway_api::{app, AppState};
use skyway_store::{app_config::Config, ApiClient};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "skyway_api=debug,skyway_core=info,skyway_store=info,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::load().context("Failed to load config")?;
    tracing::info!("Starting Skyway API on port {}", config.server.port);
    tracing::info!("Upstream API at {}", config.upstream.base_url);

    let client = ApiClient::new(&config.upstream).context("Failed to build upstream client")?;
    let app = app(AppState::from_client(client), &config.cors);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.server.port));
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    axum::serve(listener, app).await.context("Server error")?;
    Ok(())
}

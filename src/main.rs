//! City Guide Server
//!
//! Serves filtered, paginated event listings for the city directory.

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use city_guide::{config::AppConfig, create_router, repository::Repository, services::Services, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    let config = AppConfig::load().context("Failed to load configuration")?;

    // Initialize tracing
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| format!("city_guide={},tower_http=debug", config.logging.level).into());

    let registry = tracing_subscriber::registry().with(filter);
    if config.logging.format == "json" {
        registry.with(tracing_subscriber::fmt::layer().json()).init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }

    tracing::info!("Starting City Guide v{}", env!("CARGO_PKG_VERSION"));
    tracing::info!(
        "Upstream events API at {} (page size {}, timeout {}s)",
        config.upstream.base_url,
        config.upstream.page_size,
        config.upstream.timeout_secs
    );

    // Save server address before moving config
    let server_host = config.server.host.clone();
    let server_port = config.server.port;

    let repository = Repository::new(&config.upstream)?;
    let services = Services::new(repository, &config);

    let state = AppState {
        config: Arc::new(config),
        services: Arc::new(services),
    };

    let app = create_router(state);

    let addr = SocketAddr::new(
        server_host
            .parse()
            .with_context(|| format!("Invalid host address {}", server_host))?,
        server_port,
    );

    tracing::info!("Server listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

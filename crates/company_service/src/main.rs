//! Company service entry point.
//!
//! Fetches company records from Companies House, normalizes them and serves
//! them as HAL resources.

use anyhow::Result;
use company_service::{create_router, AppState, ServiceConfig};
use external_services::companies_house::CompaniesHouseClient;
use metrics_exporter_prometheus::PrometheusBuilder;
use normalizer::CompaniesHouseAdapter;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::signal;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting company service...");

    let config = ServiceConfig::from_env()?;

    info!("Configuration:");
    info!("  CH_API_URL: {}", config.companies_house.base_url);
    info!("  HTTP_PORT: {}", config.http_port);
    info!("  METRICS_PORT: {}", config.metrics_port);
    match &config.public_base_url {
        Some(base) => info!("  PUBLIC_BASE_URL: {}", base.base()),
        None => info!("  PUBLIC_BASE_URL: <derived from Host header>"),
    }

    // Initialize Prometheus metrics
    PrometheusBuilder::new()
        .with_http_listener(([0, 0, 0, 0], config.metrics_port))
        .install()?;

    info!(
        "Prometheus metrics available at http://0.0.0.0:{}/metrics",
        config.metrics_port
    );

    // Upstream client is built once and shared read-only
    let client = CompaniesHouseClient::from_config(&config.companies_house)?;

    let app_state = AppState {
        registry: Arc::new(client),
        adapter: CompaniesHouseAdapter::new(),
        public_base_url: config.public_base_url.clone(),
    };
    let router = create_router(app_state);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.http_port));
    let listener = TcpListener::bind(addr).await?;
    info!("HTTP API listening on http://{}", addr);
    info!("Available endpoints:");
    info!("  GET /health                       - Health check");
    info!("  GET /companies/{{company_number}}   - Company details (HAL)");

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Company service stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
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
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => info!("Received Ctrl+C"),
        _ = terminate => info!("Received terminate signal"),
    }
}

use anyhow::Result;
use pix_gateway::{
    config::Config,
    handlers::{router, AppState},
    services::{ChargeGateway, PushinPayClient},
};
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(EnvFilter::from_default_env())
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config = Config::from_env()?;

    tracing::info!("Starting PIX gateway v{}", env!("CARGO_PKG_VERSION"));
    tracing::info!("Environment: {}", config.environment.as_str());

    // Initialize services
    let provider = Arc::new(PushinPayClient::from_config(&config)?);
    tracing::info!("PushinPay charge endpoint: {}", provider.charge_url());

    let gateway = Arc::new(ChargeGateway::new(&config, provider));
    let app = router(AppState::new(gateway, config.environment));

    // Start server
    let addr = format!("{}:{}", config.host, config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    tracing::info!("Server listening on http://{}", addr);
    tracing::info!("Charge endpoint: POST http://{}/gerar-pix", addr);
    tracing::info!("Health check: http://{}/health", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for ctrl+c: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutting down gracefully...");
}

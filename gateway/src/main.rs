use std::sync::Arc;

use authorcheck_gateway::{build_router, AppState, GatewayConfig};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = GatewayConfig::from_env();
    if !config.has_api_key() {
        tracing::warn!("API_KEY is not set; analysis requests will fail");
    }

    let addr = format!("0.0.0.0:{}", config.port);
    tracing::info!(
        model = %config.model,
        origins = config.allowed_origins.len(),
        "AuthorCheck gateway listening on {}",
        addr
    );

    let app = build_router(Arc::new(AppState::new(config)));

    let listener = match tokio::net::TcpListener::bind(&addr).await {
        Ok(l) => l,
        Err(e) => {
            tracing::error!(error = %e, "cannot bind {}", addr);
            std::process::exit(1);
        }
    };
    if let Err(e) = axum::serve(listener, app).await {
        tracing::error!(error = %e, "server exited");
        std::process::exit(1);
    }
}

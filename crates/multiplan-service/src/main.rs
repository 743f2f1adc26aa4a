//! Multi-plan subscription service - entry point.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use multiplan_service::{create_router, AppState, ServiceConfig};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // A missing .env file is fine; real deployments set the environment directly.
    let dotenv = dotenvy::dotenv();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,multiplan_service=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting multi-plan subscription service");

    if let Ok(path) = dotenv {
        tracing::info!(path = %path.display(), "Loaded environment file");
    }

    // Load configuration from environment
    let config = ServiceConfig::from_env();

    tracing::info!(
        listen_addr = %config.listen_addr,
        static_dir = %config.static_dir.display(),
        coupon_configured = %config.coupon_id.is_some(),
        plan_count = config.plans.len(),
        "Service configuration loaded"
    );

    let state = AppState::new(config.clone());
    tracing::info!(
        stripe_configured = state.has_stripe(),
        webhook_signatures = state.verifies_webhooks(),
        "Application state initialized"
    );

    // Create the router
    let app = create_router(state);
    tracing::info!("Router configured with all API endpoints");

    // Start HTTP server
    tracing::info!(listen_addr = %config.listen_addr, "Starting HTTP server");
    let listener = tokio::net::TcpListener::bind(&config.listen_addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

//! Router configuration.
//!
//! This module sets up the Axum router with all routes and middleware.

use std::sync::Arc;
use std::time::Duration;

use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::services::ServeDir;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use crate::handlers::{customers, front, health, subscriptions, webhooks};
use crate::state::AppState;

/// Create the service router with all routes and middleware.
///
/// # Routes
///
/// ## Client
/// - `GET /` - Checkout page
/// - `GET /public-key` - Publishable key for the browser
/// - any other `GET` - Static assets from the configured directory
///
/// ## Subscriptions
/// - `POST /create-customer` - Create a customer subscribed to the selected plans
/// - `POST /subscription` - Look up a subscription
///
/// ## Webhooks (Signature verification)
/// - `POST /webhook` - Stripe webhooks
///
/// ## Public
/// - `GET /health` - Health check
pub fn create_router(state: AppState) -> Router {
    // Extract config values before moving state
    let cors_origins = state.config.cors_origins.clone();
    let max_body_bytes = state.config.max_body_bytes;
    let request_timeout_seconds = state.config.request_timeout_seconds;
    let assets = ServeDir::new(&state.config.static_dir);

    // Build CORS layer
    let cors = build_cors_layer(&cors_origins);

    let state = Arc::new(state);

    Router::new()
        // Client
        .route("/", get(front::index))
        .route("/public-key", get(front::public_key))
        // Subscriptions
        .route("/create-customer", post(customers::create_customer))
        .route("/subscription", post(subscriptions::get_subscription))
        // Webhooks
        .route("/webhook", post(webhooks::stripe_webhook))
        // Health
        .route("/health", get(health::health))
        .fallback_service(assets)
        // Middleware
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .layer(RequestBodyLimitLayer::new(max_body_bytes))
        .layer(TimeoutLayer::new(Duration::from_secs(
            request_timeout_seconds,
        )))
        .with_state(state)
}

/// Build the CORS layer from configured origins.
fn build_cors_layer(origins: &[String]) -> CorsLayer {
    if origins.iter().any(|o| o == "*") {
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any)
    } else {
        let origins: Vec<_> = origins.iter().filter_map(|o| o.parse().ok()).collect();

        CorsLayer::new()
            .allow_origin(origins)
            .allow_methods(Any)
            .allow_headers(Any)
    }
}

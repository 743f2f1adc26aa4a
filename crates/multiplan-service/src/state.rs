//! Application state.

use std::sync::Arc;

use crate::config::ServiceConfig;
use crate::dispatch::{EventHandler, NoopEventHandler};
use crate::error::ApiError;
use crate::provider::BillingProvider;
use crate::stripe::{StripeClient, WebhookVerifier};

/// Application state shared across handlers.
///
/// Built once at startup; nothing in it changes while the service runs.
#[derive(Clone)]
pub struct AppState {
    /// Service configuration.
    pub config: ServiceConfig,

    /// Payment provider client (absent if no secret key is configured).
    pub provider: Option<Arc<dyn BillingProvider>>,

    /// Webhook signature verifier (absent if no signing secret is configured).
    pub webhook_verifier: Option<WebhookVerifier>,

    /// Receives verified webhook events.
    pub events: Arc<dyn EventHandler>,
}

impl AppState {
    /// Create application state, building the Stripe client from configuration.
    #[must_use]
    pub fn new(config: ServiceConfig) -> Self {
        let provider = config.stripe_secret_key.as_ref().and_then(|key| {
            match StripeClient::new(key) {
                Ok(client) => {
                    tracing::info!("Stripe integration enabled");
                    Some(Arc::new(client) as Arc<dyn BillingProvider>)
                }
                Err(e) => {
                    tracing::error!(error = %e, "Failed to create Stripe client");
                    None
                }
            }
        });

        if provider.is_none() {
            tracing::warn!("Stripe not configured - subscription endpoints will fail");
        }

        Self::build(config, provider)
    }

    /// Create application state around an existing provider.
    #[must_use]
    pub fn with_provider(config: ServiceConfig, provider: Arc<dyn BillingProvider>) -> Self {
        Self::build(config, Some(provider))
    }

    fn build(config: ServiceConfig, provider: Option<Arc<dyn BillingProvider>>) -> Self {
        let webhook_verifier = config.stripe_webhook_secret.as_ref().map(|secret| {
            WebhookVerifier::new(secret.clone()).with_tolerance(config.webhook_tolerance)
        });

        if webhook_verifier.is_none() {
            tracing::warn!(
                "Stripe webhook secret not configured - webhook events will NOT be authenticated"
            );
        }

        if config.plans.is_empty() {
            tracing::warn!("No valid plan IDs configured - every subscription request will be rejected");
        }

        Self {
            config,
            provider,
            webhook_verifier,
            events: Arc::new(NoopEventHandler),
        }
    }

    /// Replace the webhook event handler.
    #[must_use]
    pub fn with_event_handler(mut self, events: Arc<dyn EventHandler>) -> Self {
        self.events = events;
        self
    }

    /// The provider client, or an error if Stripe is not configured.
    pub fn provider(&self) -> Result<&dyn BillingProvider, ApiError> {
        self.provider
            .as_deref()
            .ok_or_else(|| ApiError::Internal("Stripe is not configured".into()))
    }

    /// Check if Stripe is configured.
    #[must_use]
    pub fn has_stripe(&self) -> bool {
        self.provider.is_some()
    }

    /// Check if webhook signatures are verified.
    #[must_use]
    pub fn verifies_webhooks(&self) -> bool {
        self.webhook_verifier.is_some()
    }
}

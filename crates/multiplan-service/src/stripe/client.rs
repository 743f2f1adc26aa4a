//! Stripe API client implementation.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;

use multiplan_core::SubscriptionId;

use super::types::{Customer, StripeErrorResponse, Subscription};
use crate::provider::{BillingProvider, CustomerParams, SubscriptionParams};

/// Expansion requested on new subscriptions so the client can finish any
/// required authentication step on the first payment.
const SUBSCRIPTION_EXPAND: &str = "latest_invoice.payment_intent";

/// Error type for Stripe operations.
#[derive(Debug, thiserror::Error)]
pub enum StripeError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Stripe API returned an error.
    #[error("Stripe API error: {error_type} - {message}")]
    Api {
        /// Error type.
        error_type: String,
        /// Error message.
        message: String,
        /// Error code.
        code: Option<String>,
    },

    /// Serialization error.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Configuration(String),
}

impl StripeError {
    /// The message to show API callers.
    ///
    /// API errors carry Stripe's own message; everything else uses `Display`.
    #[must_use]
    pub fn client_message(&self) -> String {
        match self {
            Self::Api { message, .. } if !message.is_empty() => message.clone(),
            other => other.to_string(),
        }
    }
}

/// Stripe API client.
#[derive(Debug, Clone)]
pub struct StripeClient {
    client: Client,
    api_key: String,
    base_url: String,
}

impl StripeClient {
    /// Stripe API base URL.
    pub const BASE_URL: &'static str = "https://api.stripe.com/v1";

    /// Per-request timeout.
    const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

    /// Create a new Stripe client.
    ///
    /// # Arguments
    ///
    /// * `api_key` - Stripe secret API key (`sk_test_...` or `sk_live_...`)
    pub fn new(api_key: impl Into<String>) -> Result<Self, StripeError> {
        Self::with_base_url(api_key, Self::BASE_URL)
    }

    /// Create a client that talks to a different API root (a mock server, or
    /// `stripe-mock`).
    pub fn with_base_url(
        api_key: impl Into<String>,
        base_url: impl Into<String>,
    ) -> Result<Self, StripeError> {
        let client = Client::builder()
            .timeout(Self::REQUEST_TIMEOUT)
            .build()
            .map_err(|e| StripeError::Configuration(format!("Failed to build HTTP client: {e}")))?;

        Ok(Self {
            client,
            api_key: api_key.into(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    /// Handle API response and convert errors.
    async fn handle_response<T: serde::de::DeserializeOwned>(
        &self,
        response: reqwest::Response,
    ) -> Result<T, StripeError> {
        let status = response.status();

        if status.is_success() {
            return Ok(response.json().await?);
        }

        // Try to parse error response
        let error_body: Result<StripeErrorResponse, _> = response.json().await;

        match error_body {
            Ok(stripe_error) => Err(StripeError::Api {
                error_type: stripe_error.error.error_type,
                message: stripe_error.error.message,
                code: stripe_error.error.code,
            }),
            Err(_) => Err(StripeError::Api {
                error_type: "unknown".to_string(),
                message: format!("HTTP {status}"),
                code: None,
            }),
        }
    }
}

#[async_trait]
impl BillingProvider for StripeClient {
    async fn create_customer(&self, params: &CustomerParams) -> Result<Customer, StripeError> {
        let form = [
            ("payment_method", params.payment_method.as_str()),
            ("email", params.email.as_str()),
            (
                "invoice_settings[default_payment_method]",
                params.payment_method.as_str(),
            ),
        ];

        let response = self
            .client
            .post(format!("{}/customers", self.base_url))
            .basic_auth(&self.api_key, Option::<&str>::None)
            .form(&form)
            .send()
            .await?;

        self.handle_response(response).await
    }

    async fn create_subscription(
        &self,
        params: &SubscriptionParams,
    ) -> Result<Subscription, StripeError> {
        let mut form = vec![("customer".to_string(), params.customer.to_string())];

        for (index, plan_id) in params.plan_ids.iter().enumerate() {
            form.push((format!("items[{index}][price]"), plan_id.to_string()));
        }

        form.push(("expand[0]".to_string(), SUBSCRIPTION_EXPAND.to_string()));

        if let Some(coupon) = &params.coupon {
            form.push(("discounts[0][coupon]".to_string(), coupon.clone()));
        }

        tracing::debug!(
            customer_id = %params.customer,
            plan_count = params.plan_ids.len(),
            coupon = ?params.coupon,
            "Creating Stripe subscription"
        );

        let response = self
            .client
            .post(format!("{}/subscriptions", self.base_url))
            .basic_auth(&self.api_key, Option::<&str>::None)
            .form(&form)
            .send()
            .await?;

        self.handle_response(response).await
    }

    async fn retrieve_subscription(
        &self,
        subscription_id: &SubscriptionId,
    ) -> Result<Subscription, StripeError> {
        let response = self
            .client
            .get(format!(
                "{}/subscriptions/{}",
                self.base_url, subscription_id
            ))
            .basic_auth(&self.api_key, Option::<&str>::None)
            .send()
            .await?;

        self.handle_response(response).await
    }
}

//! Common test utilities for multiplan integration tests.

#![allow(dead_code)] // Some utilities are used by different test files

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::http::{HeaderName, HeaderValue};
use axum_test::TestServer;
use serde_json::{json, Value};
use tempfile::TempDir;

use multiplan_core::{PlanAllowList, SubscriptionId};
use multiplan_service::stripe::{Customer, Subscription, SIGNATURE_HEADER};
use multiplan_service::{
    create_router, AppState, BillingProvider, CustomerParams, EventHandler, HandlerResult,
    NoopEventHandler, ServiceConfig, StripeError, SubscriptionParams, WebhookVerifier,
};

/// Webhook signing secret configured in the harness.
pub const WEBHOOK_SECRET: &str = "whsec_test_harness";

/// Coupon configured in the harness.
pub const COUPON_ID: &str = "BUNDLE10";

/// Publishable key configured in the harness.
pub const PUBLISHABLE_KEY: &str = "pk_test_harness";

/// Plans configured in the harness allow-list.
pub const VALID_PLANS: &str = "plan_basic,plan_premium,plan_pro";

/// Subscription ID the fake provider knows about.
pub const KNOWN_SUBSCRIPTION: &str = "sub_known";

/// Contents of the harness `index.html`.
pub const INDEX_HTML: &str = "<!doctype html><title>Multi-plan checkout</title>";

/// Provider double that records every call.
#[derive(Default)]
pub struct FakeProvider {
    pub customers: Mutex<Vec<CustomerParams>>,
    pub subscriptions: Mutex<Vec<SubscriptionParams>>,
    pub lookups: Mutex<Vec<String>>,
    /// When set, customer creation fails with this Stripe message.
    pub decline_with: Option<String>,
}

impl FakeProvider {
    pub fn declining(message: &str) -> Self {
        Self {
            decline_with: Some(message.to_string()),
            ..Self::default()
        }
    }

    pub fn call_count(&self) -> usize {
        self.customers.lock().unwrap().len()
            + self.subscriptions.lock().unwrap().len()
            + self.lookups.lock().unwrap().len()
    }

    pub fn last_subscription(&self) -> SubscriptionParams {
        self.subscriptions
            .lock()
            .unwrap()
            .last()
            .cloned()
            .expect("no subscription created")
    }
}

#[async_trait]
impl BillingProvider for FakeProvider {
    async fn create_customer(&self, params: &CustomerParams) -> Result<Customer, StripeError> {
        self.customers.lock().unwrap().push(params.clone());

        if let Some(message) = &self.decline_with {
            return Err(StripeError::Api {
                error_type: "card_error".into(),
                message: message.clone(),
                code: Some("card_declined".into()),
            });
        }

        Ok(serde_json::from_value(json!({
            "id": "cus_fake",
            "invoice_settings": { "default_payment_method": params.payment_method }
        }))?)
    }

    async fn create_subscription(
        &self,
        params: &SubscriptionParams,
    ) -> Result<Subscription, StripeError> {
        self.subscriptions.lock().unwrap().push(params.clone());

        let items: Vec<Value> = params
            .plan_ids
            .iter()
            .map(|plan| json!({ "price": { "id": plan.as_str() } }))
            .collect();

        Ok(serde_json::from_value(json!({
            "id": "sub_fake",
            "object": "subscription",
            "status": "active",
            "customer": params.customer.as_str(),
            "items": { "object": "list", "data": items },
            "discount": params.coupon.as_ref().map(|c| json!({ "coupon": { "id": c } })),
            "latest_invoice": { "payment_intent": { "status": "succeeded" } }
        }))?)
    }

    async fn retrieve_subscription(
        &self,
        subscription_id: &SubscriptionId,
    ) -> Result<Subscription, StripeError> {
        self.lookups
            .lock()
            .unwrap()
            .push(subscription_id.to_string());

        if subscription_id.as_str() != KNOWN_SUBSCRIPTION {
            return Err(StripeError::Api {
                error_type: "invalid_request_error".into(),
                message: format!("No such subscription: '{subscription_id}'"),
                code: Some("resource_missing".into()),
            });
        }

        Ok(serde_json::from_value(json!({
            "id": KNOWN_SUBSCRIPTION,
            "object": "subscription",
            "status": "active"
        }))?)
    }
}

/// Event handler that records which methods ran.
#[derive(Default)]
pub struct RecordingHandler {
    pub calls: Mutex<Vec<String>>,
}

impl RecordingHandler {
    fn record(&self, call: String) -> HandlerResult {
        self.calls.lock().unwrap().push(call);
        Ok(())
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl EventHandler for RecordingHandler {
    async fn invoice_payment_failed(&self, invoice: &Value) -> HandlerResult {
        self.record(format!("invoice_payment_failed:{}", invoice["id"]))
    }

    async fn subscription_created(&self, subscription: &Value) -> HandlerResult {
        self.record(format!("subscription_created:{}", subscription["id"]))
    }

    async fn unknown(&self, event_type: &str, _object: &Value) -> HandlerResult {
        self.record(format!("unknown:{event_type}"))
    }
}

/// Test harness containing everything needed for integration tests.
pub struct TestHarness {
    /// The test server for making HTTP requests.
    pub server: TestServer,
    /// The provider double behind the server.
    pub provider: Arc<FakeProvider>,
    /// Static asset directory (kept alive for test duration).
    pub static_dir: TempDir,
}

impl TestHarness {
    /// Create a harness with the default configuration.
    pub fn new() -> Self {
        Self::build(
            FakeProvider::default(),
            Arc::new(NoopEventHandler),
            |_| {},
        )
    }

    /// Create a harness with an adjusted configuration.
    pub fn with_config(adjust: impl FnOnce(&mut ServiceConfig)) -> Self {
        Self::build(FakeProvider::default(), Arc::new(NoopEventHandler), adjust)
    }

    /// Create a harness whose provider declines customer creation.
    pub fn with_provider(provider: FakeProvider) -> Self {
        Self::build(provider, Arc::new(NoopEventHandler), |_| {})
    }

    /// Create a harness that routes webhook events to `events`.
    pub fn with_event_handler(events: Arc<dyn EventHandler>) -> Self {
        Self::build(FakeProvider::default(), events, |_| {})
    }

    fn build(
        provider: FakeProvider,
        events: Arc<dyn EventHandler>,
        adjust: impl FnOnce(&mut ServiceConfig),
    ) -> Self {
        let static_dir = create_static_dir();
        let mut config = base_config(&static_dir);
        adjust(&mut config);

        let provider = Arc::new(provider);
        let state = AppState::with_provider(config, provider.clone()).with_event_handler(events);

        let server = TestServer::new(create_router(state)).expect("Failed to create test server");

        Self {
            server,
            provider,
            static_dir,
        }
    }
}

impl Default for TestHarness {
    fn default() -> Self {
        Self::new()
    }
}

/// Configuration shared by every harness.
pub fn base_config(static_dir: &TempDir) -> ServiceConfig {
    ServiceConfig {
        static_dir: static_dir.path().to_path_buf(),
        stripe_secret_key: Some("sk_test_harness".into()),
        stripe_publishable_key: Some(PUBLISHABLE_KEY.into()),
        stripe_webhook_secret: Some(WEBHOOK_SECRET.into()),
        coupon_id: Some(COUPON_ID.into()),
        plans: PlanAllowList::from_csv(VALID_PLANS),
        ..ServiceConfig::default()
    }
}

/// Create a static directory holding an index page and one asset.
pub fn create_static_dir() -> TempDir {
    let dir = TempDir::new().expect("Failed to create temp directory");
    std::fs::write(dir.path().join("index.html"), INDEX_HTML).expect("Failed to write index");
    std::fs::write(dir.path().join("script.js"), "console.log('checkout');")
        .expect("Failed to write script");
    dir
}

/// Signature header for `payload`, signed now with the harness secret.
pub fn signature_header(payload: &[u8]) -> (HeaderName, HeaderValue) {
    signature_header_at(payload, chrono::Utc::now().timestamp())
}

/// Signature header for `payload` signed at `timestamp`.
pub fn signature_header_at(payload: &[u8], timestamp: i64) -> (HeaderName, HeaderValue) {
    let value = WebhookVerifier::new(WEBHOOK_SECRET).sign(payload, timestamp);
    (
        HeaderName::from_static(SIGNATURE_HEADER),
        HeaderValue::from_str(&value).expect("signature is a valid header value"),
    )
}

/// Serialize a webhook event body.
pub fn event_body(event_type: &str, object: Value) -> Vec<u8> {
    serde_json::to_vec(&json!({
        "id": "evt_test",
        "object": "event",
        "type": event_type,
        "created": chrono::Utc::now().timestamp(),
        "livemode": false,
        "data": { "object": object }
    }))
    .expect("event serializes")
}

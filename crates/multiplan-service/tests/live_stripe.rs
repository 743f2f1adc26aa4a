//! Stripe integration tests using real API calls.
//!
//! These tests require a Stripe test-mode secret key and at least one test
//! price, supplied through the environment:
//!
//! - `STRIPE_SECRET_KEY` (or `STRIPE_API_KEY`)
//! - `STRIPE_TEST_PLAN_IDS`, a comma-separated list of price IDs
//!
//! Run with: `cargo test --test live_stripe -- --ignored --nocapture`
//!
//! Note: These tests use Stripe's test mode and the `pm_card_visa` test
//! payment method. No real charges are made.

use axum_test::TestServer;
use serde_json::json;

use multiplan_core::{PlanAllowList, PlanId};
use multiplan_service::{
    create_router, AppState, BillingProvider, CustomerParams, ServiceConfig, StripeClient,
    SubscriptionParams,
};

/// Credentials and plans for live tests.
struct LiveConfig {
    api_key: String,
    plans: PlanAllowList,
}

impl LiveConfig {
    fn load() -> Option<Self> {
        let api_key = std::env::var("STRIPE_SECRET_KEY")
            .or_else(|_| std::env::var("STRIPE_API_KEY"))
            .ok()
            .filter(|k| k.starts_with("sk_test_"))?;

        let plans = PlanAllowList::from_csv(&std::env::var("STRIPE_TEST_PLAN_IDS").ok()?);
        if plans.is_empty() {
            return None;
        }

        Some(Self { api_key, plans })
    }

    fn plan_ids(&self) -> Vec<PlanId> {
        self.plans.iter().cloned().collect()
    }
}

fn unique_email(prefix: &str) -> String {
    format!(
        "{prefix}-{}@example.com",
        chrono::Utc::now().timestamp_nanos_opt().unwrap_or_default()
    )
}

// ============================================================================
// Direct Stripe Client Tests
// ============================================================================

#[tokio::test]
#[ignore = "requires Stripe API credentials"]
async fn test_stripe_create_customer() {
    let config = LiveConfig::load().expect("Stripe credentials not found");
    let client = StripeClient::new(config.api_key).expect("Failed to create Stripe client");

    let customer = client
        .create_customer(&CustomerParams {
            payment_method: "pm_card_visa".into(),
            email: unique_email("customer-test"),
        })
        .await
        .expect("Failed to create customer");

    println!("Created Stripe customer: {}", customer.id);
    assert!(customer.id.as_str().starts_with("cus_"));
    assert!(customer
        .invoice_settings
        .and_then(|s| s.default_payment_method)
        .is_some());
}

#[tokio::test]
#[ignore = "requires Stripe API credentials"]
async fn test_stripe_subscription_round_trip() {
    let config = LiveConfig::load().expect("Stripe credentials not found");
    let client =
        StripeClient::new(config.api_key.clone()).expect("Failed to create Stripe client");

    let customer = client
        .create_customer(&CustomerParams {
            payment_method: "pm_card_visa".into(),
            email: unique_email("subscription-test"),
        })
        .await
        .expect("Failed to create customer");

    let subscription = client
        .create_subscription(&SubscriptionParams {
            customer: customer.id,
            plan_ids: config.plan_ids(),
            coupon: None,
        })
        .await
        .expect("Failed to create subscription");

    println!("Created subscription: {}", subscription.id);
    assert!(subscription.id.as_str().starts_with("sub_"));
    assert!(subscription.fields["latest_invoice"]["payment_intent"].is_object());

    let fetched = client
        .retrieve_subscription(&subscription.id)
        .await
        .expect("Failed to retrieve subscription");
    assert_eq!(fetched.id, subscription.id);
}

// ============================================================================
// Full API Integration Tests
// ============================================================================

#[tokio::test]
#[ignore = "requires Stripe API credentials"]
async fn test_full_checkout_flow() {
    let Some(live) = LiveConfig::load() else {
        println!("Skipping test - Stripe credentials not found");
        return;
    };

    let plan_ids = live.plan_ids();
    let config = ServiceConfig {
        listen_addr: "127.0.0.1:0".into(),
        stripe_secret_key: Some(live.api_key),
        plans: live.plans,
        ..ServiceConfig::default()
    };
    let server = TestServer::new(create_router(AppState::new(config)))
        .expect("Failed to create test server");

    let response = server
        .post("/create-customer")
        .json(&json!({
            "payment_method": "pm_card_visa",
            "email": unique_email("checkout-test"),
            "plan_ids": plan_ids
        }))
        .await;

    response.assert_status_ok();
    let body: serde_json::Value = response.json();
    println!("Subscription: {}", serde_json::to_string_pretty(&body).unwrap());

    let subscription_id = body["id"].as_str().expect("Missing subscription id");
    assert!(subscription_id.starts_with("sub_"));

    let response = server
        .post("/subscription")
        .json(&json!({ "subscriptionId": subscription_id }))
        .await;

    response.assert_status_ok();
    let fetched: serde_json::Value = response.json();
    assert_eq!(fetched["id"], subscription_id);
}

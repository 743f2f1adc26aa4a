//! Customer and subscription creation.

use std::sync::Arc;

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::Json;

use multiplan_core::SubscriptionRequest;

use crate::error::ApiError;
use crate::provider::{CustomerParams, SubscriptionParams};
use crate::state::AppState;
use crate::stripe::Subscription;

/// Create a customer and subscribe them to the requested plans.
///
/// Plans are checked against the allow-list before anything is sent to the
/// provider. The coupon applies when enough plans are requested.
pub async fn create_customer(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<SubscriptionRequest>, JsonRejection>,
) -> Result<Json<Subscription>, ApiError> {
    let Json(request) = payload?;

    let plan_ids = state.config.plans.validate(&request.plan_ids).map_err(|e| {
        tracing::info!(error = %e, "Rejected plan selection");
        e
    })?;

    let provider = state.provider()?;

    let coupon = request
        .coupon(state.config.coupon_id.as_deref())
        .map(String::from);
    let SubscriptionRequest {
        payment_method,
        email,
        ..
    } = request;

    // Attaches the payment method and makes it the invoicing default in one call.
    let customer = provider
        .create_customer(&CustomerParams {
            payment_method,
            email,
        })
        .await?;

    tracing::info!(
        customer_id = %customer.id,
        default_payment_method = ?customer
            .invoice_settings
            .as_ref()
            .and_then(|s| s.default_payment_method.as_deref()),
        "Created customer"
    );

    let subscription = provider
        .create_subscription(&SubscriptionParams {
            customer: customer.id,
            plan_ids,
            coupon,
        })
        .await?;

    tracing::info!(
        subscription_id = %subscription.id,
        status = ?subscription.status,
        "Created subscription"
    );

    Ok(Json(subscription))
}

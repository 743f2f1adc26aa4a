//! Subscription lookup.

use std::sync::Arc;

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::Json;
use serde::Deserialize;

use multiplan_core::SubscriptionId;

use crate::error::ApiError;
use crate::state::AppState;
use crate::stripe::Subscription;

/// Subscription lookup request.
#[derive(Debug, Deserialize)]
pub struct SubscriptionLookup {
    /// Subscription to fetch.
    #[serde(rename = "subscriptionId")]
    pub subscription_id: SubscriptionId,
}

/// Fetch a subscription from the provider and return it as-is.
///
/// A missing subscription surfaces as the provider's error (HTTP 500).
pub async fn get_subscription(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<SubscriptionLookup>, JsonRejection>,
) -> Result<Json<Subscription>, ApiError> {
    let Json(lookup) = payload?;

    let subscription = state
        .provider()?
        .retrieve_subscription(&lookup.subscription_id)
        .await?;

    Ok(Json(subscription))
}

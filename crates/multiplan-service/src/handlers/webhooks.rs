//! Stripe webhook receiver.

use std::sync::Arc;

use axum::body::Bytes;
use axum::extract::State;
use axum::http::HeaderMap;
use axum::Json;
use serde::Serialize;

use crate::dispatch::dispatch;
use crate::error::ApiError;
use crate::state::AppState;
use crate::stripe::{parse_event, WebhookError, SIGNATURE_HEADER};

/// Webhook acknowledgement.
#[derive(Debug, Serialize)]
pub struct WebhookResponse {
    /// Always `"success"` once the event has been received.
    pub status: &'static str,
}

/// Handle Stripe webhooks.
///
/// The body is taken as raw bytes so the signature is checked against exactly
/// what Stripe signed.
pub async fn stripe_webhook(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Json<WebhookResponse>, ApiError> {
    let event = if let Some(verifier) = &state.webhook_verifier {
        let signature = headers
            .get(SIGNATURE_HEADER)
            .and_then(|v| v.to_str().ok());

        verifier.construct_event(&body, signature).map_err(|e| {
            match &e {
                WebhookError::InvalidSignature { reason } => {
                    tracing::warn!(reason = %reason, "Webhook signature verification failed");
                }
                WebhookError::MalformedPayload(err) => {
                    tracing::warn!(error = %err, "Invalid webhook payload");
                }
            }
            e
        })?
    } else {
        // No webhook_secret configured - skip verification (development mode)
        tracing::warn!("Stripe webhook_secret not configured - skipping signature verification");
        parse_event(&body).map_err(|e| {
            tracing::warn!(error = %e, "Invalid webhook payload");
            e
        })?
    };

    tracing::info!(
        event_type = %event.event_type,
        event_id = ?event.id,
        "Received Stripe webhook"
    );

    dispatch(state.events.as_ref(), &event).await;

    Ok(Json(WebhookResponse { status: "success" }))
}

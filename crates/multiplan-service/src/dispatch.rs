//! Webhook event dispatch.
//!
//! Each known [`EventType`] has its own [`EventHandler`] method, and every
//! method defaults to doing nothing. Integrators override the ones they care
//! about. Dispatch never fails: a handler error is logged and the delivery is
//! still acknowledged, so the provider does not redeliver an event that was
//! received.

use async_trait::async_trait;
use serde_json::Value;

use multiplan_core::{EventType, WebhookEvent};

/// Result of handling a single event.
pub type HandlerResult = Result<(), Box<dyn std::error::Error + Send + Sync>>;

/// Receives verified webhook events, one method per event type.
#[async_trait]
pub trait EventHandler: Send + Sync {
    /// `customer.created`
    async fn customer_created(&self, _customer: &Value) -> HandlerResult {
        Ok(())
    }

    /// `customer.updated`
    async fn customer_updated(&self, _customer: &Value) -> HandlerResult {
        Ok(())
    }

    /// `invoice.upcoming`
    async fn invoice_upcoming(&self, _invoice: &Value) -> HandlerResult {
        Ok(())
    }

    /// `invoice.created`
    async fn invoice_created(&self, _invoice: &Value) -> HandlerResult {
        Ok(())
    }

    /// `invoice.finalized`
    async fn invoice_finalized(&self, _invoice: &Value) -> HandlerResult {
        Ok(())
    }

    /// `invoice.payment_succeeded`
    async fn invoice_payment_succeeded(&self, _invoice: &Value) -> HandlerResult {
        Ok(())
    }

    /// `invoice.payment_failed`
    async fn invoice_payment_failed(&self, _invoice: &Value) -> HandlerResult {
        Ok(())
    }

    /// `customer.subscription.created`
    async fn subscription_created(&self, _subscription: &Value) -> HandlerResult {
        Ok(())
    }

    /// Any event type without a dedicated method.
    async fn unknown(&self, _event_type: &str, _object: &Value) -> HandlerResult {
        Ok(())
    }
}

/// Handler that accepts every event without acting on it.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopEventHandler;

impl EventHandler for NoopEventHandler {}

/// Route an event to the matching handler method.
pub async fn dispatch(handler: &dyn EventHandler, event: &WebhookEvent) {
    let object = event.object();
    let object_id = object.get("id").and_then(Value::as_str);

    tracing::debug!(
        event_type = %event.event_type,
        object_id = ?object_id,
        known = event.event_type.is_known(),
        "Dispatching webhook event"
    );

    let result = match &event.event_type {
        EventType::CustomerCreated => handler.customer_created(object).await,
        EventType::CustomerUpdated => handler.customer_updated(object).await,
        EventType::InvoiceUpcoming => handler.invoice_upcoming(object).await,
        EventType::InvoiceCreated => handler.invoice_created(object).await,
        EventType::InvoiceFinalized => handler.invoice_finalized(object).await,
        EventType::InvoicePaymentSucceeded => handler.invoice_payment_succeeded(object).await,
        EventType::InvoicePaymentFailed => handler.invoice_payment_failed(object).await,
        EventType::CustomerSubscriptionCreated => handler.subscription_created(object).await,
        EventType::Unknown(raw) => handler.unknown(raw, object).await,
    };

    if let Err(e) = result {
        tracing::warn!(
            error = %e,
            event_type = %event.event_type,
            event_id = ?event.id,
            "Webhook event handler failed"
        );
    }
}

//! Webhook event types.
//!
//! The provider sends events as JSON objects tagged by a `type` string. Known
//! types map to dedicated [`EventType`] variants; anything else is kept as
//! [`EventType::Unknown`] so new provider event types never fail to parse.

use std::fmt;

use serde::{Deserialize, Serialize};

/// The type of a webhook event.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum EventType {
    /// `customer.created`
    CustomerCreated,
    /// `customer.updated`
    CustomerUpdated,
    /// `invoice.upcoming`
    InvoiceUpcoming,
    /// `invoice.created`
    InvoiceCreated,
    /// `invoice.finalized`
    InvoiceFinalized,
    /// `invoice.payment_succeeded`
    InvoicePaymentSucceeded,
    /// `invoice.payment_failed`
    InvoicePaymentFailed,
    /// `customer.subscription.created`
    CustomerSubscriptionCreated,
    /// Any other event type, with the raw type string.
    Unknown(String),
}

impl EventType {
    /// Every known event type.
    pub const KNOWN: [Self; 8] = [
        Self::CustomerCreated,
        Self::CustomerUpdated,
        Self::InvoiceUpcoming,
        Self::InvoiceCreated,
        Self::InvoiceFinalized,
        Self::InvoicePaymentSucceeded,
        Self::InvoicePaymentFailed,
        Self::CustomerSubscriptionCreated,
    ];

    /// The wire name of this event type.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::CustomerCreated => "customer.created",
            Self::CustomerUpdated => "customer.updated",
            Self::InvoiceUpcoming => "invoice.upcoming",
            Self::InvoiceCreated => "invoice.created",
            Self::InvoiceFinalized => "invoice.finalized",
            Self::InvoicePaymentSucceeded => "invoice.payment_succeeded",
            Self::InvoicePaymentFailed => "invoice.payment_failed",
            Self::CustomerSubscriptionCreated => "customer.subscription.created",
            Self::Unknown(raw) => raw,
        }
    }

    /// Whether this is one of the recognised event types.
    #[must_use]
    pub fn is_known(&self) -> bool {
        !matches!(self, Self::Unknown(_))
    }
}

impl From<&str> for EventType {
    fn from(value: &str) -> Self {
        match value {
            "customer.created" => Self::CustomerCreated,
            "customer.updated" => Self::CustomerUpdated,
            "invoice.upcoming" => Self::InvoiceUpcoming,
            "invoice.created" => Self::InvoiceCreated,
            "invoice.finalized" => Self::InvoiceFinalized,
            "invoice.payment_succeeded" => Self::InvoicePaymentSucceeded,
            "invoice.payment_failed" => Self::InvoicePaymentFailed,
            "customer.subscription.created" => Self::CustomerSubscriptionCreated,
            other => Self::Unknown(other.to_string()),
        }
    }
}

impl From<String> for EventType {
    fn from(value: String) -> Self {
        match Self::from(value.as_str()) {
            Self::Unknown(_) => Self::Unknown(value),
            known => known,
        }
    }
}

impl From<EventType> for String {
    fn from(event_type: EventType) -> Self {
        match event_type {
            EventType::Unknown(raw) => raw,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for EventType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A webhook event as delivered by the provider.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WebhookEvent {
    /// Event ID (`evt_...`).
    #[serde(default)]
    pub id: Option<String>,
    /// Event type.
    #[serde(rename = "type")]
    pub event_type: EventType,
    /// Event payload.
    #[serde(default)]
    pub data: EventData,
    /// Created timestamp (Unix).
    #[serde(default)]
    pub created: Option<i64>,
    /// Whether the event came from live mode.
    #[serde(default)]
    pub livemode: bool,
}

impl WebhookEvent {
    /// The object the event is about (customer, invoice, subscription...).
    #[must_use]
    pub fn object(&self) -> &serde_json::Value {
        &self.data.object
    }
}

/// Webhook event data container.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EventData {
    /// The event object, passed through untouched.
    #[serde(default)]
    pub object: serde_json::Value,
    /// Attributes changed by an update event.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub previous_attributes: Option<serde_json::Value>,
}

//! Stripe API types.

use serde::{Deserialize, Serialize};

use multiplan_core::{CustomerId, SubscriptionId};

/// Stripe customer object.
#[derive(Debug, Clone, Deserialize)]
pub struct Customer {
    /// Stripe customer ID.
    pub id: CustomerId,
    /// Default invoice settings.
    #[serde(default)]
    pub invoice_settings: Option<InvoiceSettings>,
}

/// Customer invoice settings.
#[derive(Debug, Clone, Deserialize)]
pub struct InvoiceSettings {
    /// Payment method charged for invoices by default.
    #[serde(default)]
    pub default_payment_method: Option<String>,
}

/// Stripe subscription object.
///
/// Only the ID and status are typed; every other field is carried through
/// untouched so the client receives the provider's full representation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Subscription {
    /// Subscription ID.
    pub id: SubscriptionId,
    /// Status (incomplete, active, past_due, ...).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    /// Remaining fields, passed through verbatim.
    #[serde(flatten)]
    pub fields: serde_json::Map<String, serde_json::Value>,
}

/// Stripe API error response.
#[derive(Debug, Clone, Deserialize)]
pub struct StripeErrorResponse {
    /// Error details.
    pub error: StripeErrorDetail,
}

/// Stripe error detail.
#[derive(Debug, Clone, Deserialize)]
pub struct StripeErrorDetail {
    /// Error type.
    #[serde(rename = "type")]
    pub error_type: String,
    /// Error message.
    #[serde(default)]
    pub message: String,
    /// Error code.
    #[serde(default)]
    pub code: Option<String>,
}

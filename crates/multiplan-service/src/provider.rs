//! The payment provider seam.
//!
//! Handlers talk to the provider only through [`BillingProvider`], so the HTTP
//! layer can be exercised without network access.

use async_trait::async_trait;

use multiplan_core::{CustomerId, PlanId, SubscriptionId};

use crate::stripe::{Customer, StripeError, Subscription};

/// Parameters for creating a customer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CustomerParams {
    /// Payment method to attach and use as the invoicing default.
    pub payment_method: String,
    /// Customer email.
    pub email: String,
}

/// Parameters for creating a subscription.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubscriptionParams {
    /// Customer to subscribe.
    pub customer: CustomerId,
    /// One subscription item per plan, in this order.
    pub plan_ids: Vec<PlanId>,
    /// Coupon to apply, if any.
    pub coupon: Option<String>,
}

/// Operations the service needs from the payment provider.
#[async_trait]
pub trait BillingProvider: Send + Sync {
    /// Create a customer with the payment method attached and set as default.
    async fn create_customer(&self, params: &CustomerParams) -> Result<Customer, StripeError>;

    /// Create a subscription, expanding the latest invoice's payment intent.
    async fn create_subscription(
        &self,
        params: &SubscriptionParams,
    ) -> Result<Subscription, StripeError>;

    /// Retrieve a subscription by ID.
    async fn retrieve_subscription(
        &self,
        subscription_id: &SubscriptionId,
    ) -> Result<Subscription, StripeError>;
}

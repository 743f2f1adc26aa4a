//! Client-submitted subscription request.

use serde::{Deserialize, Serialize};

use crate::plans::eligible_for_discount;

/// A request to create a customer subscribed to one or more plans.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubscriptionRequest {
    /// Payment method token created client-side.
    pub payment_method: String,
    /// Customer email.
    pub email: String,
    /// Requested plans, verbatim and in the order the client listed them.
    ///
    /// Kept as raw strings so the allow-list check sees exactly what was sent.
    pub plan_ids: Vec<String>,
}

impl SubscriptionRequest {
    /// Number of requested plans.
    #[must_use]
    pub fn plan_count(&self) -> usize {
        self.plan_ids.len()
    }

    /// The coupon to apply, if this request qualifies for one.
    ///
    /// `configured` is the coupon set in configuration; `None` there means no
    /// request ever receives a discount.
    #[must_use]
    pub fn coupon<'a>(&self, configured: Option<&'a str>) -> Option<&'a str> {
        if eligible_for_discount(self.plan_count()) {
            configured
        } else {
            None
        }
    }
}

//! Core types for the multi-plan subscription service.
//!
//! This crate holds the rules that run before anything is sent to the payment
//! provider, plus the shape of the events the provider sends back:
//!
//! - **Identifiers**: `PlanId`, `CustomerId`, `SubscriptionId`
//! - **Plans**: `PlanAllowList`, `MIN_PLANS_FOR_DISCOUNT`
//! - **Requests**: `SubscriptionRequest`
//! - **Events**: `WebhookEvent`, `EventType`
//!
//! # Discounts
//!
//! A configured coupon is applied when a customer subscribes to at least
//! [`MIN_PLANS_FOR_DISCOUNT`] plans in a single request.

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod error;
pub mod events;
pub mod ids;
pub mod plans;
pub mod subscription;

pub use error::{BillingError, Result};
pub use events::{EventData, EventType, WebhookEvent};
pub use ids::{CustomerId, IdError, PlanId, SubscriptionId};
pub use plans::{eligible_for_discount, PlanAllowList, MIN_PLANS_FOR_DISCOUNT};
pub use subscription::SubscriptionRequest;

//! Stripe integration.
//!
//! Stripe handles:
//! - Customer creation with an attached default payment method
//! - Multi-plan subscriptions and coupons
//! - Signed webhook delivery of billing events

pub mod client;
pub mod types;
pub mod webhook;

pub use client::{StripeClient, StripeError};
pub use types::*;
pub use webhook::{parse_event, WebhookError, WebhookVerifier, DEFAULT_TOLERANCE, SIGNATURE_HEADER};

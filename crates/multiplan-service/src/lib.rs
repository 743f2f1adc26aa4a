//! Multi-plan subscription HTTP service.
//!
//! This crate serves a small checkout flow on top of Stripe:
//!
//! - The checkout page and publishable key for the browser
//! - Customer creation with a subscription to one or more plans, with a
//!   coupon for multi-plan purchases
//! - Subscription lookup
//! - Signed Stripe webhooks, dispatched to an [`EventHandler`]
//!
//! # Webhook authentication
//!
//! With `STRIPE_WEBHOOK_SECRET` set, every delivery must carry a valid,
//! fresh `Stripe-Signature`. Without it, bodies are trusted as-is; that mode
//! is only for local development.

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
// Allow some pedantic lints that are noisy for Axum handler functions
#![allow(clippy::missing_errors_doc)] // Axum handlers all return Result
#![allow(clippy::unused_async)] // Handlers need async for the Axum handler trait

pub mod config;
pub mod crypto;
pub mod dispatch;
pub mod error;
pub mod handlers;
pub mod provider;
pub mod routes;
pub mod state;
pub mod stripe;

pub use config::ServiceConfig;
pub use dispatch::{EventHandler, HandlerResult, NoopEventHandler};
pub use error::ApiError;
pub use provider::{BillingProvider, CustomerParams, SubscriptionParams};
pub use routes::create_router;
pub use state::AppState;
pub use stripe::{StripeClient, StripeError, WebhookVerifier};

//! API handlers.

pub mod customers;
pub mod front;
pub mod health;
pub mod subscriptions;
pub mod webhooks;

//! Error types for subscription requests.

/// Result type for domain operations.
pub type Result<T> = std::result::Result<T, BillingError>;

/// Errors raised by the domain rules before anything reaches the provider.
#[derive(Debug, thiserror::Error)]
pub enum BillingError {
    /// One or more requested plans are not in the allow-list.
    #[error("invalid plan selection: {}", quoted(rejected))]
    InvalidPlanSelection {
        /// The requested plan IDs that are not allowed.
        rejected: Vec<String>,
    },

    /// The request did not name any plan.
    #[error("no plans selected")]
    NoPlansSelected,
}

fn quoted(ids: &[String]) -> String {
    ids.iter()
        .map(|id| format!("'{id}'"))
        .collect::<Vec<_>>()
        .join(", ")
}

//! Plan allow-list and the multi-plan discount rule.

use std::collections::BTreeSet;
use std::str::FromStr;

use crate::error::{BillingError, Result};
use crate::ids::PlanId;

// ============================================================================
// Constants
// ============================================================================

/// Number of plans a customer must subscribe to before the coupon applies.
pub const MIN_PLANS_FOR_DISCOUNT: usize = 2;

/// Whether a subscription with `plan_count` plans qualifies for the coupon.
#[must_use]
pub const fn eligible_for_discount(plan_count: usize) -> bool {
    plan_count >= MIN_PLANS_FOR_DISCOUNT
}

/// The set of plan identifiers customers may subscribe to.
///
/// Loaded once from configuration and never mutated afterwards.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PlanAllowList {
    plans: BTreeSet<PlanId>,
}

impl PlanAllowList {
    /// Build an allow-list from plan identifiers.
    pub fn new(plans: impl IntoIterator<Item = PlanId>) -> Self {
        Self {
            plans: plans.into_iter().collect(),
        }
    }

    /// Parse a comma-separated list such as `"plan_a, plan_b"`.
    ///
    /// Whitespace around entries is trimmed and empty entries are skipped.
    #[must_use]
    pub fn from_csv(value: &str) -> Self {
        Self::new(value.split(',').filter_map(|s| PlanId::from_str(s).ok()))
    }

    /// Check whether a plan is allowed.
    #[must_use]
    pub fn contains(&self, plan: &PlanId) -> bool {
        self.plans.contains(plan)
    }

    /// Number of allowed plans.
    #[must_use]
    pub fn len(&self) -> usize {
        self.plans.len()
    }

    /// Whether the allow-list has no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.plans.is_empty()
    }

    /// Iterate over allowed plans in sorted order.
    pub fn iter(&self) -> impl Iterator<Item = &PlanId> {
        self.plans.iter()
    }

    /// Validate a requested plan selection.
    ///
    /// Requested identifiers are matched exactly as given: no trimming or case
    /// folding. At least one plan must be requested. On success the matching
    /// plans are returned in request order.
    ///
    /// # Errors
    ///
    /// Returns [`BillingError::NoPlansSelected`] for an empty selection and
    /// [`BillingError::InvalidPlanSelection`] listing each rejected plan otherwise.
    pub fn validate<S: AsRef<str>>(&self, requested: &[S]) -> Result<Vec<PlanId>> {
        if requested.is_empty() {
            return Err(BillingError::NoPlansSelected);
        }

        let mut accepted = Vec::with_capacity(requested.len());
        let mut rejected = Vec::new();

        for id in requested {
            match self.plans.get(id.as_ref()) {
                Some(plan) => accepted.push(plan.clone()),
                None => rejected.push(id.as_ref().to_string()),
            }
        }

        if rejected.is_empty() {
            Ok(accepted)
        } else {
            Err(BillingError::InvalidPlanSelection { rejected })
        }
    }
}

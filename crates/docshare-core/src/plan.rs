//! What one reconciliation pass is going to do.

use crate::tokens::{GrantSet, PaidTokens, PendingGrant};

/// Outcome of diffing paid tokens against current grantees.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReconcilePlan {
    /// Number of distinct tokens with a valid payment.
    pub paid: usize,
    /// Paid tokens that already hold access.
    pub already_granted: usize,
    /// Tokens to grant, in first-occurrence order.
    pub pending: Vec<PendingGrant>,
}

impl ReconcilePlan {
    pub fn new(paid: &PaidTokens, granted: &GrantSet) -> Self {
        let pending = paid.pending(granted);
        Self {
            paid: paid.len(),
            already_granted: paid.len() - pending.len(),
            pending,
        }
    }

    /// True when there is nobody left to grant.
    pub fn is_noop(&self) -> bool {
        self.pending.is_empty()
    }
}

//! Paid-token collection and grant diffing.
//!
//! [`PaidTokens`] gathers the tokens of every valid payment, deduplicated
//! and in first-occurrence order. [`PaidTokens::pending`] subtracts the
//! current [`GrantSet`] to find who still needs access.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::types::{IdentityToken, PaymentRecord};
use crate::validation::paid_token;

/// A paid token that does not hold access yet.
///
/// Only lives for the duration of one reconciliation pass.
pub type PendingGrant = IdentityToken;

/// Identity tokens currently holding access to a document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GrantSet(HashSet<IdentityToken>);

impl GrantSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a grantee. Returns `false` if it was already present.
    pub fn insert(&mut self, token: IdentityToken) -> bool {
        self.0.insert(token)
    }

    pub fn contains(&self, token: &IdentityToken) -> bool {
        self.0.contains(token)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &IdentityToken> {
        self.0.iter()
    }
}

impl FromIterator<IdentityToken> for GrantSet {
    fn from_iter<I: IntoIterator<Item = IdentityToken>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl Extend<IdentityToken> for GrantSet {
    fn extend<I: IntoIterator<Item = IdentityToken>>(&mut self, iter: I) {
        self.0.extend(iter)
    }
}

/// Deduplicated tokens of valid, paid records.
///
/// Keeps first-valid-occurrence order so that grants and their notices are
/// reproducible for the same payment listing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PaidTokens {
    ordered: Vec<IdentityToken>,
    seen: HashSet<IdentityToken>,
}

impl PaidTokens {
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate every record and keep the tokens of the paid ones.
    ///
    /// Records that fail validation are skipped without error.
    pub fn collect<'a, I>(records: I, expected_description: &str) -> Self
    where
        I: IntoIterator<Item = &'a PaymentRecord>,
    {
        let mut tokens = Self::new();
        for record in records {
            if let Some(token) = paid_token(record, expected_description) {
                tokens.insert(token);
            }
        }
        tokens
    }

    /// Add a token. Returns `false` if it was already present.
    pub fn insert(&mut self, token: IdentityToken) -> bool {
        if self.seen.contains(&token) {
            return false;
        }
        self.seen.insert(token.clone());
        self.ordered.push(token);
        true
    }

    pub fn contains(&self, token: &IdentityToken) -> bool {
        self.seen.contains(token)
    }

    pub fn len(&self) -> usize {
        self.ordered.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ordered.is_empty()
    }

    /// Tokens in first-occurrence order.
    pub fn iter(&self) -> impl Iterator<Item = &IdentityToken> {
        self.ordered.iter()
    }

    /// Paid tokens that are not in `granted`, in first-occurrence order.
    pub fn pending(&self, granted: &GrantSet) -> Vec<PendingGrant> {
        self.ordered
            .iter()
            .filter(|token| !granted.contains(token))
            .cloned()
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PRODUCT: &str = "Unit testing masterclass";

    fn token(s: &str) -> IdentityToken {
        IdentityToken::new(s).unwrap()
    }

    fn paid(email: &str) -> PaymentRecord {
        PaymentRecord::new(PRODUCT, "success", format!("{email} /// some unused text"))
    }

    #[test]
    fn test_collect_drops_invalid_records() {
        let records = vec![
            paid("a@x.com"),
            PaymentRecord::new("BAD DESCRIPTION", "success", "b@x.com /// x"),
            PaymentRecord::new(PRODUCT, "failure", "c@x.com /// x"),
            PaymentRecord::new(PRODUCT, "success", "d@x.com //WRONG ID// x"),
            paid("e@x.com"),
        ];

        let tokens = PaidTokens::collect(&records, PRODUCT);
        let collected: Vec<_> = tokens.iter().map(|t| t.as_str()).collect();
        assert_eq!(collected, vec!["a@x.com", "e@x.com"]);
    }

    #[test]
    fn test_collect_deduplicates_in_first_occurrence_order() {
        let records = vec![paid("b@x.com"), paid("a@x.com"), paid("b@x.com")];

        let tokens = PaidTokens::collect(&records, PRODUCT);
        assert_eq!(tokens.len(), 2);
        let collected: Vec<_> = tokens.iter().map(|t| t.as_str()).collect();
        assert_eq!(collected, vec!["b@x.com", "a@x.com"]);
    }

    #[test]
    fn test_pending_excludes_granted() {
        let records = vec![
            paid("email1@email.email"),
            paid("email2@email.email"),
            paid("email3@email.email"),
            paid("email4@email.email"),
        ];
        let granted: GrantSet = [token("email3@email.email"), token("email4@email.email")]
            .into_iter()
            .collect();

        let pending = PaidTokens::collect(&records, PRODUCT).pending(&granted);
        assert_eq!(
            pending,
            vec![token("email1@email.email"), token("email2@email.email")]
        );
    }

    #[test]
    fn test_pending_empty_when_all_granted() {
        let records = vec![paid("a@x.com")];
        let granted: GrantSet = [token("a@x.com"), token("z@x.com")].into_iter().collect();

        assert!(PaidTokens::collect(&records, PRODUCT)
            .pending(&granted)
            .is_empty());
    }

    #[test]
    fn test_grant_set_collapses_duplicates() {
        let mut set = GrantSet::new();
        assert!(set.insert(token("a@x.com")));
        assert!(!set.insert(token("a@x.com")));
        assert_eq!(set.len(), 1);
    }
}

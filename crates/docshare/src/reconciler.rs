//! The Reconciler: grants document access to paying users.
//!
//! Brings together a payment source, a permission store and a grant
//! notifier. All three are built by the caller and handed in, so tests can
//! substitute fakes for any of them.

use docshare_collab::{Credential, GrantNotifier, LogNotifier, PaymentSource, PermissionStore};
use docshare_core::{DocumentId, PaidTokens, ReconcilePlan, GRANTED_ROLE};

use crate::config::ReconcilerConfig;
use crate::error::{ReconcileError, Result};

/// Reconciles payments against a document's grantees.
///
/// Holds no state between passes. Each call authenticates afresh and
/// issues its grants one at a time.
pub struct Reconciler<P, S, N = LogNotifier> {
    payments: P,
    permissions: S,
    notifier: N,
    config: ReconcilerConfig,
}

impl<P: PaymentSource, S: PermissionStore> Reconciler<P, S, LogNotifier> {
    /// Create a reconciler that logs grant notices through `tracing`.
    pub fn new(payments: P, permissions: S, config: ReconcilerConfig) -> Self {
        Self::with_notifier(payments, permissions, LogNotifier, config)
    }
}

impl<P: PaymentSource, S: PermissionStore, N: GrantNotifier> Reconciler<P, S, N> {
    /// Create a reconciler with a custom grant notifier.
    pub fn with_notifier(
        payments: P,
        permissions: S,
        notifier: N,
        config: ReconcilerConfig,
    ) -> Self {
        Self {
            payments,
            permissions,
            notifier,
            config,
        }
    }

    pub fn config(&self) -> &ReconcilerConfig {
        &self.config
    }

    pub fn payments(&self) -> &P {
        &self.payments
    }

    pub fn permissions(&self) -> &S {
        &self.permissions
    }

    pub fn notifier(&self) -> &N {
        &self.notifier
    }

    /// Run one reconciliation pass for `document`.
    ///
    /// Grants `commenter` access to every paid token that does not hold
    /// access yet, in first-payment order, notifying after each grant. The
    /// first failing collaborator call ends the pass; its error is returned
    /// as-is and no later grant is attempted.
    pub async fn share_document(&self, document: &DocumentId) -> Result<()> {
        let (credential, plan) = self.prepare(document).await?;

        for grantee in &plan.pending {
            self.permissions
                .grant(&credential, document, grantee, GRANTED_ROLE)
                .await
                .map_err(|e| {
                    tracing::warn!(
                        document = %document,
                        grantee = %grantee,
                        "grant failed: {}",
                        e
                    );
                    ReconcileError::from(e)
                })?;

            self.notifier.granted(document, grantee, GRANTED_ROLE);
        }

        tracing::debug!(
            document = %document,
            granted = plan.pending.len(),
            "reconciliation complete"
        );
        Ok(())
    }

    /// Work out what [`share_document`](Self::share_document) would grant,
    /// without granting anything.
    pub async fn plan(&self, document: &DocumentId) -> Result<ReconcilePlan> {
        let (_credential, plan) = self.prepare(document).await?;
        Ok(plan)
    }

    /// Authenticate, fetch payments, list grantees and diff them.
    async fn prepare(&self, document: &DocumentId) -> Result<(Credential, ReconcilePlan)> {
        // 1. Authenticate before touching any data
        let credential = self.permissions.authenticate().await.map_err(|e| {
            tracing::warn!(document = %document, "authentication failed: {}", e);
            ReconcileError::from(e)
        })?;

        // 2. Fetch every payment of the window
        let records = self.payments.fetch_payments().await.map_err(|e| {
            tracing::warn!(document = %document, "fetching payments failed: {}", e);
            ReconcileError::from(e)
        })?;

        // 3. Keep the tokens of valid, paid records
        let paid = PaidTokens::collect(&records, self.config.expected_description());
        tracing::debug!(
            records = records.len(),
            paid = paid.len(),
            "collected paid tokens"
        );

        // 4. Current grantees
        let granted = self
            .permissions
            .list_grantees(&credential, document)
            .await
            .map_err(|e| {
                tracing::warn!(document = %document, "listing grantees failed: {}", e);
                ReconcileError::from(e)
            })?;

        // 5. Diff
        let plan = ReconcilePlan::new(&paid, &granted);
        tracing::debug!(
            document = %document,
            already_granted = plan.already_granted,
            pending = plan.pending.len(),
            "planned grants"
        );

        Ok((credential, plan))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use docshare_collab::{MemoryPaymentSource, MemoryPermissionStore};
    use docshare_core::{IdentityToken, PaymentRecord, Role};

    const PRODUCT: &str = "Unit testing masterclass";

    fn doc() -> DocumentId {
        DocumentId::new("FAKE_ID").unwrap()
    }

    fn token(s: &str) -> IdentityToken {
        IdentityToken::new(s).unwrap()
    }

    fn paid(email: &str) -> PaymentRecord {
        PaymentRecord::new(PRODUCT, "success", format!("{email} /// some unused text"))
    }

    async fn reconciler(
        records: Vec<PaymentRecord>,
        enrolled: &[&str],
    ) -> Reconciler<MemoryPaymentSource, MemoryPermissionStore> {
        let store = MemoryPermissionStore::new("token");
        store
            .add_document_with(doc(), enrolled.iter().map(|e| (token(e), Role::Commenter)))
            .await;
        Reconciler::new(
            MemoryPaymentSource::new(records),
            store,
            ReconcilerConfig::new(PRODUCT).unwrap(),
        )
    }

    #[tokio::test]
    async fn test_grants_commenter_to_new_payers() {
        let r = reconciler(vec![paid("a@x.com"), paid("b@x.com")], &["b@x.com"]).await;

        r.share_document(&doc()).await.unwrap();

        assert_eq!(
            r.permissions().role_of(&doc(), &token("a@x.com")).await,
            Some(Role::Commenter)
        );
    }

    #[tokio::test]
    async fn test_second_pass_grants_nothing() {
        let r = reconciler(vec![paid("a@x.com")], &[]).await;

        r.share_document(&doc()).await.unwrap();
        let plan = r.plan(&doc()).await.unwrap();

        assert!(plan.is_noop());
        assert_eq!(plan.already_granted, 1);
    }

    #[tokio::test]
    async fn test_plan_does_not_grant() {
        let r = reconciler(vec![paid("a@x.com")], &[]).await;

        let plan = r.plan(&doc()).await.unwrap();
        assert_eq!(plan.pending, vec![token("a@x.com")]);
        assert_eq!(r.permissions().role_of(&doc(), &token("a@x.com")).await, None);
    }

    #[tokio::test]
    async fn test_unknown_document_is_a_list_error() {
        let r = reconciler(vec![paid("a@x.com")], &[]).await;
        let other = DocumentId::new("OTHER").unwrap();

        let err = r.share_document(&other).await.unwrap_err();
        assert!(matches!(err, ReconcileError::List(_)));
    }
}

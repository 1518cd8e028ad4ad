//! Collaborator traits: the abstract interface to the payment gateway and
//! the document permission provider.
//!
//! Implementations include in-memory backends (for tests and dry runs) and
//! a JSON report reader. Network adapters live outside this workspace.

use std::fmt;

use async_trait::async_trait;
use docshare_core::{DocumentId, GrantSet, IdentityToken, PaymentRecord, Role};

use crate::error::{AuthError, GrantError, ListError, PaymentSourceError};

/// Proof of a successful authentication with a [`PermissionStore`].
///
/// Every listing and grant call takes one, so a store cannot be queried
/// before [`PermissionStore::authenticate`] has returned.
#[derive(Clone, PartialEq, Eq)]
pub struct Credential {
    access_token: String,
}

impl Credential {
    pub fn new(access_token: impl Into<String>) -> Self {
        Self {
            access_token: access_token.into(),
        }
    }

    pub fn access_token(&self) -> &str {
        &self.access_token
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Credential(<redacted>)")
    }
}

/// Source of payment records.
///
/// Must return every record of the reconciliation window. Filtering by
/// product or status is done by the caller.
#[async_trait]
pub trait PaymentSource: Send + Sync {
    /// Fetch all payment records.
    async fn fetch_payments(&self) -> Result<Vec<PaymentRecord>, PaymentSourceError>;
}

/// Document permission provider.
///
/// All listing and granting is scoped to one document and requires a
/// [`Credential`] from [`authenticate`](PermissionStore::authenticate).
#[async_trait]
pub trait PermissionStore: Send + Sync {
    /// Authenticate and return a fresh credential.
    async fn authenticate(&self) -> Result<Credential, AuthError>;

    /// List the identity tokens currently holding access to `document`.
    async fn list_grantees(
        &self,
        credential: &Credential,
        document: &DocumentId,
    ) -> Result<GrantSet, ListError>;

    /// Grant `role` on `document` to `grantee`.
    async fn grant(
        &self,
        credential: &Credential,
        document: &DocumentId,
        grantee: &IdentityToken,
        role: Role,
    ) -> Result<(), GrantError>;
}

#[async_trait]
impl<T: PaymentSource + ?Sized> PaymentSource for std::sync::Arc<T> {
    async fn fetch_payments(&self) -> Result<Vec<PaymentRecord>, PaymentSourceError> {
        (**self).fetch_payments().await
    }
}

#[async_trait]
impl<T: PermissionStore + ?Sized> PermissionStore for std::sync::Arc<T> {
    async fn authenticate(&self) -> Result<Credential, AuthError> {
        (**self).authenticate().await
    }

    async fn list_grantees(
        &self,
        credential: &Credential,
        document: &DocumentId,
    ) -> Result<GrantSet, ListError> {
        (**self).list_grantees(credential, document).await
    }

    async fn grant(
        &self,
        credential: &Credential,
        document: &DocumentId,
        grantee: &IdentityToken,
        role: Role,
    ) -> Result<(), GrantError> {
        (**self).grant(credential, document, grantee, role).await
    }
}

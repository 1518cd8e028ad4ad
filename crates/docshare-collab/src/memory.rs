//! In-memory implementations of the collaborator traits.
//!
//! Primarily for tests and dry runs. The permission store has the same
//! semantics as a real provider: grants stick, so a second reconciliation
//! pass over the same payments grants nothing.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use docshare_core::{DocumentId, GrantSet, IdentityToken, PaymentRecord, Role};

use crate::error::{AuthError, GrantError, ListError, PaymentSourceError};
use crate::traits::{Credential, PaymentSource, PermissionStore};

/// Payment source serving a fixed, replaceable list of records.
#[derive(Default)]
pub struct MemoryPaymentSource {
    records: RwLock<Vec<PaymentRecord>>,
}

impl MemoryPaymentSource {
    pub fn new(records: Vec<PaymentRecord>) -> Self {
        Self {
            records: RwLock::new(records),
        }
    }

    /// Append a record, as if a new payment arrived.
    pub async fn push(&self, record: PaymentRecord) {
        self.records.write().await.push(record);
    }
}

#[async_trait]
impl PaymentSource for MemoryPaymentSource {
    async fn fetch_payments(&self) -> Result<Vec<PaymentRecord>, PaymentSourceError> {
        Ok(self.records.read().await.clone())
    }
}

/// Permission store keeping grantees per document in memory.
///
/// Only registered documents exist; calls for anything else fail with
/// `NotFound`. Credentials other than the one it hands out are rejected.
pub struct MemoryPermissionStore {
    access_token: String,
    documents: RwLock<HashMap<DocumentId, HashMap<IdentityToken, Role>>>,
}

impl MemoryPermissionStore {
    /// Create a store that issues `access_token` on authentication.
    pub fn new(access_token: impl Into<String>) -> Self {
        Self {
            access_token: access_token.into(),
            documents: RwLock::new(HashMap::new()),
        }
    }

    /// Register a document with no grantees. No-op if it already exists.
    pub async fn add_document(&self, document: DocumentId) {
        self.documents.write().await.entry(document).or_default();
    }

    /// Register a document with existing grantees.
    pub async fn add_document_with(
        &self,
        document: DocumentId,
        grantees: impl IntoIterator<Item = (IdentityToken, Role)>,
    ) {
        self.documents
            .write()
            .await
            .entry(document)
            .or_default()
            .extend(grantees);
    }

    /// Role held by `grantee` on `document`, if any.
    pub async fn role_of(&self, document: &DocumentId, grantee: &IdentityToken) -> Option<Role> {
        self.documents
            .read()
            .await
            .get(document)
            .and_then(|grantees| grantees.get(grantee).copied())
    }

    fn accepts(&self, credential: &Credential) -> bool {
        credential.access_token() == self.access_token
    }
}

#[async_trait]
impl PermissionStore for MemoryPermissionStore {
    async fn authenticate(&self) -> Result<Credential, AuthError> {
        if self.access_token.is_empty() {
            return Err(AuthError::Credentials("no access token configured".into()));
        }
        Ok(Credential::new(self.access_token.clone()))
    }

    async fn list_grantees(
        &self,
        credential: &Credential,
        document: &DocumentId,
    ) -> Result<GrantSet, ListError> {
        if !self.accepts(credential) {
            return Err(ListError::Unauthorized);
        }

        let documents = self.documents.read().await;
        let grantees = documents
            .get(document)
            .ok_or_else(|| ListError::NotFound(document.clone()))?;

        Ok(grantees.keys().cloned().collect())
    }

    async fn grant(
        &self,
        credential: &Credential,
        document: &DocumentId,
        grantee: &IdentityToken,
        role: Role,
    ) -> Result<(), GrantError> {
        if !self.accepts(credential) {
            return Err(GrantError::Unauthorized(grantee.clone()));
        }

        let mut documents = self.documents.write().await;
        let grantees = documents
            .get_mut(document)
            .ok_or_else(|| GrantError::NotFound(document.clone()))?;

        grantees.insert(grantee.clone(), role);
        Ok(())
    }
}

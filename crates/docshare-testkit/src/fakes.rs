//! Recording fakes for the collaborator traits.
//!
//! Every fake appends to a shared [`CallLog`], so a test can assert the
//! relative order of calls across collaborators, including when each grant
//! notice was emitted.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use docshare_collab::{
    notice_line, AuthError, Credential, GrantError, GrantNotifier, ListError, PaymentSource,
    PaymentSourceError, PermissionStore,
};
use docshare_core::{DocumentId, GrantSet, IdentityToken, PaymentRecord, Role};

/// A collaborator call, as recorded by the fakes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    Authenticate,
    FetchPayments,
    ListGrantees(DocumentId),
    Grant {
        document: DocumentId,
        grantee: IdentityToken,
        role: Role,
    },
    Notice(IdentityToken),
}

/// Shared, ordered log of calls.
#[derive(Debug, Clone, Default)]
pub struct CallLog(Arc<Mutex<Vec<Call>>>);

impl CallLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&self, call: Call) {
        self.0.lock().expect("call log poisoned").push(call);
    }

    /// Snapshot of all calls so far.
    pub fn calls(&self) -> Vec<Call> {
        self.0.lock().expect("call log poisoned").clone()
    }

    /// Grantees of every grant call, in call order.
    pub fn grants(&self) -> Vec<IdentityToken> {
        self.calls()
            .into_iter()
            .filter_map(|call| match call {
                Call::Grant { grantee, .. } => Some(grantee),
                _ => None,
            })
            .collect()
    }

    pub fn contains(&self, call: &Call) -> bool {
        self.calls().contains(call)
    }

    pub fn count(&self, pred: impl Fn(&Call) -> bool) -> usize {
        self.calls().iter().filter(|c| pred(c)).count()
    }
}

/// Payment source returning fixed records or a fixed failure.
pub struct FakePaymentSource {
    records: Vec<PaymentRecord>,
    failure: Option<PaymentSourceError>,
    log: CallLog,
}

impl FakePaymentSource {
    pub fn new(log: CallLog, records: Vec<PaymentRecord>) -> Self {
        Self {
            records,
            failure: None,
            log,
        }
    }

    /// Fail every fetch with `error`.
    pub fn failing(mut self, error: PaymentSourceError) -> Self {
        self.failure = Some(error);
        self
    }
}

#[async_trait]
impl PaymentSource for FakePaymentSource {
    async fn fetch_payments(&self) -> Result<Vec<PaymentRecord>, PaymentSourceError> {
        self.log.record(Call::FetchPayments);
        match &self.failure {
            Some(error) => Err(error.clone()),
            None => Ok(self.records.clone()),
        }
    }
}

/// Permission store with scripted grantees and failures.
///
/// Grants are recorded but do not change the listed grantees.
pub struct FakePermissionStore {
    grantees: GrantSet,
    auth_failure: Option<AuthError>,
    list_failure: Option<ListError>,
    grant_failures: HashMap<IdentityToken, GrantError>,
    log: CallLog,
}

impl FakePermissionStore {
    pub fn new(log: CallLog) -> Self {
        Self {
            grantees: GrantSet::new(),
            auth_failure: None,
            list_failure: None,
            grant_failures: HashMap::new(),
            log,
        }
    }

    pub fn with_grantees(mut self, grantees: impl IntoIterator<Item = IdentityToken>) -> Self {
        self.grantees.extend(grantees);
        self
    }

    pub fn failing_auth(mut self, error: AuthError) -> Self {
        self.auth_failure = Some(error);
        self
    }

    pub fn failing_list(mut self, error: ListError) -> Self {
        self.list_failure = Some(error);
        self
    }

    /// Fail the grant call for `grantee` with `error`.
    pub fn failing_grant(mut self, grantee: IdentityToken, error: GrantError) -> Self {
        self.grant_failures.insert(grantee, error);
        self
    }
}

#[async_trait]
impl PermissionStore for FakePermissionStore {
    async fn authenticate(&self) -> Result<Credential, AuthError> {
        self.log.record(Call::Authenticate);
        match &self.auth_failure {
            Some(error) => Err(error.clone()),
            None => Ok(Credential::new("fake-access-token")),
        }
    }

    async fn list_grantees(
        &self,
        _credential: &Credential,
        document: &DocumentId,
    ) -> Result<GrantSet, ListError> {
        self.log.record(Call::ListGrantees(document.clone()));
        match &self.list_failure {
            Some(error) => Err(error.clone()),
            None => Ok(self.grantees.clone()),
        }
    }

    async fn grant(
        &self,
        _credential: &Credential,
        document: &DocumentId,
        grantee: &IdentityToken,
        role: Role,
    ) -> Result<(), GrantError> {
        self.log.record(Call::Grant {
            document: document.clone(),
            grantee: grantee.clone(),
            role,
        });
        match self.grant_failures.get(grantee) {
            Some(error) => Err(error.clone()),
            None => Ok(()),
        }
    }
}

/// Notifier keeping the rendered notice lines.
#[derive(Debug, Default)]
pub struct RecordingNotifier {
    lines: Mutex<Vec<String>>,
    log: Option<CallLog>,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Also record each notice into `log` as [`Call::Notice`].
    pub fn with_log(log: CallLog) -> Self {
        Self {
            lines: Mutex::new(Vec::new()),
            log: Some(log),
        }
    }

    pub fn lines(&self) -> Vec<String> {
        self.lines.lock().expect("notice lines poisoned").clone()
    }

    /// True if any notice line contains `needle`.
    pub fn mentions(&self, needle: &str) -> bool {
        self.lines().iter().any(|line| line.contains(needle))
    }
}

impl GrantNotifier for RecordingNotifier {
    fn granted(&self, _document: &DocumentId, grantee: &IdentityToken, _role: Role) {
        self.lines
            .lock()
            .expect("notice lines poisoned")
            .push(notice_line(grantee));
        if let Some(log) = &self.log {
            log.record(Call::Notice(grantee.clone()));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn doc() -> DocumentId {
        DocumentId::new("FAKE_ID").unwrap()
    }

    #[tokio::test]
    async fn test_log_is_shared_across_fakes() {
        let log = CallLog::new();
        let source = FakePaymentSource::new(log.clone(), vec![]);
        let store = FakePermissionStore::new(log.clone());

        let credential = store.authenticate().await.unwrap();
        source.fetch_payments().await.unwrap();
        store.list_grantees(&credential, &doc()).await.unwrap();

        assert_eq!(
            log.calls(),
            vec![
                Call::Authenticate,
                Call::FetchPayments,
                Call::ListGrantees(doc())
            ]
        );
    }

    #[tokio::test]
    async fn test_scripted_grant_failure() {
        let log = CallLog::new();
        let bad = IdentityToken::new("bad@x.com").unwrap();
        let store = FakePermissionStore::new(log.clone()).failing_grant(
            bad.clone(),
            GrantError::Backend {
                document: doc(),
                token: bad.clone(),
                reason: "Unknown error".into(),
            },
        );
        let credential = store.authenticate().await.unwrap();

        assert!(store
            .grant(&credential, &doc(), &bad, Role::Commenter)
            .await
            .is_err());
        assert_eq!(log.grants(), vec![bad]);
    }

    #[test]
    fn test_recording_notifier() {
        let notifier = RecordingNotifier::new();
        let token = IdentityToken::new("a@x.com").unwrap();
        notifier.granted(&doc(), &token, Role::Commenter);

        assert_eq!(notifier.lines(), vec!["[+] a@x.com".to_string()]);
        assert!(notifier.mentions("[+] a@x.com"));
    }
}

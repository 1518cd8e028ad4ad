//! Test fixtures and helpers.
//!
//! Common setup code for reconciliation tests.

use docshare_core::{DocumentId, IdentityToken, PaymentRecord, ORDER_ID_SEPARATOR, SUCCESS_STATUS};

use crate::fakes::{CallLog, FakePaymentSource, FakePermissionStore, RecordingNotifier};

/// Product description used by the fixtures.
pub const EXPECTED_DESCRIPTION: &str = "Unit testing masterclass";

/// Parse a token, panicking on invalid input.
pub fn token(email: &str) -> IdentityToken {
    IdentityToken::new(email).expect("fixture token must be valid")
}

/// A successful payment for [`EXPECTED_DESCRIPTION`] by `email`.
pub fn paid_record(email: &str) -> PaymentRecord {
    PaymentRecord::new(
        EXPECTED_DESCRIPTION,
        SUCCESS_STATUS,
        format!("{email}{ORDER_ID_SEPARATOR}some unused text"),
    )
}

/// A document plus a call log shared by every fake built from it.
pub struct TestFixture {
    pub document: DocumentId,
    pub log: CallLog,
}

impl TestFixture {
    pub fn new() -> Self {
        Self {
            document: DocumentId::new("FAKE_ID").expect("fixture document id must be valid"),
            log: CallLog::new(),
        }
    }

    /// Payment source serving a paid record for each email.
    pub fn payments_from(&self, emails: &[&str]) -> FakePaymentSource {
        self.payments(emails.iter().map(|e| paid_record(e)).collect())
    }

    /// Payment source serving `records` as given.
    pub fn payments(&self, records: Vec<PaymentRecord>) -> FakePaymentSource {
        FakePaymentSource::new(self.log.clone(), records)
    }

    /// Permission store where `enrolled` already hold access.
    pub fn permissions(&self, enrolled: &[&str]) -> FakePermissionStore {
        FakePermissionStore::new(self.log.clone()).with_grantees(enrolled.iter().map(|e| token(e)))
    }

    /// Notifier that also records its notices into the call log.
    pub fn notifier(&self) -> RecordingNotifier {
        RecordingNotifier::with_log(self.log.clone())
    }
}

impl Default for TestFixture {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use docshare_core::paid_token;

    #[test]
    fn test_paid_record_validates() {
        let record = paid_record("a@x.com");
        assert_eq!(paid_token(&record, EXPECTED_DESCRIPTION), Some(token("a@x.com")));
    }

    #[test]
    fn test_fixture_fakes_share_log() {
        let fixture = TestFixture::new();
        let _payments = fixture.payments_from(&["a@x.com"]);
        let _store = fixture.permissions(&[]);
        assert!(fixture.log.calls().is_empty());
    }
}

//! Payment gateway reports stored as JSON.
//!
//! The gateway's reporting endpoint answers with
//! `{ "data": [ <payment>, ... ] }` on success and with an `errors` list
//! when the request is rejected. [`JsonReportSource`] reads such a report
//! from disk, which is how exported reports are reconciled offline.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use serde::de::IgnoredAny;
use serde::{Deserialize, Deserializer, Serialize};

use docshare_core::PaymentRecord;

use crate::error::PaymentSourceError;
use crate::traits::PaymentSource;

/// A gateway report: payment records or the errors that replaced them.
///
/// Entries of `data` that are not objects are kept as empty records, so
/// they fail validation instead of failing the whole report.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentReport {
    #[serde(default, deserialize_with = "lenient_records")]
    pub data: Vec<PaymentRecord>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub errors: Option<Vec<String>>,
}

fn lenient_records<'de, D>(deserializer: D) -> Result<Vec<PaymentRecord>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Entry {
        Record(PaymentRecord),
        Other(IgnoredAny),
    }

    let entries = Option::<Vec<Entry>>::deserialize(deserializer)?;
    Ok(entries
        .unwrap_or_default()
        .into_iter()
        .map(|entry| match entry {
            Entry::Record(record) => record,
            Entry::Other(_) => PaymentRecord::default(),
        })
        .collect())
}

impl PaymentReport {
    /// Parse a report from its JSON text.
    pub fn from_json(json: &str) -> Result<Self, PaymentSourceError> {
        serde_json::from_str(json).map_err(|e| PaymentSourceError::MalformedReport(e.to_string()))
    }

    /// The records, or the gateway's rejection if the report carries one.
    ///
    /// An `errors` key is a rejection even when the list is empty.
    pub fn into_records(self) -> Result<Vec<PaymentRecord>, PaymentSourceError> {
        match self.errors {
            Some(errors) => Err(PaymentSourceError::Api { errors }),
            None => Ok(self.data),
        }
    }
}

/// Payment source reading a [`PaymentReport`] file on every fetch.
#[derive(Debug, Clone)]
pub struct JsonReportSource {
    path: PathBuf,
}

impl JsonReportSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl PaymentSource for JsonReportSource {
    async fn fetch_payments(&self) -> Result<Vec<PaymentRecord>, PaymentSourceError> {
        let json = tokio::fs::read_to_string(&self.path)
            .await
            .map_err(|e| PaymentSourceError::Io(format!("{}: {}", self.path.display(), e)))?;

        let records = PaymentReport::from_json(&json)?.into_records()?;
        tracing::debug!(
            path = %self.path.display(),
            records = records.len(),
            "read payment report"
        );
        Ok(records)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    use docshare_core::PaidTokens;

    fn write_report(json: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(json.as_bytes()).unwrap();
        file
    }

    #[tokio::test]
    async fn test_reads_records() {
        let file = write_report(
            r#"{"result":"success","data":[
                {"description":"p","status":"success","order_id":"a@x.com /// 1","amount":10},
                {"status":"failure"}
            ]}"#,
        );

        let records = JsonReportSource::new(file.path())
            .fetch_payments()
            .await
            .unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].order_id, "a@x.com /// 1");
        assert!(records[1].order_id.is_empty());
    }

    #[tokio::test]
    async fn test_wrong_typed_fields_do_not_hide_valid_records() {
        let file = write_report(
            r#"{"data":[
                {"description":"p","status":"success","order_id":"a@x.com /// 1"},
                {"description":null,"status":"success","order_id":12345},
                42,
                null
            ]}"#,
        );

        let records = JsonReportSource::new(file.path())
            .fetch_payments()
            .await
            .unwrap();
        assert_eq!(records.len(), 4);

        let paid = PaidTokens::collect(&records, "p");
        let tokens: Vec<_> = paid.iter().map(|t| t.as_str()).collect();
        assert_eq!(tokens, vec!["a@x.com"]);
        assert_eq!(records[1], PaymentRecord::new("", "success", ""));
        assert_eq!(records[2], PaymentRecord::default());
    }

    #[test]
    fn test_null_data_has_no_records() {
        let report = PaymentReport::from_json(r#"{"data":null}"#).unwrap();
        assert!(report.into_records().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_error_list_is_a_rejection() {
        let file = write_report(r#"{"errors":[]}"#);

        let err = JsonReportSource::new(file.path())
            .fetch_payments()
            .await
            .unwrap_err();
        assert_eq!(err, PaymentSourceError::Api { errors: vec![] });
    }

    #[tokio::test]
    async fn test_malformed_report() {
        let file = write_report("{not json");

        let err = JsonReportSource::new(file.path())
            .fetch_payments()
            .await
            .unwrap_err();
        assert!(matches!(err, PaymentSourceError::MalformedReport(_)));
    }

    #[tokio::test]
    async fn test_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = JsonReportSource::new(dir.path().join("missing.json"))
            .fetch_payments()
            .await
            .unwrap_err();
        assert!(matches!(err, PaymentSourceError::Io(_)));
    }

    #[test]
    fn test_empty_report_has_no_records() {
        let report = PaymentReport::from_json("{}").unwrap();
        assert_eq!(report.into_records().unwrap(), vec![]);
    }
}

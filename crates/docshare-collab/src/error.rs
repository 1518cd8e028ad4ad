//! Error types for collaborator operations.
//!
//! One enum per operation family. The reconciler passes these through
//! untouched, so they carry everything a caller needs to act on them.

use docshare_core::{DocumentId, IdentityToken};
use thiserror::Error;

/// Authentication with the permission store failed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthError {
    /// Credentials could not be built (bad key material, missing account).
    #[error("could not build credentials: {0}")]
    Credentials(String),

    /// The provider refused to authorize the credentials.
    #[error("authorization rejected: {0}")]
    Rejected(String),
}

/// The payment source could not produce its records.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PaymentSourceError {
    /// The gateway answered with an error list.
    #[error("payment gateway returned errors: {errors:?}")]
    Api { errors: Vec<String> },

    /// The gateway could not be reached.
    #[error("payment gateway unreachable: {0}")]
    Transport(String),

    /// A stored report could not be read.
    #[error("could not read payment report: {0}")]
    Io(String),

    /// The report was read but is not a valid report.
    #[error("malformed payment report: {0}")]
    MalformedReport(String),
}

/// Listing the grantees of a document failed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ListError {
    /// The credential is not accepted by the store.
    #[error("credential rejected while listing grantees")]
    Unauthorized,

    /// The document does not exist.
    #[error("document not found: {0}")]
    NotFound(DocumentId),

    /// Backend failure.
    #[error("could not list grantees of {document}: {reason}")]
    Backend { document: DocumentId, reason: String },
}

/// Granting access to a single grantee failed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GrantError {
    /// The credential is not accepted by the store.
    #[error("credential rejected while granting access to {0}")]
    Unauthorized(IdentityToken),

    /// The document does not exist.
    #[error("document not found: {0}")]
    NotFound(DocumentId),

    /// Backend failure.
    #[error("could not grant {token} access to {document}: {reason}")]
    Backend {
        document: DocumentId,
        token: IdentityToken,
        reason: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_name_the_failure() {
        let err = AuthError::Rejected("could not authorize".into());
        assert_eq!(err.to_string(), "authorization rejected: could not authorize");

        let err = ListError::Backend {
            document: DocumentId::new("doc").unwrap(),
            reason: "cannot get permissions list".into(),
        };
        assert_eq!(
            err.to_string(),
            "could not list grantees of doc: cannot get permissions list"
        );

        let err = PaymentSourceError::Api { errors: vec![] };
        assert_eq!(err.to_string(), "payment gateway returned errors: []");
    }
}

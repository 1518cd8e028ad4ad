//! Error types for reconciliation.

use docshare_collab::{AuthError, GrantError, ListError, PaymentSourceError};
use thiserror::Error;

/// Errors that end a reconciliation pass.
///
/// One variant per collaborator. Each carries the collaborator's error
/// exactly as it was returned, and displays as that error.
#[derive(Debug, Error)]
pub enum ReconcileError {
    /// Authentication with the permission store failed.
    #[error(transparent)]
    Auth(#[from] AuthError),

    /// The payment source failed.
    #[error(transparent)]
    PaymentSource(#[from] PaymentSourceError),

    /// Listing the document's grantees failed.
    #[error(transparent)]
    List(#[from] ListError),

    /// A grant failed. Grants before it were applied.
    #[error(transparent)]
    Grant(#[from] GrantError),
}

/// Errors loading a [`ReconcilerConfig`](crate::ReconcilerConfig).
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("expected product description is empty")]
    EmptyDescription,

    #[error("invalid config json: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type for reconciliation.
pub type Result<T> = std::result::Result<T, ReconcileError>;

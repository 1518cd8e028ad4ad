//! Error types for docshare core.

use thiserror::Error;

/// Errors raised when constructing core values from untrusted strings.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoreError {
    #[error("identity token is empty")]
    EmptyToken,

    #[error("document id is empty")]
    EmptyDocumentId,

    #[error("unknown role: {0}")]
    UnknownRole(String),
}

/// Result type for core operations.
pub type Result<T> = std::result::Result<T, CoreError>;

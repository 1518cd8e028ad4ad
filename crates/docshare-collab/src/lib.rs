//! # Docshare Collaborators
//!
//! The two external systems a reconciliation pass talks to, expressed as
//! async traits so the reconciler never depends on a concrete gateway or
//! document provider.
//!
//! ## Key Types
//!
//! - [`PaymentSource`] - Lists the payment records of the reconciliation window
//! - [`PermissionStore`] - Authenticates, lists grantees and grants access
//! - [`Credential`] - Proof of authentication, required by every store call
//! - [`MemoryPaymentSource`] / [`MemoryPermissionStore`] - In-memory backends
//! - [`JsonReportSource`] - Reads a payment gateway report from disk
//! - [`GrantNotifier`] - Receives a notice for every access granted
//!
//! ## Errors
//!
//! Every operation has its own error type ([`AuthError`],
//! [`PaymentSourceError`], [`ListError`], [`GrantError`]) so a caller can
//! always tell which collaborator failed.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use docshare_collab::{MemoryPermissionStore, PermissionStore};
//! use docshare_core::DocumentId;
//!
//! async fn example() {
//!     let document = DocumentId::new("FAKE_ID").unwrap();
//!     let store = MemoryPermissionStore::new("token");
//!     store.add_document(document.clone()).await;
//!
//!     let credential = store.authenticate().await.unwrap();
//!     let grantees = store.list_grantees(&credential, &document).await.unwrap();
//!     assert!(grantees.is_empty());
//! }
//! ```

pub mod error;
pub mod memory;
pub mod notify;
pub mod report;
pub mod traits;

pub use error::{AuthError, GrantError, ListError, PaymentSourceError};
pub use memory::{MemoryPaymentSource, MemoryPermissionStore};
pub use notify::{notice_line, GrantNotifier, LogNotifier, GRANT_MARKER};
pub use report::{JsonReportSource, PaymentReport};
pub use traits::{Credential, PaymentSource, PermissionStore};

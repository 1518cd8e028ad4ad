//! # Docshare
//!
//! Grants access to a shared document to everyone who paid for it.
//!
//! ## Overview
//!
//! A reconciliation pass runs strictly forward:
//!
//! 1. Authenticate with the permission store
//! 2. Fetch every payment record from the payment source
//! 3. Keep the identity tokens of successful payments for the product
//! 4. List the document's current grantees
//! 5. Grant `commenter` access to each paid token that is not a grantee yet,
//!    one at a time, emitting a notice after each grant
//!
//! The first collaborator failure ends the pass and is returned unchanged.
//! Grants that already succeeded stay in place.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use docshare::{Reconciler, ReconcilerConfig};
//! use docshare::collab::{JsonReportSource, MemoryPermissionStore};
//! use docshare::core::DocumentId;
//!
//! async fn example() {
//!     let config = ReconcilerConfig::new("Unit testing masterclass").unwrap();
//!     let document = DocumentId::new("FAKE_ID").unwrap();
//!
//!     let store = MemoryPermissionStore::new("token");
//!     store.add_document(document.clone()).await;
//!
//!     let reconciler = Reconciler::new(JsonReportSource::new("report.json"), store, config);
//!     reconciler.share_document(&document).await.unwrap();
//! }
//! ```
//!
//! ## Re-exports
//!
//! - `docshare::core` - Payment records, tokens and diffing
//! - `docshare::collab` - Collaborator traits and in-memory backends

pub mod config;
pub mod error;
pub mod reconciler;

pub use docshare_collab as collab;
pub use docshare_core as core;

pub use config::ReconcilerConfig;
pub use error::{ConfigError, ReconcileError, Result};
pub use reconciler::Reconciler;

pub use docshare_collab::{GrantNotifier, LogNotifier, PaymentSource, PermissionStore};
pub use docshare_core::{DocumentId, IdentityToken, PaymentRecord, ReconcilePlan, Role};

//! # Docshare Testkit
//!
//! Testing utilities for docshare.
//!
//! ## Overview
//!
//! This crate provides:
//!
//! - **Fakes**: Collaborators that record every call into a shared
//!   [`CallLog`] and fail on demand
//! - **Fixtures**: Payment records and enrolment lists for common scenarios
//! - **Generators**: Proptest strategies for payment records
//!
//! ## Fakes
//!
//! ```rust
//! use docshare_collab::AuthError;
//! use docshare_testkit::{CallLog, FakePermissionStore};
//!
//! let log = CallLog::new();
//! let store = FakePermissionStore::new(log.clone())
//!     .failing_auth(AuthError::Rejected("could not authorize".into()));
//! assert!(log.calls().is_empty());
//! ```
//!
//! ## Property Testing
//!
//! ```rust,ignore
//! use proptest::prelude::*;
//! use docshare_testkit::generators::{email, PaymentParams};
//!
//! proptest! {
//!     #[test]
//!     fn token_survives_any_comment(params: PaymentParams) {
//!         // ...
//!     }
//! }
//! ```

pub mod fakes;
pub mod fixtures;
pub mod generators;

pub use fakes::{Call, CallLog, FakePaymentSource, FakePermissionStore, RecordingNotifier};
pub use fixtures::{paid_record, token, TestFixture, EXPECTED_DESCRIPTION};
pub use generators::{payment_from_params, PaymentParams};

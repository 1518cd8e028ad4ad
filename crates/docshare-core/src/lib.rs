//! # Docshare Core
//!
//! Pure primitives for docshare: payment records, identity tokens, and the
//! reconciliation algorithm that decides who still needs access.
//!
//! This crate contains no I/O and no collaborator calls. It is pure
//! computation over payment records and grantee sets.
//!
//! ## Key Types
//!
//! - [`PaymentRecord`] - One record as returned by the payment gateway
//! - [`IdentityToken`] - The email address that identifies a payer and a grantee
//! - [`GrantSet`] - The grantees currently holding access to a document
//! - [`PaidTokens`] - Deduplicated tokens of valid, paid records
//! - [`ReconcilePlan`] - What a reconciliation pass is going to grant
//!
//! ## Validation
//!
//! A record counts as paid only if its status is [`SUCCESS_STATUS`], its
//! description matches the product exactly, and its order id carries an
//! identity token before [`ORDER_ID_SEPARATOR`]. See [`validation`].

pub mod error;
pub mod plan;
pub mod tokens;
pub mod types;
pub mod validation;

pub use error::{CoreError, Result};
pub use plan::ReconcilePlan;
pub use tokens::{GrantSet, PaidTokens, PendingGrant};
pub use types::{DocumentId, IdentityToken, PaymentRecord, Role};
pub use validation::{
    paid_token, parse_order_id, GRANTED_ROLE, ORDER_ID_SEPARATOR, SUCCESS_STATUS,
};

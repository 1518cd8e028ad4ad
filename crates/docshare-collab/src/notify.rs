//! Grant notices: how a reconciliation pass reports each access it grants.

use std::sync::Arc;

use docshare_core::{DocumentId, IdentityToken, Role};

/// Marker that prefixes every grant notice.
pub const GRANT_MARKER: &str = "[+]";

/// Receives one notice per successful grant, in grant order.
///
/// Called only after the permission store confirmed the grant.
pub trait GrantNotifier: Send + Sync {
    fn granted(&self, document: &DocumentId, grantee: &IdentityToken, role: Role);
}

/// Emits grant notices as `tracing` events.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogNotifier;

impl GrantNotifier for LogNotifier {
    fn granted(&self, document: &DocumentId, grantee: &IdentityToken, role: Role) {
        tracing::info!(
            document = %document,
            role = %role,
            "{}",
            notice_line(grantee)
        );
    }
}

impl<T: GrantNotifier + ?Sized> GrantNotifier for Arc<T> {
    fn granted(&self, document: &DocumentId, grantee: &IdentityToken, role: Role) {
        (**self).granted(document, grantee, role)
    }
}

/// The text of a grant notice: the marker followed by the grantee.
pub fn notice_line(grantee: &IdentityToken) -> String {
    format!("{} {}", GRANT_MARKER, grantee)
}

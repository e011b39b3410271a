//! Authorization decisions over links.

use crate::domain::entities::{CallerIdentity, Link};

/// Decides whether `caller` may delete `link`.
///
/// Owners may delete their own links; admins may delete any link.
pub fn can_delete(caller: &CallerIdentity, link: &Link) -> bool {
    caller.is_admin || link.is_owned_by(caller.id)
}

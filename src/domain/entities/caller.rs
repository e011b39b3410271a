//! Caller identity produced by the authentication layer.

use chrono::{DateTime, Utc};

/// The authenticated party behind a request.
///
/// The link core only reads `id` to stamp ownership on new links and to feed
/// [`crate::domain::policy::can_delete`]. Everything else is consumed by the
/// HTTP layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallerIdentity {
    pub id: i64,
    pub name: String,
    pub is_active: bool,
    pub is_admin: bool,
}

/// A caller row as stored, including credential metadata.
#[derive(Debug, Clone)]
pub struct Caller {
    pub id: i64,
    pub name: String,
    pub token_hash: String,
    pub is_active: bool,
    pub is_admin: bool,
    pub created_at: DateTime<Utc>,
    pub revoked_at: Option<DateTime<Utc>>,
}

impl Caller {
    /// Returns true if the caller's token has been revoked.
    pub fn is_revoked(&self) -> bool {
        self.revoked_at.is_some()
    }

    /// Projects the stored caller onto the identity handed to request handlers.
    pub fn identity(&self) -> CallerIdentity {
        CallerIdentity {
            id: self.id,
            name: self.name.clone(),
            is_active: self.is_active,
            is_admin: self.is_admin,
        }
    }
}

/// Input data for registering a caller.
#[derive(Debug, Clone)]
pub struct NewCaller {
    pub name: String,
    pub token_hash: String,
    pub is_active: bool,
    pub is_admin: bool,
}

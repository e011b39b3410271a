//! Link entity representing a short identifier mapped to a destination.

use chrono::{DateTime, Utc};

/// A stored short link.
///
/// `identifier`, `destination`, `owner_id` and `created_at` never change after
/// insert. `access_count` only grows, one step per successful resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Link {
    pub id: i64,
    pub identifier: String,
    pub destination: String,
    pub access_count: i64,
    pub owner_id: Option<i64>,
    pub created_at: DateTime<Utc>,
}

impl Link {
    /// Creates a new Link instance.
    pub fn new(
        id: i64,
        identifier: String,
        destination: String,
        access_count: i64,
        owner_id: Option<i64>,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            identifier,
            destination,
            access_count,
            owner_id,
            created_at,
        }
    }

    /// Returns true if the link was created by the given caller.
    pub fn is_owned_by(&self, caller_id: i64) -> bool {
        self.owner_id == Some(caller_id)
    }
}

/// Input data for inserting a new link. The store assigns `id` and `created_at`
/// and starts `access_count` at zero.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewLink {
    pub identifier: String,
    pub destination: String,
    pub owner_id: Option<i64>,
}

/// A link joined with the display name of its creator, for admin listings.
#[derive(Debug, Clone)]
pub struct LinkWithOwner {
    pub link: Link,
    pub owner_name: Option<String>,
}

//! DTOs for the administrator statistics endpoint.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::entities::LinkWithOwner;

/// Per-link statistics row.
#[derive(Debug, Serialize, Deserialize)]
pub struct LinkStatsItem {
    pub identifier: String,
    pub destination: String,
    pub access_count: i64,
    pub created_at: DateTime<Utc>,
    /// Creator's name; absent when unknown or the creator was removed.
    pub owner: Option<String>,
}

impl From<LinkWithOwner> for LinkStatsItem {
    fn from(row: LinkWithOwner) -> Self {
        Self {
            identifier: row.link.identifier,
            destination: row.link.destination,
            access_count: row.link.access_count,
            created_at: row.link.created_at,
            owner: row.owner_name,
        }
    }
}

/// Statistics across every link.
#[derive(Debug, Serialize, Deserialize)]
pub struct AdminStatsResponse {
    pub total_links: usize,
    pub total_accesses: i64,
    pub items: Vec<LinkStatsItem>,
}

impl AdminStatsResponse {
    pub fn from_rows(rows: Vec<LinkWithOwner>) -> Self {
        let items: Vec<LinkStatsItem> = rows.into_iter().map(LinkStatsItem::from).collect();

        Self {
            total_links: items.len(),
            total_accesses: items.iter().map(|i| i.access_count).sum(),
            items,
        }
    }
}

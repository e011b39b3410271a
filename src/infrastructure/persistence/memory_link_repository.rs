//! In-process link store.

use async_trait::async_trait;
use chrono::Utc;
use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use std::sync::atomic::{AtomicI64, Ordering};

use crate::domain::StoreError;
use crate::domain::entities::{Link, LinkWithOwner, NewLink};
use crate::domain::repositories::LinkRepository;
use crate::utils::db_error::LINKS_IDENTIFIER_CONSTRAINT;

/// Link store kept in a sharded concurrent map.
///
/// Mirrors the guarantees of the PostgreSQL store: inserts are check-and-set
/// under the shard lock (so two racing inserts of one identifier cannot both
/// win) and increments mutate the record in place under the same lock.
/// Owner names are not tracked, so [`LinkRepository::list_all`] reports none.
#[derive(Debug)]
pub struct MemoryLinkRepository {
    links: DashMap<String, Link>,
    next_id: AtomicI64,
}

impl MemoryLinkRepository {
    pub fn new() -> Self {
        Self {
            links: DashMap::new(),
            next_id: AtomicI64::new(1),
        }
    }

    /// Number of stored links.
    pub fn len(&self) -> usize {
        self.links.len()
    }

    pub fn is_empty(&self) -> bool {
        self.links.is_empty()
    }

    fn newest_first(mut links: Vec<Link>) -> Vec<Link> {
        links.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
        links
    }
}

impl Default for MemoryLinkRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl LinkRepository for MemoryLinkRepository {
    async fn find_by_identifier(&self, identifier: &str) -> Result<Option<Link>, StoreError> {
        Ok(self.links.get(identifier).map(|l| l.clone()))
    }

    async fn exists_by_identifier(&self, identifier: &str) -> Result<bool, StoreError> {
        Ok(self.links.contains_key(identifier))
    }

    async fn insert(&self, new_link: NewLink) -> Result<Link, StoreError> {
        match self.links.entry(new_link.identifier.clone()) {
            Entry::Occupied(_) => Err(StoreError::UniquenessViolation {
                constraint: LINKS_IDENTIFIER_CONSTRAINT.to_string(),
            }),
            Entry::Vacant(slot) => {
                let link = Link::new(
                    self.next_id.fetch_add(1, Ordering::Relaxed),
                    new_link.identifier,
                    new_link.destination,
                    0,
                    new_link.owner_id,
                    Utc::now(),
                );
                slot.insert(link.clone());
                Ok(link)
            }
        }
    }

    async fn increment_access_count(&self, identifier: &str) -> Result<(), StoreError> {
        let mut link = self.links.get_mut(identifier).ok_or(StoreError::NotFound)?;
        link.access_count += 1;
        Ok(())
    }

    async fn delete(&self, identifier: &str) -> Result<(), StoreError> {
        self.links
            .remove(identifier)
            .map(|_| ())
            .ok_or(StoreError::NotFound)
    }

    async fn list_by_owner(&self, owner_id: i64) -> Result<Vec<Link>, StoreError> {
        let owned = self
            .links
            .iter()
            .filter(|l| l.owner_id == Some(owner_id))
            .map(|l| l.clone())
            .collect();
        Ok(Self::newest_first(owned))
    }

    async fn list_all(&self) -> Result<Vec<LinkWithOwner>, StoreError> {
        let all = self.links.iter().map(|l| l.clone()).collect();
        Ok(Self::newest_first(all)
            .into_iter()
            .map(|link| LinkWithOwner {
                link,
                owner_name: None,
            })
            .collect())
    }

    async fn health_check(&self) -> bool {
        true
    }
}

//! Link creation, listing and deletion service.

use std::sync::Arc;

use tracing::{info, warn};

use crate::application::error::LinkError;
use crate::application::services::identifier_generator::{IdentifierGenerator, MAX_ATTEMPTS};
use crate::domain::StoreError;
use crate::domain::entities::{CallerIdentity, Link, LinkWithOwner, NewLink};
use crate::domain::policy::can_delete;
use crate::domain::repositories::LinkRepository;
use crate::infrastructure::cache::CacheService;
use crate::utils::deadline::CallDeadlines;
use crate::utils::url_validator::validate_destination;

/// Service managing the lifecycle of links on behalf of callers.
///
/// Creation composes the [`IdentifierGenerator`] with the store's unique
/// constraint: the generator's check is advisory, the insert is authoritative.
pub struct LinkService<L: LinkRepository + ?Sized> {
    links: Arc<L>,
    cache: Arc<dyn CacheService>,
    generator: IdentifierGenerator,
    deadlines: CallDeadlines,
}

impl<L: LinkRepository + ?Sized> LinkService<L> {
    /// Creates a new link service.
    pub fn new(
        links: Arc<L>,
        cache: Arc<dyn CacheService>,
        generator: IdentifierGenerator,
        deadlines: CallDeadlines,
    ) -> Self {
        Self {
            links,
            cache,
            generator,
            deadlines,
        }
    }

    /// Creates a link to `destination` owned by `caller`.
    ///
    /// The new link starts with an access count of zero. If a concurrent
    /// creation claims the generated identifier between the uniqueness check
    /// and the insert, a fresh identifier is generated; at most
    /// [`MAX_ATTEMPTS`] inserts are tried.
    ///
    /// # Errors
    ///
    /// - [`LinkError::InactiveCaller`] if the caller is disabled
    /// - [`LinkError::InvalidDestination`] if the URL is not absolute http(s)
    /// - [`LinkError::GenerationExhausted`] if no identifier could be claimed
    /// - [`LinkError::Store`] on store failure
    pub async fn create(
        &self,
        destination: &str,
        caller: &CallerIdentity,
    ) -> Result<Link, LinkError> {
        if !caller.is_active {
            return Err(LinkError::InactiveCaller);
        }

        let destination = validate_destination(destination)?;

        for attempt in 1..=MAX_ATTEMPTS {
            let identifier = self.generator.generate(self.links.as_ref()).await?;

            let new_link = NewLink {
                identifier,
                destination: destination.clone(),
                owner_id: Some(caller.id),
            };

            match self
                .deadlines
                .store("insert", self.links.insert(new_link))
                .await
            {
                Ok(link) => {
                    info!(
                        identifier = %link.identifier,
                        owner_id = caller.id,
                        "Link created"
                    );
                    return Ok(link);
                }
                Err(StoreError::UniquenessViolation { constraint }) => {
                    metrics::counter!("shortlink_identifier_collisions_total").increment(1);
                    warn!(attempt, constraint = %constraint, "Identifier claimed concurrently, retrying");
                }
                Err(e) => return Err(e.into()),
            }
        }

        warn!(attempts = MAX_ATTEMPTS, "Link creation lost every insert race");
        Err(LinkError::GenerationExhausted {
            attempts: MAX_ATTEMPTS,
        })
    }

    /// Deletes a link if `caller` owns it or is an administrator.
    ///
    /// After the durable delete the cached destination is evicted. Eviction is
    /// best-effort; a failure leaves a stale entry that expires with its TTL.
    ///
    /// # Errors
    ///
    /// - [`LinkError::NotFound`] if no link has this identifier
    /// - [`LinkError::Forbidden`] if the caller may not delete it
    /// - [`LinkError::Store`] on store failure
    pub async fn delete(&self, identifier: &str, caller: &CallerIdentity) -> Result<(), LinkError> {
        let link = self
            .deadlines
            .store(
                "find_by_identifier",
                self.links.find_by_identifier(identifier),
            )
            .await?
            .ok_or(LinkError::NotFound)?;

        if !can_delete(caller, &link) {
            return Err(LinkError::Forbidden);
        }

        match self
            .deadlines
            .store("delete", self.links.delete(identifier))
            .await
        {
            Ok(()) => {}
            Err(StoreError::NotFound) => return Err(LinkError::NotFound),
            Err(e) => return Err(e.into()),
        }

        info!(identifier, caller_id = caller.id, "Link deleted");

        if let Err(e) = self
            .deadlines
            .cache("invalidate", self.cache.invalidate(identifier))
            .await
        {
            warn!(identifier, error = %e, "Failed to evict deleted link from cache");
            metrics::counter!("shortlink_cache_errors_total", "op" => "invalidate").increment(1);
        }

        Ok(())
    }

    /// Lists the caller's own links, newest first.
    ///
    /// # Errors
    ///
    /// Returns [`LinkError::InactiveCaller`] if the caller is disabled.
    pub async fn list_for_owner(&self, caller: &CallerIdentity) -> Result<Vec<Link>, LinkError> {
        if !caller.is_active {
            return Err(LinkError::InactiveCaller);
        }

        Ok(self
            .deadlines
            .store("list_by_owner", self.links.list_by_owner(caller.id))
            .await?)
    }

    /// Lists every link with its creator, newest first. Administrators only.
    ///
    /// # Errors
    ///
    /// Returns [`LinkError::Forbidden`] for non-admin callers.
    pub async fn list_all(&self, caller: &CallerIdentity) -> Result<Vec<LinkWithOwner>, LinkError> {
        if !caller.is_admin {
            return Err(LinkError::Forbidden);
        }

        Ok(self
            .deadlines
            .store("list_all", self.links.list_all())
            .await?)
    }
}

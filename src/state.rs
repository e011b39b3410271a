//! Shared application state injected into handlers.

use std::sync::Arc;
use std::time::Duration;

use crate::application::services::{
    AuthService, IdentifierGenerator, LinkService, ResolutionService,
};
use crate::domain::repositories::{CallerRepository, LinkRepository};
use crate::infrastructure::cache::CacheService;
use crate::utils::deadline::CallDeadlines;

/// Tunables threaded from [`crate::config::Config`] into the services.
#[derive(Debug, Clone)]
pub struct StateOptions {
    pub cache_ttl: Duration,
    pub deadlines: CallDeadlines,
    pub token_signing_secret: String,
}

/// Services shared by every request.
///
/// Store and cache handles are created once at startup and shared through
/// `Arc`; cloning the state is cheap.
#[derive(Clone)]
pub struct AppState {
    pub resolution_service: Arc<ResolutionService<dyn LinkRepository>>,
    pub link_service: Arc<LinkService<dyn LinkRepository>>,
    pub auth_service: Arc<AuthService<dyn CallerRepository>>,
    pub links: Arc<dyn LinkRepository>,
    pub cache: Arc<dyn CacheService>,
}

impl AppState {
    /// Wires the services over the given store, caller registry and cache.
    pub fn new(
        links: Arc<dyn LinkRepository>,
        callers: Arc<dyn CallerRepository>,
        cache: Arc<dyn CacheService>,
        options: StateOptions,
    ) -> Self {
        let resolution_service = Arc::new(ResolutionService::new(
            links.clone(),
            cache.clone(),
            options.cache_ttl,
            options.deadlines,
        ));

        let link_service = Arc::new(LinkService::new(
            links.clone(),
            cache.clone(),
            IdentifierGenerator::new(options.deadlines),
            options.deadlines,
        ));

        let auth_service = Arc::new(AuthService::new(callers, options.token_signing_secret));

        Self {
            resolution_service,
            link_service,
            auth_service,
            links,
            cache,
        }
    }
}

//! Business logic services for the application layer.

pub mod auth_service;
pub mod identifier_generator;
pub mod link_service;
pub mod resolution_service;

pub use auth_service::{AuthService, hash_token};
pub use identifier_generator::{CandidateSource, IdentifierGenerator, RandomAlphanumeric};
pub use link_service::LinkService;
pub use resolution_service::{DEFAULT_CACHE_TTL, ResolutionService};

//! Application layer services implementing business logic.
//!
//! This layer orchestrates domain operations by coordinating repository calls,
//! cache calls, validation, and business rules. Services consume repository
//! traits and provide a clean API for HTTP handlers.
//!
//! # Available Services
//!
//! - [`services::resolution_service::ResolutionService`] - Identifier to destination lookup with access counting
//! - [`services::link_service::LinkService`] - Link creation, listing and deletion
//! - [`services::identifier_generator::IdentifierGenerator`] - Collision-checked identifier generation
//! - [`services::auth_service::AuthService`] - API token authentication

pub mod error;
pub mod services;

pub use error::LinkError;

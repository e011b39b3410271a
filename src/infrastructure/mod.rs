//! Infrastructure layer for external integrations.
//!
//! Concrete implementations of the store and cache contracts the link core
//! consumes.
//!
//! - [`cache`] - Cache implementations (Redis, in-memory, no-op)
//! - [`persistence`] - PostgreSQL and in-memory repositories

pub mod cache;
pub mod persistence;

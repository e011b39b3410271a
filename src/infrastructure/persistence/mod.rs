//! Durable store implementations.
//!
//! Queries are built with SQLx's runtime API and mapped onto domain entities
//! through `FromRow` row structs.
//!
//! - [`PgLinkRepository`] - Link storage, lookup and access counting
//! - [`PgCallerRepository`] - Caller credentials
//! - [`MemoryLinkRepository`] - In-process link store with the same semantics

pub mod memory_link_repository;
pub mod pg_caller_repository;
pub mod pg_link_repository;

pub use memory_link_repository::MemoryLinkRepository;
pub use pg_caller_repository::PgCallerRepository;
pub use pg_link_repository::PgLinkRepository;

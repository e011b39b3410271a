//! Repository trait definitions for the domain layer.
//!
//! These traits abstract data access and are implemented in
//! `crate::infrastructure::persistence`. Mock implementations are generated via
//! `mockall` for testing.
//!
//! - [`LinkRepository`] - Link storage, lookup and access counting
//! - [`CallerRepository`] - Caller credentials
//!
//! All methods report failures as [`crate::domain::StoreError`].

pub mod caller_repository;
pub mod link_repository;

pub use caller_repository::CallerRepository;
pub use link_repository::LinkRepository;

#[cfg(test)]
pub use caller_repository::MockCallerRepository;
#[cfg(test)]
pub use link_repository::MockLinkRepository;

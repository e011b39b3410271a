//! Domain layer containing business entities and contracts.
//!
//! Independent of infrastructure and presentation concerns.
//!
//! - [`entities`] - Core business data structures
//! - [`repositories`] - Data access trait definitions
//! - [`policy`] - Pure authorization decisions
//! - [`store_error`] - Typed durable-store failures

pub mod entities;
pub mod policy;
pub mod repositories;
pub mod store_error;

pub use store_error::StoreError;

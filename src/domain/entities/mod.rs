//! Core domain entities.
//!
//! Entities are plain data structures. Records being created use a separate
//! `New*` struct so that store-assigned fields (ids, timestamps, counters)
//! never have to be invented by callers.
//!
//! - [`Link`] - A short identifier mapped to a destination URL
//! - [`CallerIdentity`] - The authenticated party behind a request
//! - [`Caller`] - A stored caller with credential metadata

pub mod caller;
pub mod link;

pub use caller::{Caller, CallerIdentity, NewCaller};
pub use link::{Link, LinkWithOwner, NewLink};

//! Utility functions shared across layers.
//!
//! - [`code_generator`] - Random identifier generation and format checks
//! - [`url_validator`] - Destination URL validation
//! - [`db_error`] - `sqlx` error mapping onto the store taxonomy
//! - [`deadline`] - Timeout wrappers for store and cache calls

pub mod code_generator;
pub mod db_error;
pub mod deadline;
pub mod url_validator;

//! Mapping of `sqlx` driver errors onto [`StoreError`].

use crate::domain::StoreError;

/// Name of the unique constraint guarding link identifiers.
pub const LINKS_IDENTIFIER_CONSTRAINT: &str = "links_identifier_key";

/// Converts a driver error into the store taxonomy.
///
/// Unique violations keep their constraint name so callers can tell an
/// identifier collision apart from other uniqueness failures. Everything else
/// (connection refused, pool timeout, protocol errors) is `Unavailable`.
pub fn map_sqlx_error(e: sqlx::Error) -> StoreError {
    if let Some(db_err) = e.as_database_error()
        && db_err.is_unique_violation()
    {
        return StoreError::UniquenessViolation {
            constraint: db_err.constraint().unwrap_or_default().to_string(),
        };
    }

    StoreError::unavailable(e.to_string())
}

//! Error taxonomy for registry operations.
//!
//! Only two failure classes are the store's own: duplicate primary keys and
//! dangling foreign keys, both surfaced from SQLite constraint violations.
//! Everything else propagates as the underlying [`rusqlite::Error`].
//! Absence is never an error: unmatched lookups return empty collections and
//! unmatched updates are silent no-ops.

use rusqlite::ffi;
use thiserror::Error;

/// Error type for registry store operations.
#[derive(Debug, Error)]
pub enum StoreError {
    /// An insert reused an id already present in that entity's table.
    #[error("duplicate {entity} id {id}")]
    DuplicateKey { entity: &'static str, id: i64 },

    /// An insert referenced a parent row that does not exist.
    #[error("{entity} {id} references a nonexistent {parent}")]
    ReferentialIntegrity {
        entity: &'static str,
        parent: &'static str,
        id: i64,
    },

    /// Any other database error, surfaced unmasked.
    #[error("database error: {0}")]
    Database(#[from] rusqlite::Error),
}

/// Classify an insert failure for the given entity.
///
/// SQLite reports both key and foreign-key violations under
/// `ConstraintViolation`; the extended result code tells them apart.
pub(crate) fn classify_insert_error(
    err: rusqlite::Error,
    entity: &'static str,
    parent: &'static str,
    id: i64,
) -> StoreError {
    if let rusqlite::Error::SqliteFailure(cause, _) = &err {
        match cause.extended_code {
            ffi::SQLITE_CONSTRAINT_PRIMARYKEY | ffi::SQLITE_CONSTRAINT_UNIQUE => {
                return StoreError::DuplicateKey { entity, id };
            }
            ffi::SQLITE_CONSTRAINT_FOREIGNKEY => {
                return StoreError::ReferentialIntegrity { entity, parent, id };
            }
            _ => {}
        }
    }
    StoreError::Database(err)
}

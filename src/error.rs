//! Error type shared by every catalog operation.

use rusqlite::ErrorCode;
use thiserror::Error;

/// Errors that can occur when running a catalog operation against the store.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// Input rejected by the store: a dangling foreign key, a duplicate key,
    /// a missing required field or a failed CHECK. Carries the store message.
    #[error("Invalid input: {0}")]
    Invalid(String),

    /// A targeted get or delete matched no rows.
    #[error("Could not find {entity} {key}")]
    NotFound { entity: &'static str, key: String },

    /// A get by primary key matched more than one row.
    #[error("Found {count} rows for {entity} {key}, expected exactly one")]
    Ambiguous {
        entity: &'static str,
        key: String,
        count: usize,
    },

    /// The row is still referenced and the caller did not ask to cascade.
    #[error("Conflict: {0}")]
    Conflict(String),

    /// Any other store failure.
    #[error("Store error: {0}")]
    Store(#[source] rusqlite::Error),
}

impl CatalogError {
    pub(crate) fn not_found(entity: &'static str, key: impl ToString) -> Self {
        Self::NotFound {
            entity,
            key: key.to_string(),
        }
    }
}

impl From<rusqlite::Error> for CatalogError {
    fn from(err: rusqlite::Error) -> Self {
        match err {
            rusqlite::Error::SqliteFailure(ref failure, ref msg)
                if failure.code == ErrorCode::ConstraintViolation =>
            {
                let message = msg.clone().unwrap_or_else(|| failure.to_string());
                Self::Invalid(message)
            }
            other => Self::Store(other),
        }
    }
}

pub type Result<T, E = CatalogError> = std::result::Result<T, E>;

mod comments;
mod resources;
mod study_list;
mod tags;
mod users;
mod votes;

pub use resources::CascadeCounts;

use rusqlite::Row;
use rusqlite::types::Type;
use time::OffsetDateTime;

use crate::Database;

/// Service layer providing every catalog operation.
///
/// CatalogService owns the Database handle it is given and is the only
/// place SQL is issued. Each entity's operations live in their own module.
/// Writes that touch more than one row (vote upserts, resource deletes) run
/// inside a single transaction.
///
/// The service is `Send + Sync` and is shared across concurrent requests
/// behind an `Arc`.
///
/// # Examples
///
/// ```
/// use catalog::{CatalogService, Database};
///
/// # fn main() -> anyhow::Result<()> {
/// let db = Database::in_memory()?;
/// let service = CatalogService::new(db);
/// assert!(service.list_resources()?.is_empty());
/// # Ok(())
/// # }
/// ```
pub struct CatalogService {
    db: Database,
}

impl CatalogService {
    /// Creates a new CatalogService over the given database.
    pub fn new(db: Database) -> Self {
        Self { db }
    }

    /// Returns a reference to the underlying database.
    ///
    /// Useful for testing or for seeding users, which the catalog never writes.
    pub fn database(&self) -> &Database {
        &self.db
    }
}

/// Reads a unix-seconds column as an `OffsetDateTime`.
fn timestamp_column(row: &Row<'_>, idx: usize) -> rusqlite::Result<OffsetDateTime> {
    let seconds: i64 = row.get(idx)?;
    OffsetDateTime::from_unix_timestamp(seconds)
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(idx, Type::Integer, Box::new(e)))
}

/// Returns true if the store rejected a statement because of a foreign key.
fn is_foreign_key_violation(err: &rusqlite::Error) -> bool {
    match err {
        rusqlite::Error::SqliteFailure(failure, _) => {
            failure.extended_code == rusqlite::ffi::SQLITE_CONSTRAINT_FOREIGNKEY
        }
        _ => false,
    }
}

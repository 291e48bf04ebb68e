mod schema;

use std::path::Path;
use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use anyhow::Result;
use rusqlite::Connection;
use tracing::debug;

use schema::INITIAL_SCHEMA;

/// How long a connection waits on a write lock held by another connection
/// to the same database file before giving up with `SQLITE_BUSY`.
const BUSY_TIMEOUT: Duration = Duration::from_secs(5);

/// Database wrapper providing connection management and schema initialization.
///
/// The connection sits behind a mutex so one handle can be shared by
/// concurrent requests; each caller holds it for a single statement or
/// transaction only.
pub struct Database {
    conn: Mutex<Connection>,
}

impl Database {
    /// Opens an in-memory SQLite database.
    ///
    /// Automatically initializes the schema on connection open.
    pub fn in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        Self::with_connection(conn)
    }

    /// Opens a file-based SQLite database at the given path.
    ///
    /// Creates the database file if it does not exist.
    /// Automatically initializes the schema on connection open.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        debug!(path = %path.display(), "opening catalog database");
        let conn = Connection::open(path)?;
        Self::with_connection(conn)
    }

    fn with_connection(conn: Connection) -> Result<Self> {
        conn.busy_timeout(BUSY_TIMEOUT)?;
        let db = Self {
            conn: Mutex::new(conn),
        };
        db.initialize_schema()?;
        Ok(db)
    }

    /// Initializes the database schema.
    ///
    /// Uses IF NOT EXISTS for idempotent execution, so reopening an existing
    /// file is safe.
    fn initialize_schema(&self) -> Result<()> {
        let conn = self.connection();
        conn.execute("PRAGMA foreign_keys = ON", [])?;
        conn.execute_batch(INITIAL_SCHEMA)?;
        Ok(())
    }

    /// Locks and returns the underlying connection.
    ///
    /// A panic in another holder does not leave the connection in a broken
    /// state (SQLite rolls back unfinished statements), so poisoning is ignored.
    pub fn connection(&self) -> MutexGuard<'_, Connection> {
        self.conn.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

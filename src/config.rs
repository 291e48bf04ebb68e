//! Process configuration read from the environment.
//!
//! `.env` files are loaded by the binary through `dotenvy` before
//! [`Config::from_env`] runs, so values there behave like real variables.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

/// Port the HTTP listener binds to.
pub const PORT_VAR: &str = "PORT";
/// Path of the SQLite database file.
pub const DB_PATH_VAR: &str = "CATALOG_DB_PATH";
/// `tracing` filter directives, e.g. `catalog=debug,tower_http=info`.
pub const LOG_VAR: &str = "CATALOG_LOG";

const DEFAULT_LOG_FILTER: &str = "info";

/// Settings for running the catalog service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// `None` when no port was configured; `serve` refuses to start without one.
    pub port: Option<u16>,
    pub db_path: PathBuf,
    pub log_filter: String,
}

impl Config {
    /// Reads configuration from process environment variables.
    pub fn from_env() -> Result<Self> {
        Self::from_vars(|key| std::env::var(key).ok())
    }

    /// Reads configuration through the given variable lookup.
    ///
    /// Empty values count as unset.
    pub fn from_vars(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let get = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        let port = get(PORT_VAR)
            .map(|raw| {
                raw.trim()
                    .parse::<u16>()
                    .with_context(|| format!("Invalid {PORT_VAR} value: {raw:?}"))
            })
            .transpose()?;

        let db_path = match get(DB_PATH_VAR) {
            Some(path) => PathBuf::from(path),
            None => default_database_path()?,
        };

        let log_filter = get(LOG_VAR).unwrap_or_else(|| DEFAULT_LOG_FILTER.to_string());

        Ok(Self {
            port,
            db_path,
            log_filter,
        })
    }
}

/// Gets the cross-platform default database path.
///
/// Returns the path as `{data_dir}/catalog/catalog.db` where `data_dir` is:
/// - Linux: `~/.local/share`
/// - macOS: `~/Library/Application Support`
/// - Windows: `C:\Users\<user>\AppData\Roaming`
pub fn default_database_path() -> Result<PathBuf> {
    let data_dir =
        dirs::data_dir().ok_or_else(|| anyhow::anyhow!("Failed to determine data directory"))?;

    Ok(data_dir.join("catalog").join("catalog.db"))
}

/// Ensures the parent directory of the database file exists.
pub fn ensure_database_directory(db_path: &Path) -> Result<()> {
    if let Some(parent) = db_path.parent() {
        std::fs::create_dir_all(parent).with_context(|| {
            format!("Failed to create database directory: {}", parent.display())
        })?;
    }
    Ok(())
}

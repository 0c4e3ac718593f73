//! Database connection management
//!
//! Every connection handed to a repository comes from here, so foreign
//! keys are always enforced.

use std::path::Path;
use std::time::Duration;

use rusqlite::Connection;

use crate::config::StoreConfig;
use crate::errors::{from_rusqlite, io_error, Result};

/// Open a SQLite database at the given path with default settings
pub fn open<P: AsRef<Path>>(path: P) -> Result<Connection> {
    let path = path.as_ref().to_string_lossy().into_owned();
    open_with_config(&StoreConfig::default().with_database_path(path))
}

/// Open an in-memory SQLite database (for testing)
pub fn open_in_memory() -> Result<Connection> {
    open_with_config(&StoreConfig::in_memory())
}

/// Open the database described by `config`
///
/// The parent directory of a file database is created if missing.
pub fn open_with_config(config: &StoreConfig) -> Result<Connection> {
    let mut conn = if config.is_in_memory() {
        Connection::open_in_memory().map_err(from_rusqlite)?
    } else {
        let path = Path::new(&config.database_path);
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|e| io_error("create_db_dir", e))?;
        }
        Connection::open(path).map_err(from_rusqlite)?
    };

    configure(&mut conn, config)?;
    tracing::debug!(database_path = %config.database_path, "connection opened");
    Ok(conn)
}

/// Apply per-connection settings
pub fn configure(conn: &mut Connection, config: &StoreConfig) -> Result<()> {
    // SQLite leaves foreign keys off unless asked, per connection
    conn.pragma_update(None, "foreign_keys", true)
        .map_err(from_rusqlite)?;

    conn.busy_timeout(Duration::from_secs(config.busy_timeout_secs))
        .map_err(from_rusqlite)?;

    if config.echo {
        conn.trace(Some(echo_statement));
    }

    Ok(())
}

fn echo_statement(sql: &str) {
    tracing::debug!(target: "picole_store::sql", sql = sql, "execute");
}

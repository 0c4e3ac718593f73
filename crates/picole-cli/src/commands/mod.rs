pub mod dependents;
pub mod entity;
pub mod init;
pub mod seed;

use picole_core::PicoleError;
use picole_store::StoreConfig;
use rusqlite::Connection;
use serde::Serialize;
use serde_json::Value;

/// Open the configured database, honoring the `--db` override
pub fn open(db: Option<&str>) -> Result<Connection, Box<dyn std::error::Error>> {
    let mut config = StoreConfig::load()?;
    if let Some(path) = db {
        config = config.with_database_path(path);
    }
    tracing::debug!(database_path = %config.database_path, "opening database");
    Ok(picole_store::db::open_with_config(&config)?)
}

/// Encode a record (or list of records) for output
pub fn to_json<T: Serialize>(value: T) -> picole_core::Result<Value> {
    Ok(serde_json::to_value(value)?)
}

pub fn print_json<T: Serialize>(value: &T) -> Result<(), Box<dyn std::error::Error>> {
    let text = serde_json::to_string_pretty(value).map_err(PicoleError::from)?;
    println!("{}", text);
    Ok(())
}

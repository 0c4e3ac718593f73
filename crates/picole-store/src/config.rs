//! Store configuration
//!
//! Loaded from an optional `picole.toml` and `PICOLE_*` environment
//! variables (a `.env` file is honored). Environment wins over the file;
//! anything unset falls back to the defaults below.

use std::path::Path;

use picole_core::errors::PicoleError;
use serde::{Deserialize, Serialize};

use crate::errors::Result;

/// Default on-disk database location
pub const DEFAULT_DATABASE_PATH: &str = "db/picoles.sqlite";

/// Path value selecting an in-memory database
pub const MEMORY_DATABASE: &str = ":memory:";

/// Default configuration file name
pub const DEFAULT_CONFIG_FILE: &str = "picole.toml";

/// Environment variable prefix
pub const ENV_PREFIX: &str = "PICOLE";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    /// SQLite file path, or `:memory:`
    pub database_path: String,

    /// How long a connection waits on a locked database
    pub busy_timeout_secs: u64,

    /// Trace every executed statement at debug level
    pub echo: bool,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            database_path: DEFAULT_DATABASE_PATH.to_string(),
            busy_timeout_secs: 30,
            echo: false,
        }
    }
}

impl StoreConfig {
    /// Configuration for a private in-memory database
    pub fn in_memory() -> Self {
        Self {
            database_path: MEMORY_DATABASE.to_string(),
            ..Self::default()
        }
    }

    /// Load from `picole.toml` in the working directory and the environment
    ///
    /// # Errors
    /// `Configuration` if a source exists but cannot be parsed.
    pub fn load() -> Result<Self> {
        Self::load_from(Path::new(DEFAULT_CONFIG_FILE))
    }

    /// Load from the given file (which may be absent) and the environment
    ///
    /// # Errors
    /// `Configuration` if a source exists but cannot be parsed.
    pub fn load_from(path: &Path) -> Result<Self> {
        dotenvy::dotenv().ok();

        let settings = config::Config::builder()
            .add_source(config::File::from(path).required(false))
            .add_source(config::Environment::with_prefix(ENV_PREFIX).try_parsing(true))
            .build()
            .map_err(config_error)?;

        settings.try_deserialize().map_err(config_error)
    }

    /// Override the database path
    pub fn with_database_path(mut self, path: impl Into<String>) -> Self {
        self.database_path = path.into();
        self
    }

    pub fn is_in_memory(&self) -> bool {
        self.database_path == MEMORY_DATABASE
    }
}

fn config_error(err: config::ConfigError) -> PicoleError {
    PicoleError::Configuration {
        message: err.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let cfg = StoreConfig::default();
        assert_eq!(cfg.database_path, "db/picoles.sqlite");
        assert_eq!(cfg.busy_timeout_secs, 30);
        assert!(!cfg.echo);
        assert!(!cfg.is_in_memory());
        assert!(StoreConfig::in_memory().is_in_memory());
    }

    #[test]
    fn test_load_from_file_overrides_defaults() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(file, "busy_timeout_secs = 5\necho = true").unwrap();

        let cfg = StoreConfig::load_from(file.path()).unwrap();
        assert_eq!(cfg.busy_timeout_secs, 5);
        assert!(cfg.echo);
    }

    #[test]
    fn test_malformed_file_is_configuration_error() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(file, "busy_timeout_secs = \"soon\"").unwrap();

        let err = StoreConfig::load_from(file.path()).unwrap_err();
        assert!(matches!(err, PicoleError::Configuration { .. }));
    }
}

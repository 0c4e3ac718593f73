//! Picole Store - SQLite persistence for the picolé data layer
//!
//! Provides:
//! - Configuration loading (`picole.toml` + `PICOLE_*` environment)
//! - Connection management with foreign keys enforced on every connection
//! - Embedded migrations and the drop-and-recreate bootstrap
//! - One repository per table, translating constraint failures into domain errors
//! - Dependent-table discovery and randomized seeding

pub mod config;
pub mod db;
pub mod dependents;
pub mod errors;
pub mod migrations;
pub mod repo;
pub mod seed;

// Re-export key types
pub use config::StoreConfig;
pub use errors::Result;

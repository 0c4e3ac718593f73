//! Migration framework
//!
//! Provides:
//! - Migration runner with checksums and idempotent application
//! - Embedded SQL migrations
//! - Drop-and-recreate bootstrap of the domain schema

mod checksums;
mod embedded;
mod runner;

pub use embedded::DOMAIN_TABLES;
pub use runner::{apply_migrations, applied_migrations, reset_schema};

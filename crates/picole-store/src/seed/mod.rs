//! Randomized seeding
//!
//! Fills every table with generated rows through the regular repositories,
//! so normalization and key synthesis apply exactly as for user input.

mod generate;
mod populate;

use std::collections::BTreeMap;

use serde::Serialize;

pub use populate::populate;

/// Seeding parameters
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeedOptions {
    /// Rows to create in each table
    pub rows_per_table: usize,
    /// Fixed RNG seed for reproducible data; random when `None`
    pub rng_seed: Option<u64>,
}

impl Default for SeedOptions {
    fn default() -> Self {
        Self {
            rows_per_table: 100,
            rng_seed: None,
        }
    }
}

/// Rows created per table
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SeedReport {
    pub rows: BTreeMap<String, usize>,
}

impl SeedReport {
    pub fn count(&self, table: &str) -> usize {
        self.rows.get(table).copied().unwrap_or(0)
    }

    pub fn total(&self) -> usize {
        self.rows.values().sum()
    }

    fn record(&mut self, table: &str, created: usize) {
        self.rows.insert(table.to_string(), created);
    }
}

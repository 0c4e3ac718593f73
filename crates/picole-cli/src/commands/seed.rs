//! Random seed command
//!
//! Usage: picole seed [--rows N] [--rng-seed S] [--reset]

use clap::Args;
use picole_store::seed::{populate, SeedOptions};

use super::{open, print_json};

#[derive(Debug, Args)]
pub struct SeedArgs {
    /// Rows to create in each table
    #[arg(long, default_value_t = 100)]
    pub rows: usize,

    /// Fixed RNG seed for reproducible data
    #[arg(long)]
    pub rng_seed: Option<u64>,

    /// Drop and recreate the schema before seeding
    #[arg(long)]
    pub reset: bool,
}

pub fn execute(db: Option<&str>, args: SeedArgs) -> Result<(), Box<dyn std::error::Error>> {
    let mut conn = open(db)?;

    if args.reset {
        picole_store::migrations::reset_schema(&mut conn)?;
    } else {
        picole_store::migrations::apply_migrations(&mut conn)?;
    }

    let options = SeedOptions {
        rows_per_table: args.rows,
        rng_seed: args.rng_seed,
    };
    let report = populate(&mut conn, &options)?;
    print_json(&report)
}

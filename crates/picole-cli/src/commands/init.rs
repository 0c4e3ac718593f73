//! Schema bootstrap command
//!
//! Usage: picole init [--reset]

use clap::Args;

use super::{open, print_json};

#[derive(Debug, Args)]
pub struct InitArgs {
    /// Drop every table first (all data is lost)
    #[arg(long)]
    pub reset: bool,
}

pub fn execute(db: Option<&str>, args: InitArgs) -> Result<(), Box<dyn std::error::Error>> {
    let mut conn = open(db)?;

    if args.reset {
        picole_store::migrations::reset_schema(&mut conn)?;
    } else {
        picole_store::migrations::apply_migrations(&mut conn)?;
    }

    let applied = picole_store::migrations::applied_migrations(&conn)?;
    print_json(&serde_json::json!({ "migrations": applied }))
}

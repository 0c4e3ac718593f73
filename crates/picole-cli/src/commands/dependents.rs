//! Dependent-table lookup
//!
//! Usage: picole dependents <TABLE>

use clap::Args;

use super::entity::Entity;
use super::{open, print_json};

#[derive(Debug, Args)]
pub struct DependentsArgs {
    pub table: Entity,
}

pub fn execute(db: Option<&str>, args: DependentsArgs) -> Result<(), Box<dyn std::error::Error>> {
    let conn = open(db)?;
    let tables = picole_store::dependents::tables_referencing(&conn, args.table.table())?;
    print_json(&tables)
}

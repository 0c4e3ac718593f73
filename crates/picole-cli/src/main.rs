//! Picole CLI
//!
//! Command-line interface for the picolé database

use clap::{Parser, Subcommand};
use picole_core::logging_facility::{init, Profile};

mod commands;

#[derive(Debug, Parser)]
#[command(name = "picole")]
#[command(about = "Picole - ice-cream production data management", long_about = None)]
struct Cli {
    /// Database file (overrides `database_path` from picole.toml / PICOLE_DATABASE_PATH)
    #[arg(long, global = true)]
    db: Option<String>,

    /// Human-readable debug logs instead of JSON
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Create the schema (or drop and recreate it)
    Init(commands::init::InitArgs),
    /// Fill every table with random rows
    Seed(commands::seed::SeedArgs),
    /// List every row of a table
    List(commands::entity::ListArgs),
    /// Show one row by id
    Show(commands::entity::ShowArgs),
    /// Delete one row by id
    Delete(commands::entity::DeleteArgs),
    /// Tables whose foreign keys reference a table
    Dependents(commands::dependents::DependentsArgs),
}

fn main() {
    let cli = Cli::parse();

    init(if cli.verbose {
        Profile::Development
    } else {
        Profile::Production
    });

    let db = cli.db.as_deref();
    let result = match cli.command {
        Commands::Init(args) => commands::init::execute(db, args),
        Commands::Seed(args) => commands::seed::execute(db, args),
        Commands::List(args) => commands::entity::execute_list(db, args),
        Commands::Show(args) => commands::entity::execute_show(db, args),
        Commands::Delete(args) => commands::entity::execute_delete(db, args),
        Commands::Dependents(args) => commands::dependents::execute(db, args),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

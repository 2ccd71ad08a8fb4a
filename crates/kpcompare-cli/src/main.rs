//! keepass-compare CLI
//!
//! Command-line interface for comparing two KeePass databases

use clap::{Parser, Subcommand};
use kpcompare_core::logging_facility::{init, Profile};

mod commands;
mod credentials;

#[derive(Debug, Parser)]
#[command(name = "kpcompare")]
#[command(about = "Compare two KeePass databases and report what changed", long_about = None)]
struct Cli {
    /// Emit logs as JSON lines on stderr
    #[arg(long, global = true)]
    log_json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Compare two database files
    Compare(commands::compare::CompareArgs),
}

fn main() {
    let cli = Cli::parse();

    init(if cli.log_json {
        Profile::Production
    } else {
        Profile::Development
    });

    let result = match cli.command {
        Commands::Compare(args) => commands::compare::execute(args),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

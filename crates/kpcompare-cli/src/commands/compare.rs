//! Compare command
//!
//! Usage: kpcompare compare <FILE1> <FILE2> [-p <PW>] [--password1 <PW>]
//! [--password2 <PW>] [--compare uuid|path] [--format text|json]

use crate::credentials::{resolve, PasswordArgs};
use clap::Args;
use kpcompare_core::{
    compare_trees, render_human_summary, render_json, CompareConfig, OutputFormat,
};
use kpcompare_store::{open_document, AnyDocumentProvider, DocumentProvider};
use std::io;
use std::path::PathBuf;

#[derive(Debug, Args)]
pub struct CompareArgs {
    /// The first, or original, file
    pub file1: PathBuf,

    /// The second, or modified, file
    pub file2: PathBuf,

    /// The password for both files
    #[arg(short = 'p', long)]
    pub password: Option<String>,

    /// The password for the first file
    #[arg(long, visible_alias = "p1")]
    pub password1: Option<String>,

    /// The password for the second file (empty reuses the first)
    #[arg(long, visible_alias = "p2")]
    pub password2: Option<String>,

    /// How records are matched across the files: uuid or path
    #[arg(long = "compare", default_value = "uuid")]
    pub strategy: String,

    /// Output format: text or json
    #[arg(long, default_value = "text")]
    pub format: String,
}

/// Execute compare command
pub fn execute(args: CompareArgs) -> Result<(), Box<dyn std::error::Error>> {
    // Reject bad settings before touching any file
    let config = CompareConfig::new(&args.strategy, &args.format)?;

    let provider = AnyDocumentProvider::new();
    let passwords = PasswordArgs {
        shared: args.password,
        first: args.password1,
        second: args.password2,
    };
    let credentials = resolve(
        passwords,
        &args.file1,
        &args.file2,
        provider.requires_password(&args.file1) || provider.requires_password(&args.file2),
        &mut io::stdin().lock(),
        &mut io::stderr(),
    )?;

    let before = open_document(&provider, &args.file1, &credentials.first)?;
    let after = open_document(&provider, &args.file2, &credentials.second)?;

    let report = compare_trees(&before, &after, config.strategy)?;

    match config.format {
        OutputFormat::Text => print!("{}", render_human_summary(&report)),
        OutputFormat::Json => println!("{}", render_json(&report)?),
    }

    Ok(())
}

//! Validate a catalog document against the schema and catalog invariants.
//!
//! Usage:
//!   catalog-validate --file apps.json
//!   catalog-validate < apps.json
//!   catalog-validate --file apps.json --json
//!
//! Prints a one-line summary plus category counts on success; exits 1 with
//! every violation on failure.

use anyhow::{Context, Result};
use clap::Parser;
use serde_json::json;
use std::fs::File;
use std::io::{Read, stdin};
use std::path::PathBuf;
use storegen::{CatalogSchema, logging, parse_and_index};

#[derive(Parser, Debug)]
#[command(name = "catalog-validate")]
#[command(about = "Validate a catalog JSON document")]
struct Cli {
    /// Optional input file; reads stdin when omitted.
    #[arg(long)]
    file: Option<PathBuf>,
    /// Optional schema path; the bundled schema is used when omitted.
    #[arg(long)]
    schema: Option<PathBuf>,
    /// Print the summary as JSON.
    #[arg(long)]
    json: bool,
    /// Raise log verbosity (-v info, -vv debug).
    #[arg(long, short = 'v', action = clap::ArgAction::Count)]
    verbose: u8,
}

fn read_input(file: Option<&PathBuf>) -> Result<String> {
    let mut buf = String::new();
    if let Some(path) = file {
        File::open(path)
            .with_context(|| format!("opening input file {}", path.display()))?
            .read_to_string(&mut buf)
            .with_context(|| format!("reading input file {}", path.display()))?;
    } else {
        stdin()
            .read_to_string(&mut buf)
            .context("reading stdin for catalog JSON")?;
    }
    Ok(buf)
}

fn main() {
    if let Err(err) = run() {
        eprintln!("{err:#}");
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    let schema = match &cli.schema {
        Some(path) => CatalogSchema::load(path)?,
        None => CatalogSchema::bundled()?,
    };
    let input = read_input(cli.file.as_ref())?;
    let index = parse_and_index(&schema, &input)?;
    let catalog = index.catalog();
    let categories = index.category_counts();

    if cli.json {
        let summary = json!({
            "valid": true,
            "last_updated": catalog.last_updated,
            "apps": catalog.apps.len(),
            "versions": catalog.version_count(),
            "categories": categories,
        });
        println!("{}", serde_json::to_string(&summary)?);
        return Ok(());
    }

    println!(
        "ok: {} apps, {} versions (last updated {})",
        catalog.apps.len(),
        catalog.version_count(),
        catalog.last_updated
    );
    for category in categories {
        println!("  {:<10} {}", category.name, category.count);
    }
    Ok(())
}

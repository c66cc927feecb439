//! Generate a synthetic homebrew store catalog.
//!
//! Usage:
//!   storegen                                  # interactive, like the old script
//!   storegen --count 25 --seed demo --output apps.json
//!   storegen --count 5 --as-of 2026-01-01 --stdout --compact
//!
//! Without `--count` the binary prompts for the app count, output filename
//! and seed, re-prompting until the count is a positive integer.

use anyhow::{Context, Result};
use clap::Parser;
use storegen::{
    CatalogSchema, Format, GenerationContext, Overrides, RunConfig, config::parse_as_of,
    env_non_empty, logging, output, prompt::Prompter, prompt::parse_app_count, verify_catalog,
};
use std::io::{self, IsTerminal, Write};
use std::path::PathBuf;
use tracing::info;

#[derive(Parser, Debug)]
#[command(name = "storegen")]
#[command(about = "Generate a synthetic app store catalog as JSON")]
struct Cli {
    /// Number of apps to generate; prompts interactively when omitted.
    #[arg(long, short = 'n', value_parser = parse_app_count)]
    count: Option<usize>,
    /// Output file (default apps.json, or STOREGEN_OUTPUT).
    #[arg(long, short = 'o')]
    output: Option<PathBuf>,
    /// Seed for reproducible output (or STOREGEN_SEED).
    #[arg(long, short = 's')]
    seed: Option<String>,
    /// Reference date, YYYY-MM-DD (or STOREGEN_AS_OF); defaults to today.
    #[arg(long, value_parser = parse_as_of)]
    as_of: Option<chrono::NaiveDate>,
    /// Write the catalog to stdout instead of a file.
    #[arg(long, conflicts_with = "output")]
    stdout: bool,
    /// Emit single-line JSON.
    #[arg(long)]
    compact: bool,
    /// Skip schema and invariant checks before writing.
    #[arg(long)]
    skip_validation: bool,
    /// Raise log verbosity (-v info, -vv debug).
    #[arg(long, short = 'v', action = clap::ArgAction::Count)]
    verbose: u8,
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

    let overrides = Overrides {
        app_count: cli.count,
        output: cli.output.clone(),
        seed: cli.seed.clone(),
        as_of: cli.as_of,
        to_stdout: cli.stdout,
    }
    .with_env(env_non_empty)?;

    let config = if overrides.app_count.is_some() {
        overrides.resolve()?
    } else {
        // Prompts go to stderr when stdout carries the catalog.
        let mut sink: Box<dyn Write> = if cli.stdout {
            Box::new(io::stderr())
        } else {
            Box::new(io::stdout())
        };
        if io::stdin().is_terminal() {
            writeln!(sink, "=== Homebrew Store Catalog Generator ===\n")?;
        }
        let stdin = io::stdin();
        let mut prompter = Prompter::new(stdin.lock(), sink);
        overrides.resolve_interactive(&mut prompter)?
    };

    if let Some(seed) = &config.seed {
        info!(%seed, "using seed");
        if !cli.stdout {
            println!("Using seed: {seed}\n");
        }
    }

    generate_and_write(&cli, &config)
}

fn generate_and_write(cli: &Cli, config: &RunConfig) -> Result<()> {
    let mut ctx = GenerationContext::new(config.seed.as_deref(), config.as_of);
    let catalog = ctx
        .catalog(config.app_count)
        .context("generating catalog")?;

    if !cli.skip_validation {
        let schema = CatalogSchema::bundled()?;
        verify_catalog(&schema, &catalog).context("generated catalog failed validation")?;
    }

    let format = if cli.compact {
        Format::Compact
    } else {
        Format::Pretty
    };

    if cli.stdout {
        let text = output::render(&catalog, format)?;
        return output::write_to(io::stdout().lock(), &text);
    }

    output::write_catalog(&config.output, &catalog, format)?;
    println!("\nSuccessfully generated {} apps.", catalog.apps.len());
    println!("Saved to: {}", config.output.display());
    Ok(())
}

//! Run configuration.
//!
//! Values come from command-line flags first, then `STOREGEN_*` environment
//! variables, then the interactive prompt. The prompt only runs when no app
//! count was given, and only asks for what is still missing.

use crate::catalog::DEFAULT_OUTPUT_FILE;
use crate::prompt::Prompter;
use anyhow::{Context, Result};
use chrono::{Local, NaiveDate};
use std::io::{BufRead, Write};
use std::path::PathBuf;

pub const SEED_ENV: &str = "STOREGEN_SEED";
pub const AS_OF_ENV: &str = "STOREGEN_AS_OF";
pub const OUTPUT_ENV: &str = "STOREGEN_OUTPUT";

/// Format accepted for `--as-of` and `STOREGEN_AS_OF`.
pub const AS_OF_FORMAT: &str = "%Y-%m-%d";

pub fn parse_as_of(raw: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(raw.trim(), AS_OF_FORMAT)
        .map_err(|err| format!("'{}' is not a YYYY-MM-DD date: {err}", raw.trim()))
}

/// Partially specified settings, before prompting.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Overrides {
    pub app_count: Option<usize>,
    pub output: Option<PathBuf>,
    pub seed: Option<String>,
    pub as_of: Option<NaiveDate>,
    /// The catalog goes to standard output; no output filename is needed.
    pub to_stdout: bool,
}

/// Fully resolved settings for one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunConfig {
    pub app_count: usize,
    pub output: PathBuf,
    pub seed: Option<String>,
    pub as_of: NaiveDate,
}

impl Overrides {
    /// Fill unset fields from the environment. `lookup` returns non-empty
    /// values only (see `env_non_empty`).
    pub fn with_env(mut self, lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        if self.seed.is_none() {
            self.seed = lookup(SEED_ENV);
        }
        if self.output.is_none() {
            self.output = lookup(OUTPUT_ENV).map(PathBuf::from);
        }
        if self.as_of.is_none() {
            if let Some(raw) = lookup(AS_OF_ENV) {
                let date = parse_as_of(&raw)
                    .map_err(anyhow::Error::msg)
                    .with_context(|| format!("reading {AS_OF_ENV}"))?;
                self.as_of = Some(date);
            }
        }
        Ok(self)
    }

    /// Resolve without a console; a missing app count is an error.
    pub fn resolve(self) -> Result<RunConfig> {
        let app_count = self
            .app_count
            .context("app count is required (pass --count or run interactively)")?;
        Ok(self.finish(app_count, None, None))
    }

    /// Resolve, prompting for anything that is still missing when no app
    /// count was supplied.
    pub fn resolve_interactive<R: BufRead, W: Write>(
        self,
        prompter: &mut Prompter<R, W>,
    ) -> Result<RunConfig> {
        if let Some(app_count) = self.app_count {
            return Ok(self.finish(app_count, None, None));
        }
        let app_count = prompter.app_count()?;
        let output = if self.output.is_some() || self.to_stdout {
            None
        } else {
            Some(prompter.output_file()?)
        };
        let seed = match &self.seed {
            Some(_) => None,
            None => prompter.seed()?,
        };
        Ok(self.finish(app_count, output, seed))
    }

    fn finish(
        self,
        app_count: usize,
        prompted_output: Option<PathBuf>,
        prompted_seed: Option<String>,
    ) -> RunConfig {
        RunConfig {
            app_count,
            output: self
                .output
                .or(prompted_output)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT_FILE)),
            seed: self.seed.or(prompted_seed),
            as_of: self.as_of.unwrap_or_else(|| Local::now().date_naive()),
        }
    }
}

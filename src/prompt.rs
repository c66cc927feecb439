//! Console input source.
//!
//! Asks for the app count (re-prompting until it gets a positive integer),
//! the output filename and an optional seed. Generic over reader and writer
//! so the loop can be driven from tests.

use crate::catalog::DEFAULT_OUTPUT_FILE;
use anyhow::{Context, Result, bail};
use std::io::{BufRead, Write};
use std::path::PathBuf;

pub const INVALID_COUNT_MESSAGE: &str = "Please enter a valid positive number.";

/// Parse a user-supplied app count. Rejects non-integers and zero.
pub fn parse_app_count(raw: &str) -> Result<usize, String> {
    match raw.trim().parse::<usize>() {
        Ok(0) | Err(_) => Err(format!("'{}': {INVALID_COUNT_MESSAGE}", raw.trim())),
        Ok(count) => Ok(count),
    }
}

/// Answers collected from the console.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Answers {
    pub app_count: usize,
    pub output: PathBuf,
    pub seed: Option<String>,
}

pub struct Prompter<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Prompter<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    /// Print `question` and read one trimmed line. `None` on end of input.
    fn ask(&mut self, question: &str) -> Result<Option<String>> {
        write!(self.output, "{question}").context("writing prompt")?;
        self.output.flush().context("flushing prompt")?;
        let mut line = String::new();
        let read = self
            .input
            .read_line(&mut line)
            .context("reading console input")?;
        if read == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }

    /// Keep asking until a positive integer arrives.
    pub fn app_count(&mut self) -> Result<usize> {
        loop {
            let Some(answer) = self.ask("How many apps would you like to generate? ")? else {
                bail!("input closed before an app count was provided");
            };
            match parse_app_count(&answer) {
                Ok(count) => return Ok(count),
                Err(_) => writeln!(self.output, "{INVALID_COUNT_MESSAGE}\n")
                    .context("writing prompt")?,
            }
        }
    }

    /// Output filename; blank or closed input falls back to `apps.json`.
    pub fn output_file(&mut self) -> Result<PathBuf> {
        let answer = self.ask(&format!(
            "Output filename (default: {DEFAULT_OUTPUT_FILE}): "
        ))?;
        Ok(PathBuf::from(
            answer
                .filter(|value| !value.is_empty())
                .unwrap_or_else(|| DEFAULT_OUTPUT_FILE.to_string()),
        ))
    }

    pub fn seed(&mut self) -> Result<Option<String>> {
        let answer = self.ask("Optional random seed (press Enter to skip): ")?;
        Ok(answer.filter(|value| !value.is_empty()))
    }

    /// Full interactive session in the original order: count, file, seed.
    pub fn collect(&mut self) -> Result<Answers> {
        let app_count = self.app_count()?;
        let output = self.output_file()?;
        let seed = self.seed()?;
        Ok(Answers {
            app_count,
            output,
            seed,
        })
    }
}

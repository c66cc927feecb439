#![allow(dead_code)]

use anyhow::{Context, Result, bail};
use chrono::NaiveDate;
use std::io::Write;
use std::path::PathBuf;
use std::process::{Command, Output, Stdio};
use storegen::{Catalog, GenerationContext};

/// Fixed reference date so seeded catalogs compare across days.
pub fn as_of() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 4, 1).expect("valid fixture date")
}

pub fn seeded(app_count: usize, seed: &str) -> Catalog {
    GenerationContext::new(Some(seed), as_of())
        .catalog(app_count)
        .expect("seeded generation")
}

pub fn binary(name: &str) -> PathBuf {
    match name {
        "storegen" => PathBuf::from(env!("CARGO_BIN_EXE_storegen")),
        "catalog-validate" => PathBuf::from(env!("CARGO_BIN_EXE_catalog-validate")),
        other => panic!("unknown binary {other}"),
    }
}

/// Command for one of the crate binaries with a clean `STOREGEN_*` env.
pub fn command(name: &str) -> Command {
    let mut cmd = Command::new(binary(name));
    for var in [
        "STOREGEN_SEED",
        "STOREGEN_AS_OF",
        "STOREGEN_OUTPUT",
        "STOREGEN_LOG",
    ] {
        cmd.env_remove(var);
    }
    cmd
}

/// Run `cmd` feeding `input` on stdin.
pub fn run_with_stdin(mut cmd: Command, input: &str) -> Result<Output> {
    let mut child = cmd
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .context("spawning command")?;
    child
        .stdin
        .take()
        .context("stdin handle")?
        .write_all(input.as_bytes())
        .context("writing stdin")?;
    child.wait_with_output().context("waiting for command")
}

/// Run `cmd` and fail with its stderr when it exits non-zero.
pub fn run_ok(mut cmd: Command) -> Result<Output> {
    let output = cmd
        .stdin(Stdio::null())
        .output()
        .context("running command")?;
    if !output.status.success() {
        bail!(
            "command failed with {:?}: {}",
            output.status.code(),
            String::from_utf8_lossy(&output.stderr)
        );
    }
    Ok(output)
}

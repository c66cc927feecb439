//! Synthetic catalog generator for homebrew app store test data.
//!
//! `generate` builds a `Catalog` of apps and versions with unique ids and
//! GUIDs; `CatalogIndex` and `CatalogSchema` check documents against the same
//! contract; `output` writes them out.

pub mod catalog;
pub mod config;
pub mod generator;
pub mod logging;
pub mod output;
pub mod pools;
pub mod prompt;
pub mod schema_loader;
pub mod seed;

pub use catalog::{
    App, CATALOG_FORMAT_VERSION, Catalog, CatalogIndex, CategoryCount, DEFAULT_OUTPUT_FILE,
    MAX_VERSION_SIZE, MAX_VERSIONS_PER_APP, MIN_VERSION_SIZE, Version, load_catalog_from_path,
};
pub use config::{Overrides, RunConfig};
pub use generator::{GenerateError, GenerationContext, generate};
pub use output::Format;
pub use schema_loader::CatalogSchema;

use anyhow::{Context, Result, bail};
use serde_json::Value;
use std::env;

/// Environment variable value, treating empty as unset.
pub fn env_non_empty(name: &str) -> Option<String> {
    match env::var(name) {
        Ok(value) if !value.is_empty() => Some(value),
        _ => None,
    }
}

/// Schema check plus invariant check on a generated catalog.
pub fn verify_catalog(schema: &CatalogSchema, catalog: &Catalog) -> Result<()> {
    let value = serde_json::to_value(catalog).context("serializing catalog for validation")?;
    schema.validate(&value)?;
    CatalogIndex::build(catalog.clone())?;
    Ok(())
}

/// Parse catalog JSON text, schema-check it, and index it.
pub fn parse_and_index(schema: &CatalogSchema, input: &str) -> Result<CatalogIndex> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        bail!("No catalog provided");
    }
    let value: Value = serde_json::from_str(trimmed).context("parsing catalog JSON")?;
    schema.validate(&value)?;
    let catalog: Catalog =
        serde_json::from_value(value).context("catalog JSON does not match the model")?;
    CatalogIndex::build(catalog)
}

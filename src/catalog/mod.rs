//! Catalog document model.
//!
//! Types here mirror `schema/catalog.schema.json` field for field. Field order
//! is the serialization order, so keep it aligned with the schema when adding
//! anything. `CatalogIndex` layers the cross-record invariants on top.

pub mod index;

pub use index::{CatalogIndex, CategoryCount};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Format marker written into every generated catalog.
pub const CATALOG_FORMAT_VERSION: &str = "1.0";

/// Inclusive byte-size bounds for a version payload (256 KiB to 50 MiB).
pub const MIN_VERSION_SIZE: u64 = 256 * 1024;
pub const MAX_VERSION_SIZE: u64 = 50 * 1024 * 1024;

/// Upper bound on versions per app.
pub const MAX_VERSIONS_PER_APP: usize = 5;

/// Default output filename used by the CLI.
pub const DEFAULT_OUTPUT_FILE: &str = "apps.json";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
/// Top-level generated document.
pub struct Catalog {
    pub version: String,
    pub last_updated: String,
    pub apps: Vec<App>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct App {
    pub id: String,
    pub name: String,
    pub author: String,
    pub category: String,
    pub description: String,
    #[serde(rename = "new")]
    pub is_new: bool,
    pub versions: Vec<Version>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
/// One release of an app.
pub struct Version {
    pub guid: String,
    pub version: String,
    pub size: u64,
    pub state: u8,
    pub release_date: String,
    pub changelog: String,
    pub title_id: String,
    pub region: String,
}

impl Catalog {
    /// Total number of versions across every app.
    pub fn version_count(&self) -> usize {
        self.apps.iter().map(|app| app.versions.len()).sum()
    }

    /// Iterates every version in document order, paired with its app.
    pub fn versions(&self) -> impl Iterator<Item = (&App, &Version)> {
        self.apps
            .iter()
            .flat_map(|app| app.versions.iter().map(move |version| (app, version)))
    }
}

/// Parse a catalog from disk without checking invariants.
pub fn load_catalog_from_path(path: &Path) -> Result<Catalog> {
    let data =
        fs::read_to_string(path).with_context(|| format!("reading catalog {}", path.display()))?;
    serde_json::from_str(&data).with_context(|| format!("parsing catalog {}", path.display()))
}

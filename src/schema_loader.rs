//! JSON Schema contract for catalog documents.
//!
//! The schema ships inside the binary (`schema/catalog.schema.json`) so the
//! generator can check its own output without locating the repository.
//! Callers may also load an alternative schema file from disk.

use anyhow::{Context, Result, anyhow, bail};
use jsonschema::JSONSchema;
use serde_json::Value;
use std::fs::File;
use std::path::Path;

/// Schema bundled with the crate.
pub const BUNDLED_CATALOG_SCHEMA: &str = include_str!("../schema/catalog.schema.json");

/// Compiled catalog schema.
pub struct CatalogSchema {
    compiled: JSONSchema,
}

impl CatalogSchema {
    /// Compile the bundled schema.
    pub fn bundled() -> Result<Self> {
        let raw: Value =
            serde_json::from_str(BUNDLED_CATALOG_SCHEMA).context("parsing bundled catalog schema")?;
        Self::compile(&raw).context("compiling bundled catalog schema")
    }

    /// Load and compile a schema file.
    pub fn load(path: &Path) -> Result<Self> {
        let raw: Value = serde_json::from_reader(
            File::open(path).with_context(|| format!("opening schema {}", path.display()))?,
        )
        .with_context(|| format!("parsing schema {}", path.display()))?;
        Self::compile(&raw).with_context(|| format!("compiling schema {}", path.display()))
    }

    fn compile(raw: &Value) -> Result<Self> {
        let compiled = JSONSchema::compile(raw).map_err(|err| anyhow!("{err}"))?;
        Ok(Self { compiled })
    }

    /// Validate `instance`, reporting every violation.
    pub fn validate(&self, instance: &Value) -> Result<()> {
        if let Err(errors) = self.compiled.validate(instance) {
            let details = errors
                .map(|err| format!("{}: {}", err.instance_path, err))
                .collect::<Vec<_>>()
                .join("\n");
            bail!("catalog failed schema validation:\n{}", details);
        }
        Ok(())
    }

    pub fn is_valid(&self, instance: &Value) -> bool {
        self.compiled.is_valid(instance)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn minimal() -> Value {
        json!({
            "version": "1.0",
            "last_updated": "2026-02-01",
            "apps": [{
                "id": "neo-player-a1b2",
                "name": "Neo Player",
                "author": "XBDev",
                "category": "media",
                "description": "All-in-one media solution.",
                "new": false,
                "versions": [{
                    "guid": "1234567",
                    "version": "1.0",
                    "size": 262144,
                    "state": 0,
                    "release_date": "Jan 05, 2026",
                    "changelog": "Initial release",
                    "title_id": "00FF00FF",
                    "region": "GLO"
                }]
            }]
        })
    }

    #[test]
    fn bundled_schema_accepts_minimal_catalog() {
        let schema = CatalogSchema::bundled().unwrap();
        schema.validate(&minimal()).expect("minimal catalog is valid");
    }

    #[test]
    fn lowercase_title_id_is_rejected() {
        let schema = CatalogSchema::bundled().unwrap();
        let mut doc = minimal();
        doc["apps"][0]["versions"][0]["title_id"] = json!("00ff00ff");
        let err = schema.validate(&doc).unwrap_err();
        assert!(err.to_string().contains("title_id"), "{err}");
    }

    #[test]
    fn nonzero_state_and_extra_fields_are_rejected() {
        let schema = CatalogSchema::bundled().unwrap();
        let mut doc = minimal();
        doc["apps"][0]["versions"][0]["state"] = json!(1);
        assert!(!schema.is_valid(&doc));

        let mut doc = minimal();
        doc["apps"][0]["rating"] = json!(5);
        assert!(!schema.is_valid(&doc));
    }
}

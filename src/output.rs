//! Serialization boundary: catalog to JSON text, text to a sink.

use crate::catalog::Catalog;
use anyhow::{Context, Result};
use std::io::Write;
use std::path::Path;
use tempfile::NamedTempFile;
use tracing::info;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Format {
    /// Two-space indented JSON.
    #[default]
    Pretty,
    /// Single line.
    Compact,
}

/// Serialize the catalog, newline-terminated.
pub fn render(catalog: &Catalog, format: Format) -> Result<String> {
    let mut text = match format {
        Format::Pretty => serde_json::to_string_pretty(catalog),
        Format::Compact => serde_json::to_string(catalog),
    }
    .context("serializing catalog")?;
    text.push('\n');
    Ok(text)
}

/// Write rendered text to any sink.
pub fn write_to<W: Write>(mut sink: W, text: &str) -> Result<()> {
    sink.write_all(text.as_bytes())
        .context("writing catalog output")?;
    sink.flush().context("flushing catalog output")
}

/// Write the catalog to `path`, replacing it atomically.
///
/// The text lands in a temp file next to the destination first, so a failed
/// run never leaves a truncated catalog behind.
pub fn write_catalog(path: &Path, catalog: &Catalog, format: Format) -> Result<()> {
    let text = render(catalog, format)?;
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let mut temp = NamedTempFile::new_in(dir)
        .with_context(|| format!("creating temp file in {}", dir.display()))?;
    write_to(&mut temp, &text)?;
    temp.persist(path)
        .with_context(|| format!("saving catalog to {}", path.display()))?;
    info!(path = %path.display(), bytes = text.len(), "wrote catalog");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generator::GenerationContext;
    use chrono::NaiveDate;
    use tempfile::TempDir;

    fn catalog() -> Catalog {
        GenerationContext::new(Some("output"), NaiveDate::from_ymd_opt(2026, 5, 1).unwrap())
            .catalog(2)
            .unwrap()
    }

    #[test]
    fn pretty_uses_two_space_indent() {
        let text = render(&catalog(), Format::Pretty).unwrap();
        assert!(text.starts_with("{\n  \"version\": \"1.0\",\n  \"last_updated\": \"2026-05-01\""));
        assert!(text.ends_with("}\n"));
    }

    #[test]
    fn compact_is_one_line() {
        let text = render(&catalog(), Format::Compact).unwrap();
        assert_eq!(text.lines().count(), 1);
    }

    #[test]
    fn write_catalog_replaces_existing_file() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("apps.json");
        std::fs::write(&path, "stale").unwrap();
        let catalog = catalog();
        write_catalog(&path, &catalog, Format::Pretty).unwrap();
        let reloaded = crate::catalog::load_catalog_from_path(&path).unwrap();
        assert_eq!(reloaded, catalog);
    }
}

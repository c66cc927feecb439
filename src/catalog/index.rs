//! Indexed view of a catalog.
//!
//! The index checks every cross-record invariant (unique app ids, unique
//! GUIDs across apps, version sequencing, size bounds, pool membership) and
//! then offers lookup by app id plus per-category counts. It is strict: a
//! generated or loaded catalog that breaks any rule is rejected outright.

use crate::catalog::{
    App, CATALOG_FORMAT_VERSION, Catalog, MAX_VERSION_SIZE, MAX_VERSIONS_PER_APP,
    MIN_VERSION_SIZE, Version, load_catalog_from_path,
};
use crate::pools;
use anyhow::{Context, Result, bail};
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;

/// Label of the synthetic category that counts every app.
pub const ALL_APPS_CATEGORY: &str = "All Apps";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
/// Category name and how many apps it holds.
pub struct CategoryCount {
    pub name: String,
    pub count: usize,
}

#[derive(Debug)]
/// Catalog plus a derived index keyed by app id.
pub struct CatalogIndex {
    catalog: Catalog,
    by_id: BTreeMap<String, usize>,
}

impl CatalogIndex {
    /// Validate `catalog` and build the index.
    pub fn build(catalog: Catalog) -> Result<Self> {
        validate_header(&catalog)?;
        let by_id = build_index(&catalog)?;
        Ok(Self { catalog, by_id })
    }

    /// Load a catalog from disk and validate it.
    pub fn load(path: &Path) -> Result<Self> {
        let catalog =
            load_catalog_from_path(path).with_context(|| format!("loading {}", path.display()))?;
        Self::build(catalog).with_context(|| format!("validating {}", path.display()))
    }

    /// Resolve an app by id.
    pub fn app(&self, id: &str) -> Option<&App> {
        self.by_id.get(id).map(|idx| &self.catalog.apps[*idx])
    }

    /// App ids in stable order.
    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.by_id.keys().map(String::as_str)
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn into_catalog(self) -> Catalog {
        self.catalog
    }

    /// Category counts: `All Apps` first, then every pool category in pool
    /// order, including empty ones.
    pub fn category_counts(&self) -> Vec<CategoryCount> {
        let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
        for app in &self.catalog.apps {
            *counts.entry(app.category.as_str()).or_default() += 1;
        }

        let mut result = Vec::with_capacity(pools::CATEGORIES.len() + 1);
        result.push(CategoryCount {
            name: ALL_APPS_CATEGORY.to_string(),
            count: self.catalog.apps.len(),
        });
        for category in pools::CATEGORIES {
            result.push(CategoryCount {
                name: category.to_string(),
                count: counts.get(category).copied().unwrap_or(0),
            });
        }
        result
    }
}

fn validate_header(catalog: &Catalog) -> Result<()> {
    if catalog.version != CATALOG_FORMAT_VERSION {
        bail!(
            "catalog version '{}' not supported, expected {}",
            catalog.version,
            CATALOG_FORMAT_VERSION
        );
    }
    if chrono::NaiveDate::parse_from_str(&catalog.last_updated, "%Y-%m-%d").is_err() {
        bail!(
            "last_updated must be YYYY-MM-DD, got '{}'",
            catalog.last_updated
        );
    }
    Ok(())
}

fn build_index(catalog: &Catalog) -> Result<BTreeMap<String, usize>> {
    if catalog.apps.is_empty() {
        bail!("catalog contains no apps");
    }

    let mut guids: BTreeSet<&str> = BTreeSet::new();
    let mut map = BTreeMap::new();
    for (idx, app) in catalog.apps.iter().enumerate() {
        validate_app(app)?;
        if map.insert(app.id.clone(), idx).is_some() {
            bail!("duplicate app id {}", app.id);
        }
        for version in &app.versions {
            if !guids.insert(version.guid.as_str()) {
                bail!(
                    "app {} reuses guid {} already issued to another version",
                    app.id,
                    version.guid
                );
            }
        }
    }
    Ok(map)
}

fn validate_app(app: &App) -> Result<()> {
    let slug = crate::generator::slugify(&app.name);
    let Some(suffix) = app
        .id
        .strip_prefix(slug.as_str())
        .and_then(|rest| rest.strip_prefix('-'))
    else {
        bail!("app id {} does not start with slug '{}-'", app.id, slug);
    };
    if suffix.is_empty()
        || !suffix
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit())
    {
        bail!("app id {} has an invalid suffix '{}'", app.id, suffix);
    }

    check_pool(&app.id, "author", &app.author, pools::AUTHORS)?;
    check_pool(&app.id, "category", &app.category, pools::CATEGORIES)?;
    if !app.description.contains(app.category.as_str()) {
        bail!("app {} description does not mention its category", app.id);
    }

    if app.versions.is_empty() || app.versions.len() > MAX_VERSIONS_PER_APP {
        bail!(
            "app {} has {} versions, expected 1..={}",
            app.id,
            app.versions.len(),
            MAX_VERSIONS_PER_APP
        );
    }

    let mut expected: Option<(u32, u32)> = None;
    for version in &app.versions {
        validate_version(&app.id, version)?;
        let parsed = parse_version_number(&version.version)
            .with_context(|| format!("app {} version {}", app.id, version.guid))?;
        if let Some((major, minor)) = expected {
            if parsed != (major, minor) {
                bail!(
                    "app {} version {} breaks the sequence, expected {}.{}",
                    app.id,
                    version.version,
                    major,
                    minor
                );
            }
        }
        let Some(next_minor) = parsed.1.checked_add(1) else {
            bail!(
                "app {} version {} has a minor too large to follow",
                app.id,
                version.version
            );
        };
        expected = Some((parsed.0, next_minor));
    }
    Ok(())
}

fn validate_version(app_id: &str, version: &Version) -> Result<()> {
    let guid = &version.guid;
    if !(7..=9).contains(&guid.len())
        || !guid.chars().all(|c| c.is_ascii_digit())
        || guid.starts_with('0')
    {
        bail!("app {app_id} has malformed guid '{guid}'");
    }
    if !(MIN_VERSION_SIZE..=MAX_VERSION_SIZE).contains(&version.size) {
        bail!(
            "app {app_id} version {guid} size {} outside {}..={}",
            version.size,
            MIN_VERSION_SIZE,
            MAX_VERSION_SIZE
        );
    }
    if version.state != 0 {
        bail!("app {app_id} version {guid} has state {}", version.state);
    }
    if version.title_id.len() != 8
        || !version
            .title_id
            .chars()
            .all(|c| c.is_ascii_digit() || ('A'..='F').contains(&c))
    {
        bail!(
            "app {app_id} version {guid} has malformed title_id '{}'",
            version.title_id
        );
    }
    if chrono::NaiveDate::parse_from_str(&version.release_date, "%b %d, %Y").is_err() {
        bail!(
            "app {app_id} version {guid} has malformed release_date '{}'",
            version.release_date
        );
    }
    check_pool(app_id, "region", &version.region, pools::REGIONS)?;
    check_pool(app_id, "changelog", &version.changelog, pools::CHANGELOGS)?;
    Ok(())
}

fn parse_version_number(raw: &str) -> Result<(u32, u32)> {
    let Some((major, minor)) = raw.split_once('.') else {
        bail!("version '{raw}' is not <major>.<minor>");
    };
    let major = major
        .parse()
        .with_context(|| format!("version '{raw}' has a non-numeric major"))?;
    let minor = minor
        .parse()
        .with_context(|| format!("version '{raw}' has a non-numeric minor"))?;
    Ok((major, minor))
}

fn check_pool(app_id: &str, field: &str, value: &str, pool: &[&str]) -> Result<()> {
    if !pool.contains(&value) {
        bail!("app {app_id} has unknown {field} '{value}'");
    }
    Ok(())
}

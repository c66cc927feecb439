//! Catalog generation.
//!
//! A `GenerationContext` owns everything one run mutates: the RNG, the issued
//! app ids, the issued GUIDs and the reference date. Independent runs build
//! independent contexts, so nothing leaks between catalogs generated in the
//! same process.
//!
//! Random draws happen in a fixed order per app (category, name, id, author,
//! description, new flag, then the version set) so seeded output stays stable.

pub mod ids;

pub use ids::{GuidAllocator, IdAllocator, slugify};

use crate::catalog::{
    App, CATALOG_FORMAT_VERSION, Catalog, MAX_VERSION_SIZE, MAX_VERSIONS_PER_APP,
    MIN_VERSION_SIZE, Version,
};
use crate::pools::{self, HEX_ALPHABET};
use crate::seed;
use chrono::{Duration, Local, NaiveDate};
use rand::Rng;
use rand::rngs::StdRng;
use thiserror::Error;
use tracing::{debug, info};

/// `last_updated` format.
pub const LAST_UPDATED_FORMAT: &str = "%Y-%m-%d";
/// `release_date` format, e.g. `Mar 07, 2026`.
pub const RELEASE_DATE_FORMAT: &str = "%b %d, %Y";
/// Release dates fall within this many days before the reference date.
pub const RELEASE_WINDOW_DAYS: i64 = 365;

const TITLE_ID_LEN: usize = 8;
const MAJOR_RANGE: std::ops::RangeInclusive<u32> = 1..=3;
const MINOR_RANGE: std::ops::RangeInclusive<u32> = 0..=5;

#[derive(Debug, Error)]
pub enum GenerateError {
    #[error("app count must be a positive integer")]
    InvalidAppCount,

    #[error("unable to mint a unique id for '{slug}' within the suffix budget")]
    IdentifierSpaceExhausted { slug: String },

    #[error("every GUID in range has already been issued")]
    GuidSpaceExhausted,
}

/// Per-run generation state.
#[derive(Debug)]
pub struct GenerationContext {
    rng: StdRng,
    app_ids: IdAllocator,
    guids: GuidAllocator,
    as_of: NaiveDate,
}

impl GenerationContext {
    /// Context for one run. `seed` makes every draw reproducible; `as_of` is
    /// the date the catalog claims to be generated on.
    pub fn new(seed: Option<&str>, as_of: NaiveDate) -> Self {
        Self::with_rng(seed::rng_for(seed), as_of)
    }

    pub fn with_rng(rng: StdRng, as_of: NaiveDate) -> Self {
        Self {
            rng,
            app_ids: IdAllocator::new(),
            guids: GuidAllocator::new(),
            as_of,
        }
    }

    pub fn as_of(&self) -> NaiveDate {
        self.as_of
    }

    /// Number of app ids issued so far.
    pub fn issued_app_ids(&self) -> usize {
        self.app_ids.len()
    }

    /// Number of GUIDs issued so far.
    pub fn issued_guids(&self) -> usize {
        self.guids.len()
    }

    /// Build a catalog of exactly `app_count` apps.
    pub fn catalog(&mut self, app_count: usize) -> Result<Catalog, GenerateError> {
        if app_count == 0 {
            return Err(GenerateError::InvalidAppCount);
        }

        let mut apps = Vec::with_capacity(app_count);
        for _ in 0..app_count {
            apps.push(self.app()?);
        }

        let catalog = Catalog {
            version: CATALOG_FORMAT_VERSION.to_string(),
            last_updated: self.as_of.format(LAST_UPDATED_FORMAT).to_string(),
            apps,
        };
        info!(
            apps = catalog.apps.len(),
            versions = catalog.version_count(),
            last_updated = %catalog.last_updated,
            "generated catalog"
        );
        Ok(catalog)
    }

    /// Generate one app, including its version set.
    pub fn app(&mut self) -> Result<App, GenerateError> {
        let category = pools::pick(&mut self.rng, pools::CATEGORIES);
        let name = self.name();
        let id = self.app_ids.allocate(&mut self.rng, &name)?;
        let author = pools::pick(&mut self.rng, pools::AUTHORS);
        let description = self.description(category);
        let is_new = self.rng.gen_bool(0.5);
        let versions = self.versions()?;
        debug!(%id, versions = versions.len(), "generated app");

        Ok(App {
            id,
            name,
            author: author.to_string(),
            category: category.to_string(),
            description,
            is_new,
            versions,
        })
    }

    /// `"<prefix> <suffix>"` from the name pools.
    pub fn name(&mut self) -> String {
        let prefix = pools::pick(&mut self.rng, pools::NAME_PREFIXES);
        let suffix = pools::pick(&mut self.rng, pools::NAME_SUFFIXES);
        format!("{prefix} {suffix}")
    }

    pub fn description(&mut self, category: &str) -> String {
        let template = pools::pick(&mut self.rng, pools::DESCRIPTION_TEMPLATES);
        pools::render_description(template, category)
    }

    /// One to five versions sharing a major, with consecutive minors.
    pub fn versions(&mut self) -> Result<Vec<Version>, GenerateError> {
        let count = self.rng.gen_range(1..=MAX_VERSIONS_PER_APP);
        let major = self.rng.gen_range(MAJOR_RANGE);
        let minor = self.rng.gen_range(MINOR_RANGE);

        let mut versions = Vec::with_capacity(count);
        for offset in 0..count as u32 {
            versions.push(self.version(format!("{major}.{}", minor + offset))?);
        }
        Ok(versions)
    }

    fn version(&mut self, number: String) -> Result<Version, GenerateError> {
        let guid = self.guids.allocate(&mut self.rng)?;
        let size = self.rng.gen_range(MIN_VERSION_SIZE..=MAX_VERSION_SIZE);
        let release_date = self.release_date();
        let changelog = pools::pick(&mut self.rng, pools::CHANGELOGS);
        let title_id = pools::random_chars(&mut self.rng, HEX_ALPHABET, TITLE_ID_LEN);
        let region = pools::pick(&mut self.rng, pools::REGIONS);

        Ok(Version {
            guid,
            version: number,
            size,
            state: 0,
            release_date,
            changelog: changelog.to_string(),
            title_id,
            region: region.to_string(),
        })
    }

    /// A date within the release window ending at the reference date.
    pub fn release_date(&mut self) -> String {
        let window_start = self.as_of - Duration::days(RELEASE_WINDOW_DAYS);
        let offset = self.rng.gen_range(0..=RELEASE_WINDOW_DAYS);
        (window_start + Duration::days(offset))
            .format(RELEASE_DATE_FORMAT)
            .to_string()
    }
}

/// Generate a catalog dated today. A seed makes the run reproducible for the
/// current day; pin the date with `GenerationContext::new` when output must be
/// identical across days.
pub fn generate(app_count: usize, seed: Option<&str>) -> Result<Catalog, GenerateError> {
    GenerationContext::new(seed, Local::now().date_naive()).catalog(app_count)
}

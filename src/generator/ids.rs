//! Identifier and GUID allocation with bounded retries.
//!
//! Both allocators remember what they issued so the uniqueness invariants
//! hold for one run. Neither loops forever: app ids widen their suffix after
//! repeated collisions, GUIDs fall back to a linear probe of the range.

use crate::generator::GenerateError;
use crate::pools::{SUFFIX_ALPHABET, random_chars};
use rand::Rng;
use std::collections::BTreeSet;
use std::ops::RangeInclusive;
use tracing::{debug, warn};

/// Suffix length for freshly minted app ids.
pub const BASE_SUFFIX_LEN: usize = 4;
/// Longest suffix tried before giving up on a slug.
pub const MAX_SUFFIX_LEN: usize = 12;
const SUFFIX_STEP: usize = 2;

/// Random draws per suffix length (and for GUIDs before probing).
pub const MAX_ATTEMPTS: usize = 64;

/// Range GUIDs are drawn from; every value has 7 to 9 decimal digits.
pub const GUID_RANGE: RangeInclusive<u32> = 1_000_000..=999_999_999;

/// Lowercase the name and replace spaces with hyphens.
pub fn slugify(name: &str) -> String {
    name.to_lowercase().replace(' ', "-")
}

#[derive(Debug)]
/// App ids issued during one run.
pub struct IdAllocator {
    base_suffix_len: usize,
    issued: BTreeSet<String>,
}

impl Default for IdAllocator {
    fn default() -> Self {
        Self::with_suffix_len(BASE_SUFFIX_LEN)
    }
}

impl IdAllocator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocator starting at a custom suffix length. Short suffixes exist for tests.
    pub fn with_suffix_len(base_suffix_len: usize) -> Self {
        Self {
            base_suffix_len: base_suffix_len.clamp(1, MAX_SUFFIX_LEN),
            issued: BTreeSet::new(),
        }
    }

    /// Mint `<slug>-<suffix>` not yet issued in this run.
    pub fn allocate<R: Rng + ?Sized>(
        &mut self,
        rng: &mut R,
        name: &str,
    ) -> Result<String, GenerateError> {
        let slug = slugify(name);
        let mut suffix_len = self.base_suffix_len;
        while suffix_len <= MAX_SUFFIX_LEN {
            for attempt in 0..MAX_ATTEMPTS {
                let candidate = format!(
                    "{slug}-{}",
                    random_chars(rng, SUFFIX_ALPHABET, suffix_len)
                );
                if self.issued.insert(candidate.clone()) {
                    return Ok(candidate);
                }
                debug!(%candidate, attempt, "app id collision");
            }
            warn!(
                %slug,
                suffix_len,
                "app id suffix space crowded; widening suffix"
            );
            suffix_len += SUFFIX_STEP;
        }
        Err(GenerateError::IdentifierSpaceExhausted { slug })
    }

    pub fn contains(&self, id: &str) -> bool {
        self.issued.contains(id)
    }

    pub fn len(&self) -> usize {
        self.issued.len()
    }

    pub fn is_empty(&self) -> bool {
        self.issued.is_empty()
    }
}

#[derive(Debug)]
/// Version GUIDs issued during one run.
pub struct GuidAllocator {
    range: RangeInclusive<u32>,
    issued: BTreeSet<u32>,
}

impl Default for GuidAllocator {
    fn default() -> Self {
        Self::with_range(GUID_RANGE)
    }
}

impl GuidAllocator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocator over a custom range. Narrow ranges exist for tests.
    pub fn with_range(range: RangeInclusive<u32>) -> Self {
        Self {
            range,
            issued: BTreeSet::new(),
        }
    }

    /// Draw a GUID not yet issued in this run, as its decimal string.
    pub fn allocate<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Result<String, GenerateError> {
        for attempt in 0..MAX_ATTEMPTS {
            let candidate = rng.gen_range(self.range.clone());
            if self.issued.insert(candidate) {
                return Ok(candidate.to_string());
            }
            debug!(candidate, attempt, "guid collision");
        }

        warn!("guid draws keep colliding; probing for a free value");
        let start = rng.gen_range(self.range.clone());
        let probe = (start..=*self.range.end()).chain(*self.range.start()..start);
        for candidate in probe {
            if self.issued.insert(candidate) {
                return Ok(candidate.to_string());
            }
        }
        Err(GenerateError::GuidSpaceExhausted)
    }

    pub fn contains(&self, guid: u32) -> bool {
        self.issued.contains(&guid)
    }

    pub fn len(&self) -> usize {
        self.issued.len()
    }

    pub fn is_empty(&self) -> bool {
        self.issued.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use rand::rngs::mock::StepRng;

    #[test]
    fn slug_lowercases_and_hyphenates() {
        assert_eq!(slugify("Neo Player"), "neo-player");
        assert_eq!(slugify("Ultra  Suite"), "ultra--suite");
    }

    #[test]
    fn ids_carry_slug_and_suffix() {
        let mut rng = StdRng::seed_from_u64(1);
        let mut ids = IdAllocator::new();
        let id = ids.allocate(&mut rng, "Retro Engine").unwrap();
        let suffix = id.strip_prefix("retro-engine-").expect("slug prefix");
        assert_eq!(suffix.len(), BASE_SUFFIX_LEN);
        assert!(ids.contains(&id));
    }

    #[test]
    fn saturated_suffix_space_widens() {
        let mut rng = StdRng::seed_from_u64(2);
        let mut ids = IdAllocator::with_suffix_len(1);
        // Every one-char suffix taken: only wider suffixes remain.
        for c in SUFFIX_ALPHABET {
            ids.issued.insert(format!("pro-suite-{}", *c as char));
        }
        let id = ids.allocate(&mut rng, "Pro Suite").unwrap();
        let suffix = id.strip_prefix("pro-suite-").unwrap();
        assert_eq!(suffix.len(), 1 + SUFFIX_STEP);
        assert_eq!(ids.len(), SUFFIX_ALPHABET.len() + 1);
    }

    #[test]
    fn constant_draws_exhaust_every_suffix_length() {
        // A stuck RNG repeats one suffix, so each length yields a single id.
        let mut rng = StepRng::new(0, 0);
        let mut ids = IdAllocator::new();
        let mut issued = Vec::new();
        let err = loop {
            match ids.allocate(&mut rng, "Pro Suite") {
                Ok(id) => issued.push(id),
                Err(err) => break err,
            }
            assert!(issued.len() <= MAX_SUFFIX_LEN, "allocation never gave up");
        };
        let lengths: Vec<usize> = issued
            .iter()
            .map(|id| id.strip_prefix("pro-suite-").unwrap().len())
            .collect();
        assert_eq!(lengths, vec![4, 6, 8, 10, 12]);
        assert!(matches!(
            err,
            GenerateError::IdentifierSpaceExhausted { ref slug } if slug == "pro-suite"
        ));
        assert_eq!(ids.len(), 5);
    }

    #[test]
    fn longest_suffix_allocator_exhausts_after_one_id() {
        let mut rng = StepRng::new(0, 0);
        let mut ids = IdAllocator::with_suffix_len(MAX_SUFFIX_LEN);
        ids.allocate(&mut rng, "Neo Player").unwrap();
        assert!(matches!(
            ids.allocate(&mut rng, "Neo Player"),
            Err(GenerateError::IdentifierSpaceExhausted { .. })
        ));
    }

    #[test]
    fn guids_are_unique_and_in_range() {
        let mut rng = StdRng::seed_from_u64(3);
        let mut guids = GuidAllocator::new();
        let mut seen = BTreeSet::new();
        for _ in 0..500 {
            let guid = guids.allocate(&mut rng).unwrap();
            let value: u32 = guid.parse().unwrap();
            assert!(GUID_RANGE.contains(&value));
            assert!((7..=9).contains(&guid.len()));
            assert!(seen.insert(guid));
        }
        assert_eq!(guids.len(), 500);
    }

    #[test]
    fn narrow_guid_range_fills_then_exhausts() {
        let mut rng = StdRng::seed_from_u64(4);
        let mut guids = GuidAllocator::with_range(10..=14);
        let mut drawn: Vec<u32> = (0..5)
            .map(|_| guids.allocate(&mut rng).unwrap().parse().unwrap())
            .collect();
        drawn.sort_unstable();
        assert_eq!(drawn, vec![10, 11, 12, 13, 14]);
        assert!(matches!(
            guids.allocate(&mut rng),
            Err(GenerateError::GuidSpaceExhausted)
        ));
    }
}

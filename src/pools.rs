//! Fixed value pools the generator draws from.
//!
//! Order matters: seeded runs pick by index, so reordering or inserting
//! entries changes every seeded catalog.

use rand::Rng;

pub const CATEGORIES: &[&str] = &["games", "emulators", "tools", "media", "misc", "saves"];

pub const REGIONS: &[&str] = &["USA", "PAL", "JPN", "USA-PAL", "USA-JPN", "GLO"];

pub const AUTHORS: &[&str] = &[
    "XBDev",
    "Homebrew Team",
    "OpenSoft",
    "Retro Labs",
    "Indie Dev",
    "XBTools",
    "GameStudio",
    "MediaGroup",
    "NetSoft",
    "NextGen Coders",
    "ArcadeForge",
];

pub const CHANGELOGS: &[&str] = &[
    "Initial release",
    "Bug fixes and stability improvements",
    "Performance optimizations",
    "Updated core engine",
    "Improved compatibility with more titles",
    "Major rewrite with enhancements",
    "Security improvements",
    "UI overhaul and better navigation",
];

pub const NAME_PREFIXES: &[&str] = &[
    "Ultra", "Hyper", "Neo", "Super", "Advanced", "Pro", "Next", "Retro", "Dynamic", "Smart",
];

pub const NAME_SUFFIXES: &[&str] = &[
    "Launcher",
    "Studio",
    "Manager",
    "Player",
    "Dashboard",
    "Explorer",
    "Engine",
    "Suite",
    "Toolkit",
    "Center",
];

/// Placeholder substituted with the app category.
pub const CATEGORY_PLACEHOLDER: &str = "{category}";

pub const DESCRIPTION_TEMPLATES: &[&str] = &[
    "A powerful {category} application for Xbox.",
    "Next-generation {category} experience.",
    "Optimized {category} software with enhanced features.",
    "High performance {category} app built for stability.",
    "All-in-one {category} solution.",
];

/// Alphabet for identifier suffixes.
pub const SUFFIX_ALPHABET: &[u8] = b"abcdefghijklmnopqrstuvwxyz0123456789";

/// Alphabet for title ids.
pub const HEX_ALPHABET: &[u8] = b"0123456789ABCDEF";

/// Uniform pick from a non-empty pool.
pub fn pick<'a, R: Rng + ?Sized>(rng: &mut R, pool: &[&'a str]) -> &'a str {
    pool[rng.gen_range(0..pool.len())]
}

/// `len` characters drawn uniformly from `alphabet`.
pub fn random_chars<R: Rng + ?Sized>(rng: &mut R, alphabet: &[u8], len: usize) -> String {
    (0..len)
        .map(|_| alphabet[rng.gen_range(0..alphabet.len())] as char)
        .collect()
}

/// Fill `{category}` into a description template.
pub fn render_description(template: &str, category: &str) -> String {
    template.replace(CATEGORY_PLACEHOLDER, category)
}

//! Fixed set of searchable marketplace categories.
//!
//! Each category carries its marketplace id (if it narrows the search), the
//! fee tier it is billed at, and the title phrases that mark a listing as an
//! accessory or non-working item for that category.

use serde::{Deserialize, Serialize};

use crate::fees::FeeTier;
use crate::params::ParamsError;

/// Phrases that identify loose parts, packaging, or broken units in game listings.
/// "manaul only" is a common misspelling sellers use.
const VIDEO_GAME_EXCLUSIONS: &[&str] = &[
    "case only",
    "manual only",
    "insert only",
    "artwork only",
    "booklet only",
    "manaul only",
    "no disc",
    "for parts",
    "not working",
    "empty box",
    "broken",
    "defective",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Category {
    #[default]
    All,
    Books,
    DvdBluRay,
    Headphones,
    MusicCds,
    MusicCassettes,
    VideoGames,
}

impl Category {
    pub const ALL: [Category; 7] = [
        Category::All,
        Category::Books,
        Category::DvdBluRay,
        Category::Headphones,
        Category::MusicCds,
        Category::MusicCassettes,
        Category::VideoGames,
    ];

    /// Human-readable name, as shown in saved-search names and tables.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Category::All => "All Categories",
            Category::Books => "Books",
            Category::DvdBluRay => "DVD & Blu-ray",
            Category::Headphones => "Headphones",
            Category::MusicCds => "Music CDs",
            Category::MusicCassettes => "Music Cassettes",
            Category::VideoGames => "Video Games & Consoles",
        }
    }

    /// Command-line friendly identifier; matches the serde representation.
    #[must_use]
    pub fn slug(self) -> &'static str {
        match self {
            Category::All => "all",
            Category::Books => "books",
            Category::DvdBluRay => "dvd-blu-ray",
            Category::Headphones => "headphones",
            Category::MusicCds => "music-cds",
            Category::MusicCassettes => "music-cassettes",
            Category::VideoGames => "video-games",
        }
    }

    /// Marketplace category id, or `None` for an unrestricted search.
    #[must_use]
    pub fn marketplace_id(self) -> Option<&'static str> {
        match self {
            Category::All => None,
            Category::Books => Some("267"),
            Category::DvdBluRay => Some("617"),
            Category::Headphones => Some("112529"),
            Category::MusicCds => Some("176984"),
            Category::MusicCassettes => Some("176983"),
            Category::VideoGames => Some("1249"),
        }
    }

    #[must_use]
    pub fn fee_tier(self) -> FeeTier {
        match self {
            Category::Headphones | Category::VideoGames => FeeTier::Preferred,
            _ => FeeTier::Standard,
        }
    }

    /// Title phrases that disqualify a listing in this category.
    #[must_use]
    pub fn exclusion_phrases(self) -> &'static [&'static str] {
        match self {
            Category::VideoGames => VIDEO_GAME_EXCLUSIONS,
            _ => &[],
        }
    }

    /// Returns the first exclusion phrase found in `title`, ignoring ASCII case.
    #[must_use]
    pub fn excluded_phrase_in(self, title: &str) -> Option<&'static str> {
        let phrases = self.exclusion_phrases();
        if phrases.is_empty() {
            return None;
        }
        let haystack = title.to_lowercase();
        phrases
            .iter()
            .copied()
            .find(|phrase| haystack.contains(phrase))
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

impl std::str::FromStr for Category {
    type Err = ParamsError;

    /// Accepts the slug, the display label (any case), or the marketplace id.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim();
        Category::ALL
            .into_iter()
            .find(|c| {
                c.slug().eq_ignore_ascii_case(needle)
                    || c.label().eq_ignore_ascii_case(needle)
                    || c.marketplace_id() == Some(needle)
            })
            .ok_or_else(|| ParamsError::UnknownCategory(needle.to_string()))
    }
}

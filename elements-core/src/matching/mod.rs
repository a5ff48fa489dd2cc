//! Matching - from loose keys to registry entries
//!
//! Display keys in the catalog ("sign-in", "theme-switcher") rarely equal the
//! canonical item name ("clerk-sign-in"), and manifest file records do not
//! always carry the exact target the index announced. This module holds both
//! lookups:
//!
//! - [`MatchEngine`]: tiered key → item resolution
//! - [`find_best_file_match`]: requested file → manifest file record
//!
//! Absence of a match is `None`, never an error.

mod engine;
mod files;
mod synonyms;

use once_cell::sync::Lazy;

pub use engine::{MatchEngine, MatchResult, MatchTier, Named};
pub use files::{find_best_file_match, find_file_match_with_kind, FileMatchKind, FileRequest};
pub use synonyms::{default_synonyms, SynonymTable};

static DEFAULT_ENGINE: Lazy<MatchEngine> = Lazy::new(MatchEngine::new);

/// Resolve `key` against `items` with the default engine
pub fn resolve<'a, T: Named>(key: &str, items: &'a [T]) -> Option<&'a T> {
    DEFAULT_ENGINE.resolve(key, items)
}

/// Resolve `key` with the default engine and report the matching tier
pub fn resolve_with_tier<'a, T: Named>(key: &str, items: &'a [T]) -> Option<MatchResult<'a, T>> {
    DEFAULT_ENGINE.resolve_with_tier(key, items)
}

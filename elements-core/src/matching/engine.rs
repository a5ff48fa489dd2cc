//! Match Engine - resolves a free-form key to a registry entry
//!
//! Tiers are tried in order and the first tier with any match wins; within a
//! tier the first entry in list order wins. Comparison is case-insensitive.
//!
//! | Tier | Rule |
//! |------|------|
//! | exact | `name == key` |
//! | suffix | `name` ends with `key` (so `clerk-sign-in` answers `sign-in`) |
//! | prefix | `key` ends with `name` |
//! | substring | either contains the other |
//! | partial-token | enough shared `-` tokens longer than two characters |
//! | synonym | a key token has a synonym inside `name` |

use std::fmt;

use serde::{Deserialize, Serialize};

use super::synonyms::{default_synonyms, SynonymTable};

/// Anything the engine can match on
pub trait Named {
    fn name(&self) -> &str;
}

impl Named for String {
    fn name(&self) -> &str {
        self
    }
}

impl Named for &str {
    fn name(&self) -> &str {
        self
    }
}

/// The tier that produced a match, most specific first
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MatchTier {
    Exact,
    Suffix,
    Prefix,
    Substring,
    PartialToken,
    Synonym,
}

impl MatchTier {
    /// All tiers in evaluation order
    pub const ALL: [MatchTier; 6] = [
        MatchTier::Exact,
        MatchTier::Suffix,
        MatchTier::Prefix,
        MatchTier::Substring,
        MatchTier::PartialToken,
        MatchTier::Synonym,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            MatchTier::Exact => "exact",
            MatchTier::Suffix => "suffix",
            MatchTier::Prefix => "prefix",
            MatchTier::Substring => "substring",
            MatchTier::PartialToken => "partial-token",
            MatchTier::Synonym => "synonym",
        }
    }
}

impl fmt::Display for MatchTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A resolved entry and how it was found
#[derive(Debug)]
pub struct MatchResult<'a, T> {
    pub item: &'a T,
    pub tier: MatchTier,
    /// Position of `item` in the candidate list
    pub index: usize,
}

// Derived Clone/Copy would require T: Clone
impl<T> Clone for MatchResult<'_, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for MatchResult<'_, T> {}

/// Tiered matcher over registry entries
#[derive(Debug, Clone)]
pub struct MatchEngine {
    synonyms: SynonymTable,
    /// Tokens at or below this length are ignored by the partial-token tier
    min_token_len: usize,
}

impl MatchEngine {
    /// Engine with the default synonym table
    pub fn new() -> Self {
        Self {
            synonyms: default_synonyms(),
            min_token_len: 2,
        }
    }

    /// Replace the synonym table
    pub fn with_synonyms(mut self, synonyms: SynonymTable) -> Self {
        self.synonyms = synonyms;
        self
    }

    /// Resolve `key` to the best entry, or `None`
    pub fn resolve<'a, T: Named>(&self, key: &str, items: &'a [T]) -> Option<&'a T> {
        self.resolve_with_tier(key, items).map(|m| m.item)
    }

    /// Resolve `key` and report the tier that matched
    pub fn resolve_with_tier<'a, T: Named>(
        &self,
        key: &str,
        items: &'a [T],
    ) -> Option<MatchResult<'a, T>> {
        if items.is_empty() {
            return None;
        }

        let key = key.to_lowercase();
        let names: Vec<String> = items.iter().map(|i| i.name().to_lowercase()).collect();

        for tier in MatchTier::ALL {
            // Every string ends with and contains "", so an empty side only
            // ever matches exactly.
            if tier != MatchTier::Exact && key.is_empty() {
                break;
            }

            let found = names.iter().position(|name| {
                (tier == MatchTier::Exact || !name.is_empty()) && self.matches(tier, &key, name)
            });

            if let Some(index) = found {
                tracing::trace!("'{}' matched '{}' at tier {}", key, names[index], tier);
                return Some(MatchResult {
                    item: &items[index],
                    tier,
                    index,
                });
            }
        }

        None
    }

    /// Whether a lowercase `key` matches a lowercase `name` at `tier`
    pub fn matches(&self, tier: MatchTier, key: &str, name: &str) -> bool {
        match tier {
            MatchTier::Exact => name == key,
            // ends_with(key) also covers ends_with("-{key}")
            MatchTier::Suffix => name.ends_with(key),
            MatchTier::Prefix => key.ends_with(name),
            MatchTier::Substring => name.contains(key) || key.contains(name),
            MatchTier::PartialToken => self.partial_token_match(key, name),
            MatchTier::Synonym => self.synonyms.matches(key, name),
        }
    }

    /// Multi-token keys need two shared tokens; single-token keys need one
    fn partial_token_match(&self, key: &str, name: &str) -> bool {
        let key_tokens = self.tokens(key);
        if key_tokens.is_empty() {
            return false;
        }
        let name_tokens = self.tokens(name);

        let common = key_tokens
            .iter()
            .filter(|k| {
                name_tokens
                    .iter()
                    .any(|n| n.contains(*k) || k.contains(*n))
            })
            .count();

        common > 0 && common >= key_tokens.len().min(2)
    }

    fn tokens<'s>(&self, s: &'s str) -> Vec<&'s str> {
        s.split('-')
            .filter(|t| t.chars().count() > self.min_token_len)
            .collect()
    }
}

impl Default for MatchEngine {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(list: &[&'static str]) -> Vec<&'static str> {
        list.to_vec()
    }

    fn tier_of(key: &str, list: &[&'static str]) -> Option<(MatchTier, &'static str)> {
        let items = names(list);
        MatchEngine::new()
            .resolve_with_tier(key, &items)
            .map(|m| (m.tier, *m.item))
    }

    #[test]
    fn test_every_name_resolves_to_itself() {
        let items = names(&[
            "sign-in",
            "clerk-sign-in",
            "sign-in-form",
            "theme-switcher",
            "theme-switcher-dropdown",
        ]);
        let engine = MatchEngine::new();
        for (i, name) in items.iter().enumerate() {
            let m = engine.resolve_with_tier(name, &items).unwrap();
            assert_eq!(m.index, i);
            assert_eq!(m.tier, MatchTier::Exact);
        }
    }

    #[test]
    fn test_empty_list() {
        let items: Vec<&str> = vec![];
        assert!(MatchEngine::new().resolve("sign-in", &items).is_none());
        assert!(MatchEngine::new().resolve("", &items).is_none());
    }

    #[test]
    fn test_exact_beats_suffix() {
        assert_eq!(
            tier_of("sign-in", &["clerk-sign-in", "sign-in"]),
            Some((MatchTier::Exact, "sign-in"))
        );
    }

    #[test]
    fn test_suffix_fallback() {
        assert_eq!(
            tier_of("sign-in", &["clerk-sign-in"]),
            Some((MatchTier::Suffix, "clerk-sign-in"))
        );
    }

    #[test]
    fn test_prefix_tier() {
        assert_eq!(
            tier_of("clerk-sign-in", &["waitlist", "sign-in"]),
            Some((MatchTier::Prefix, "sign-in"))
        );
    }

    #[test]
    fn test_substring_tier() {
        assert_eq!(
            tier_of("sign", &["waitlist", "clerk-sign-in"]),
            Some((MatchTier::Substring, "clerk-sign-in"))
        );
    }

    #[test]
    fn test_partial_token_tier() {
        // "polar" and "sponsor" both appear as tokens of the candidate
        assert_eq!(
            tier_of("polar-sponsor-card", &["waitlist", "polar-sponsorship-tiers"]),
            Some((MatchTier::PartialToken, "polar-sponsorship-tiers"))
        );
        // one shared token is not enough for a multi-token key
        assert_eq!(tier_of("polar-checkout-card", &["polar-sponsorship"]), None);
        // single-token keys need just one, short tokens are ignored
        assert_eq!(
            tier_of("up", &["sign-up-form"]),
            Some((MatchTier::Substring, "sign-up-form"))
        );
        assert_eq!(tier_of("xx-up", &["sign-up-form"]), None);
    }

    #[test]
    fn test_synonym_fallback() {
        assert_eq!(
            tier_of("switcher", &["theme-toggle"]),
            Some((MatchTier::Synonym, "theme-toggle"))
        );
        assert_eq!(
            tier_of("btn", &["waitlist", "copy-button"]),
            Some((MatchTier::Synonym, "copy-button"))
        );
    }

    #[test]
    fn test_case_insensitive() {
        assert_eq!(
            tier_of("Sign-In", &["Clerk-Sign-In"]),
            Some((MatchTier::Suffix, "Clerk-Sign-In"))
        );
    }

    #[test]
    fn test_first_in_list_order_wins_within_tier() {
        assert_eq!(
            tier_of("sign-in", &["clerk-sign-in", "supabase-sign-in"]),
            Some((MatchTier::Suffix, "clerk-sign-in"))
        );
    }

    #[test]
    fn test_empty_key_and_empty_names() {
        assert_eq!(tier_of("", &["sign-in"]), None);
        assert_eq!(tier_of("", &["", "sign-in"]), Some((MatchTier::Exact, "")));
        assert_eq!(tier_of("sign-in", &["", "waitlist"]), None);
    }

    #[test]
    fn test_no_match() {
        assert_eq!(tier_of("checkout", &["sign-in", "waitlist"]), None);
    }

    #[test]
    fn test_custom_synonyms() {
        let engine =
            MatchEngine::new().with_synonyms(SynonymTable::new().group(&["login", "sign-in"]));
        let items = names(&["clerk-sign-in"]);
        let m = engine.resolve_with_tier("login", &items).unwrap();
        assert_eq!(m.tier, MatchTier::Synonym);
    }

    #[test]
    fn test_tier_serialization() {
        assert_eq!(
            serde_json::to_string(&MatchTier::PartialToken).unwrap(),
            "\"partial-token\""
        );
        assert_eq!(MatchTier::Synonym.to_string(), "synonym");
    }
}

//! Synonym table for the last-resort matching tier

use std::collections::HashMap;

/// Token → synonyms lookup.
///
/// Groups added with [`SynonymTable::group`] are fully connected; groups added
/// with [`SynonymTable::hub`] only link the hub with each spoke, so `select`
/// and `menu` are both synonyms of `dropdown` without being synonyms of each
/// other.
#[derive(Debug, Clone, Default)]
pub struct SynonymTable {
    entries: HashMap<String, Vec<String>>,
}

impl SynonymTable {
    /// An empty table
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every word a synonym of every other word
    pub fn group(mut self, words: &[&str]) -> Self {
        for a in words {
            for b in words {
                if a != b {
                    self.link(a, b);
                }
            }
        }
        self
    }

    /// Link `hub` with each spoke in both directions
    pub fn hub(mut self, hub: &str, spokes: &[&str]) -> Self {
        for spoke in spokes {
            self.link(hub, spoke);
            self.link(spoke, hub);
        }
        self
    }

    /// Synonyms for a lowercase token
    pub fn synonyms(&self, token: &str) -> &[String] {
        self.entries.get(token).map(Vec::as_slice).unwrap_or(&[])
    }

    /// True if any `-`-separated token of `key` has a synonym inside `name`
    pub fn matches(&self, key: &str, name: &str) -> bool {
        key.split('-')
            .filter(|token| !token.is_empty())
            .any(|token| self.synonyms(token).iter().any(|s| name.contains(s.as_str())))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn link(&mut self, from: &str, to: &str) {
        let list = self.entries.entry(from.to_lowercase()).or_default();
        let to = to.to_lowercase();
        if !list.contains(&to) {
            list.push(to);
        }
    }
}

/// The table used by the default match engine
pub fn default_synonyms() -> SynonymTable {
    SynonymTable::new()
        .group(&["switch", "switcher", "toggle"])
        .group(&["button", "btn"])
        .hub("dropdown", &["select", "menu"])
        .hub("theme", &["dark", "light", "mode"])
}

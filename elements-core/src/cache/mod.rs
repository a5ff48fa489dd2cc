//! Caching layer
//!
//! - [`TreeCache`]: built trees, keyed by a hash of the builder input
//!
//! Flattened views are derived on read and never cached.

mod tree_cache;

pub use tree_cache::{tree_key, TreeCache, TreeCacheConfig};

use serde::Serialize;

/// Default capacity of the tree cache
pub const DEFAULT_MAX_TREES: usize = 256;

/// Cache statistics
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CacheStats {
    /// Current number of entries
    pub entries: usize,
    /// Maximum entries allowed
    pub max_entries: usize,
    pub hits: u64,
    pub misses: u64,
    /// Hit rate (0.0 - 1.0)
    pub hit_rate: f64,
    /// Total evictions
    pub evictions: u64,
}

impl CacheStats {
    pub fn new(entries: usize, max_entries: usize, hits: u64, misses: u64, evictions: u64) -> Self {
        Self {
            entries,
            max_entries,
            hits,
            misses,
            hit_rate: if hits + misses > 0 {
                hits as f64 / (hits + misses) as f64
            } else {
                0.0
            },
            evictions,
        }
    }
}

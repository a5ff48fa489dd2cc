//! Built-tree cache
//!
//! A tree is a pure function of its inputs, so entries never expire; they are
//! keyed by a SHA-256 of everything the builder reads. A changed input hashes
//! differently and is built fresh.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, RwLock};
use std::time::Instant;

use sha2::{Digest, Sha256};

use super::{CacheStats, DEFAULT_MAX_TREES};
use crate::error::{ElementsError, Result};
use crate::registry::{RegistryFile, RegistryItem};
use crate::tree::{FileTree, TreeBuilder};

/// Configuration for the tree cache
#[derive(Debug, Clone)]
pub struct TreeCacheConfig {
    /// Maximum number of entries
    pub max_entries: usize,
}

impl Default for TreeCacheConfig {
    fn default() -> Self {
        Self {
            max_entries: DEFAULT_MAX_TREES,
        }
    }
}

impl TreeCacheConfig {
    pub fn with_max_entries(mut self, max: usize) -> Self {
        self.max_entries = max;
        self
    }
}

#[derive(Debug, Clone)]
struct CachedTree {
    tree: Arc<FileTree>,
    cached_at: Instant,
}

/// Cache key for a builder input
pub fn tree_key(files: &[RegistryFile], deps: &[String], registry_deps: &[String]) -> String {
    let mut hasher = Sha256::new();

    // Field and section separators keep ["ab"] and ["a", "b"] apart
    for file in files {
        hasher.update(file.path.as_bytes());
        hasher.update(b"\x1f");
        hasher.update(file.file_type.as_bytes());
        hasher.update(b"\x1f");
        hasher.update(file.target.as_bytes());
        hasher.update(b"\x1e");
    }
    hasher.update(b"\x1d");
    for dep in deps {
        hasher.update(dep.as_bytes());
        hasher.update(b"\x1e");
    }
    hasher.update(b"\x1d");
    for dep in registry_deps {
        hasher.update(dep.as_bytes());
        hasher.update(b"\x1e");
    }

    hex::encode(hasher.finalize())
}

/// Memoizes built trees by input hash
#[derive(Debug)]
pub struct TreeCache {
    entries: RwLock<HashMap<String, CachedTree>>,
    config: TreeCacheConfig,
    hits: AtomicU64,
    misses: AtomicU64,
    evictions: AtomicU64,
}

impl TreeCache {
    pub fn new() -> Self {
        Self::with_config(TreeCacheConfig::default())
    }

    pub fn with_config(config: TreeCacheConfig) -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
            config,
            hits: AtomicU64::new(0),
            misses: AtomicU64::new(0),
            evictions: AtomicU64::new(0),
        }
    }

    /// Look up a tree by key
    pub fn get(&self, key: &str) -> Result<Option<Arc<FileTree>>> {
        let entries = self.entries.read().map_err(|_| ElementsError::CacheLocked)?;

        match entries.get(key) {
            Some(entry) => {
                self.hits.fetch_add(1, Ordering::Relaxed);
                Ok(Some(Arc::clone(&entry.tree)))
            }
            None => {
                self.misses.fetch_add(1, Ordering::Relaxed);
                Ok(None)
            }
        }
    }

    /// Return the cached tree for this input, building it on a miss
    pub fn get_or_build(
        &self,
        files: &[RegistryFile],
        deps: &[String],
        registry_deps: &[String],
    ) -> Result<Arc<FileTree>> {
        let key = tree_key(files, deps, registry_deps);
        if let Some(tree) = self.get(&key)? {
            return Ok(tree);
        }

        let tree = Arc::new(
            TreeBuilder::new()
                .files(files)
                .dependencies(deps)
                .registry_dependencies(registry_deps)
                .build(),
        );

        let mut entries = self.entries.write().map_err(|_| ElementsError::CacheLocked)?;
        if entries.len() >= self.config.max_entries && !entries.contains_key(&key) {
            self.evict_oldest(&mut entries);
        }
        entries.insert(
            key,
            CachedTree {
                tree: Arc::clone(&tree),
                cached_at: Instant::now(),
            },
        );

        Ok(tree)
    }

    /// Tree for a registry item
    pub fn get_or_build_item(&self, item: &RegistryItem) -> Result<Arc<FileTree>> {
        self.get_or_build(&item.files, &item.dependencies, &item.registry_dependencies)
    }

    pub fn invalidate(&self, key: &str) -> Result<()> {
        self.entries
            .write()
            .map_err(|_| ElementsError::CacheLocked)?
            .remove(key);
        Ok(())
    }

    pub fn clear(&self) -> Result<()> {
        self.entries
            .write()
            .map_err(|_| ElementsError::CacheLocked)?
            .clear();
        Ok(())
    }

    fn evict_oldest(&self, entries: &mut HashMap<String, CachedTree>) {
        if let Some(oldest_key) = entries
            .iter()
            .min_by_key(|(_, v)| v.cached_at)
            .map(|(k, _)| k.clone())
        {
            entries.remove(&oldest_key);
            self.evictions.fetch_add(1, Ordering::Relaxed);
        }
    }

    pub fn stats(&self) -> CacheStats {
        let entries = self.len();
        CacheStats::new(
            entries,
            self.config.max_entries,
            self.hits.load(Ordering::Relaxed),
            self.misses.load(Ordering::Relaxed),
            self.evictions.load(Ordering::Relaxed),
        )
    }

    /// Number of entries (0 if the lock is poisoned)
    pub fn len(&self) -> usize {
        self.entries.read().map(|e| e.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for TreeCache {
    fn default() -> Self {
        Self::new()
    }
}

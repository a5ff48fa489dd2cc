//! Manifest cache for avoiding redundant fetches

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use chrono::{DateTime, TimeDelta, Utc};
use elements_core::{CacheStats, ItemManifest};
use tokio::sync::RwLock;

use crate::config::CacheConfig;

/// A cached manifest
#[derive(Debug, Clone)]
pub struct CachedManifest {
    pub manifest: Arc<ItemManifest>,
    pub fetched_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

impl CachedManifest {
    pub fn is_expired(&self) -> bool {
        Utc::now() > self.expires_at
    }
}

/// TTL cache of fetched manifests
pub struct ManifestCache {
    config: CacheConfig,
    entries: RwLock<HashMap<String, CachedManifest>>,
    hits: AtomicU64,
    misses: AtomicU64,
    evictions: AtomicU64,
}

impl ManifestCache {
    pub fn new(config: CacheConfig) -> Self {
        Self {
            config,
            entries: RwLock::new(HashMap::new()),
            hits: AtomicU64::new(0),
            misses: AtomicU64::new(0),
            evictions: AtomicU64::new(0),
        }
    }

    /// Fresh manifest for an item, if cached
    pub async fn get(&self, name: &str) -> Option<Arc<ItemManifest>> {
        if !self.config.enabled {
            self.misses.fetch_add(1, Ordering::SeqCst);
            return None;
        }

        let entries = self.entries.read().await;
        if let Some(entry) = entries.get(name) {
            if !entry.is_expired() {
                self.hits.fetch_add(1, Ordering::SeqCst);
                return Some(Arc::clone(&entry.manifest));
            }
        }

        self.misses.fetch_add(1, Ordering::SeqCst);
        None
    }

    /// Store a manifest under its item name, returning the shared handle
    pub async fn insert(&self, name: &str, manifest: ItemManifest) -> Arc<ItemManifest> {
        let manifest = Arc::new(manifest);
        if !self.config.enabled {
            return manifest;
        }

        let now = Utc::now();
        let expires_at = self.expiry(now);
        let mut entries = self.entries.write().await;

        if entries.len() >= self.config.max_entries && !entries.contains_key(name) {
            if let Some(oldest) = entries
                .iter()
                .min_by_key(|(_, v)| v.fetched_at)
                .map(|(k, _)| k.clone())
            {
                entries.remove(&oldest);
                self.evictions.fetch_add(1, Ordering::SeqCst);
            }
        }

        entries.insert(
            name.to_string(),
            CachedManifest {
                manifest: Arc::clone(&manifest),
                fetched_at: now,
                expires_at,
            },
        );
        manifest
    }

    /// A TTL too large to represent never expires
    fn expiry(&self, now: DateTime<Utc>) -> DateTime<Utc> {
        i64::try_from(self.config.ttl_seconds)
            .ok()
            .and_then(TimeDelta::try_seconds)
            .and_then(|ttl| now.checked_add_signed(ttl))
            .unwrap_or(DateTime::<Utc>::MAX_UTC)
    }

    pub async fn invalidate(&self, name: &str) {
        self.entries.write().await.remove(name);
    }

    pub async fn clear(&self) {
        self.entries.write().await.clear();
    }

    pub async fn stats(&self) -> CacheStats {
        CacheStats::new(
            self.entries.read().await.len(),
            self.config.max_entries,
            self.hits.load(Ordering::SeqCst),
            self.misses.load(Ordering::SeqCst),
            self.evictions.load(Ordering::SeqCst),
        )
    }

    /// Remove expired entries
    pub async fn evict_expired(&self) {
        let mut entries = self.entries.write().await;
        let now = Utc::now();

        let before = entries.len();
        entries.retain(|_, v| v.expires_at >= now);
        let removed = (before - entries.len()) as u64;
        self.evictions.fetch_add(removed, Ordering::SeqCst);
    }
}

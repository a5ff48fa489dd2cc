//! Content loading for the viewer
//!
//! A tree leaf selection becomes a [`FileRequest`]; the loader fetches the
//! item manifest (through the cache) and picks the matching file. Any fetch
//! failure degrades to a placeholder body.

use std::sync::Arc;

use elements_core::registry::normalize_item_name;
use elements_core::{resolve_content, CacheStats, FileContent, FileRequest, ItemManifest};

use crate::cache::ManifestCache;
use crate::config::{CacheConfig, ClientConfig};
use crate::error::ClientResult;
use crate::source::{HttpManifestSource, ManifestSource};

/// Loads file content for registry items
pub struct ContentLoader<S: ManifestSource> {
    source: S,
    cache: ManifestCache,
}

impl ContentLoader<HttpManifestSource> {
    /// Loader fetching from a registry server
    pub fn http(config: &ClientConfig) -> ClientResult<Self> {
        Ok(Self::new(HttpManifestSource::new(config)?, config.cache.clone()))
    }
}

impl<S: ManifestSource> ContentLoader<S> {
    pub fn new(source: S, cache: CacheConfig) -> Self {
        Self {
            source,
            cache: ManifestCache::new(cache),
        }
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    /// Manifest for an item, served from cache while fresh
    pub async fn manifest(&self, item: &str) -> ClientResult<Arc<ItemManifest>> {
        let name = normalize_item_name(item);
        if let Some(manifest) = self.cache.get(name).await {
            return Ok(manifest);
        }

        let manifest = self.source.fetch(name).await?;
        tracing::debug!("Fetched manifest '{}' from {} source", name, self.source.name());
        Ok(self.cache.insert(name, manifest).await)
    }

    /// Content of one file; never fails
    pub async fn load(&self, item: &str, request: &FileRequest) -> FileContent {
        match self.manifest(item).await {
            Ok(manifest) => resolve_content(item, request, Some(&*manifest)),
            Err(e) => {
                tracing::warn!("Failed to load manifest for '{}': {}", item, e);
                resolve_content(item, request, None)
            }
        }
    }

    /// Drop a cached manifest so the next load refetches it
    pub async fn refresh(&self, item: &str) {
        self.cache.invalidate(normalize_item_name(item)).await;
    }

    pub async fn cache_stats(&self) -> CacheStats {
        self.cache.stats().await
    }
}

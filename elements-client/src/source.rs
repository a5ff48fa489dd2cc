//! Manifest sources
//!
//! A source answers "give me the manifest for item X". The HTTP source talks
//! to a registry server; the static source serves manifests held in memory.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use elements_core::registry::{normalize_item_name, MANIFEST_DIR};
use elements_core::ItemManifest;

use crate::config::ClientConfig;
use crate::error::{ClientError, ClientResult};

/// Manifest source interface
#[async_trait]
pub trait ManifestSource: Send + Sync {
    /// Source name, for logging
    fn name(&self) -> &str;

    /// Fetch the manifest of one item
    async fn fetch(&self, item: &str) -> ClientResult<ItemManifest>;
}

/// Fetches `GET {base_url}/r/{name}.json`
pub struct HttpManifestSource {
    client: reqwest::Client,
    base_url: String,
}

impl HttpManifestSource {
    pub fn new(config: &ClientConfig) -> ClientResult<Self> {
        config.validate()?;

        let client = reqwest::Client::builder()
            .timeout(Duration::from_millis(config.timeout_ms))
            .user_agent(config.user_agent.clone())
            .build()?;

        Ok(Self {
            client,
            base_url: config.base_url.trim().trim_end_matches('/').to_string(),
        })
    }

    pub fn manifest_url(&self, item: &str) -> String {
        format!(
            "{}/{}/{}.json",
            self.base_url,
            MANIFEST_DIR,
            normalize_item_name(item)
        )
    }
}

#[async_trait]
impl ManifestSource for HttpManifestSource {
    fn name(&self) -> &str {
        "http"
    }

    async fn fetch(&self, item: &str) -> ClientResult<ItemManifest> {
        let url = self.manifest_url(item);
        tracing::debug!("Fetching manifest {}", url);

        let response = self.client.get(&url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(ClientError::Status {
                name: normalize_item_name(item).to_string(),
                status: status.as_u16(),
            });
        }

        let body = response.text().await?;
        Ok(serde_json::from_str(&body)?)
    }
}

/// Serves manifests from memory
#[derive(Default)]
pub struct StaticManifestSource {
    manifests: HashMap<String, ItemManifest>,
    fetches: AtomicUsize,
}

impl StaticManifestSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_manifest(mut self, manifest: ItemManifest) -> Self {
        self.insert(manifest);
        self
    }

    pub fn insert(&mut self, manifest: ItemManifest) {
        self.manifests.insert(manifest.name.clone(), manifest);
    }

    /// Number of `fetch` calls served so far, found or not
    pub fn fetch_count(&self) -> usize {
        self.fetches.load(Ordering::SeqCst)
    }
}

impl From<HashMap<String, ItemManifest>> for StaticManifestSource {
    fn from(manifests: HashMap<String, ItemManifest>) -> Self {
        Self {
            manifests,
            fetches: AtomicUsize::new(0),
        }
    }
}

#[async_trait]
impl ManifestSource for StaticManifestSource {
    fn name(&self) -> &str {
        "static"
    }

    async fn fetch(&self, item: &str) -> ClientResult<ItemManifest> {
        self.fetches.fetch_add(1, Ordering::SeqCst);
        let name = normalize_item_name(item);
        self.manifests
            .get(name)
            .cloned()
            .ok_or_else(|| ClientError::NotFound(name.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_manifest_url() {
        let source = HttpManifestSource::new(&ClientConfig::new("https://elements.dev/")).unwrap();
        assert_eq!(
            source.manifest_url("clerk-sign-in"),
            "https://elements.dev/r/clerk-sign-in.json"
        );
        assert_eq!(
            source.manifest_url("@elements/logos"),
            "https://elements.dev/r/logos.json"
        );
    }

    #[test]
    fn test_invalid_config_rejected() {
        assert!(matches!(
            HttpManifestSource::new(&ClientConfig::new("")),
            Err(ClientError::Config(_))
        ));
    }

    #[tokio::test]
    async fn test_static_source() {
        let manifest: ItemManifest =
            serde_json::from_str(r#"{"name": "logos", "files": []}"#).unwrap();
        let source = StaticManifestSource::new().with_manifest(manifest);

        assert_eq!(source.fetch("@elements/logos").await.unwrap().name, "logos");
        assert!(matches!(
            source.fetch("missing").await,
            Err(ClientError::NotFound(name)) if name == "missing"
        ));
        assert_eq!(source.fetch_count(), 2);
    }
}

//! Configuration for the manifest client

use serde::{Deserialize, Serialize};

use crate::error::{ClientError, ClientResult};

/// Main client configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Registry base URL; manifests live at `{base_url}/r/{name}.json`
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Request timeout in milliseconds
    #[serde(default = "default_timeout")]
    pub timeout_ms: u64,

    /// User-Agent header sent with every request
    #[serde(default = "default_user_agent")]
    pub user_agent: String,

    /// Manifest cache configuration
    #[serde(default)]
    pub cache: CacheConfig,
}

fn default_true() -> bool { true }
fn default_base_url() -> String { "http://localhost:8420".to_string() }
fn default_timeout() -> u64 { 10_000 }
fn default_user_agent() -> String { format!("elements-client/{}", env!("CARGO_PKG_VERSION")) }

impl ClientConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Self::default()
        }
    }

    /// Reject configurations that can never produce a request
    pub fn validate(&self) -> ClientResult<()> {
        let base = self.base_url.trim();
        if base.is_empty() {
            return Err(ClientError::Config("base_url is empty".to_string()));
        }
        if !base.starts_with("http://") && !base.starts_with("https://") {
            return Err(ClientError::Config(format!(
                "base_url must be http(s), got '{}'",
                base
            )));
        }
        if self.timeout_ms == 0 {
            return Err(ClientError::Config("timeout_ms must be positive".to_string()));
        }
        Ok(())
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_ms: default_timeout(),
            user_agent: default_user_agent(),
            cache: CacheConfig::default(),
        }
    }
}

/// Cache configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheConfig {
    /// Whether caching is enabled
    #[serde(default = "default_true")]
    pub enabled: bool,

    /// Time a fetched manifest stays fresh, in seconds
    #[serde(default = "default_ttl")]
    pub ttl_seconds: u64,

    /// Maximum cache entries
    #[serde(default = "default_max_entries")]
    pub max_entries: usize,
}

fn default_ttl() -> u64 { 300 }
fn default_max_entries() -> usize { 256 }

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            ttl_seconds: default_ttl(),
            max_entries: default_max_entries(),
        }
    }
}

//! Server configuration

use std::path::PathBuf;

/// Default listen port
pub const DEFAULT_PORT: u16 = 8420;

/// Server configuration
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Port to listen on
    pub port: u16,
    /// Enable CORS
    pub cors_enabled: bool,
    /// Directory holding `registry.json` and/or `r/*.json`
    pub registry_dir: Option<PathBuf>,
}

impl ServerConfig {
    /// Create a new configuration builder
    pub fn builder() -> ServerConfigBuilder {
        ServerConfigBuilder::default()
    }

    /// Read `ELEMENTS_PORT` and `ELEMENTS_REGISTRY_DIR`, falling back to defaults
    pub fn from_env() -> Self {
        let mut builder = Self::builder();

        if let Ok(port) = std::env::var("ELEMENTS_PORT") {
            match port.parse() {
                Ok(port) => builder = builder.port(port),
                Err(_) => tracing::warn!("Ignoring invalid ELEMENTS_PORT={:?}", port),
            }
        }
        if let Some(dir) = std::env::var_os("ELEMENTS_REGISTRY_DIR") {
            builder = builder.registry_dir(PathBuf::from(dir));
        }

        builder.build()
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            cors_enabled: true,
            registry_dir: None,
        }
    }
}

/// Builder for ServerConfig
#[derive(Debug, Default)]
pub struct ServerConfigBuilder {
    port: Option<u16>,
    cors_enabled: Option<bool>,
    registry_dir: Option<PathBuf>,
}

impl ServerConfigBuilder {
    /// Set the port
    pub fn port(mut self, port: u16) -> Self {
        self.port = Some(port);
        self
    }

    /// Enable or disable CORS
    pub fn cors(mut self, enabled: bool) -> Self {
        self.cors_enabled = Some(enabled);
        self
    }

    /// Serve the registry found in this directory
    pub fn registry_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.registry_dir = Some(dir.into());
        self
    }

    /// Build the configuration
    pub fn build(self) -> ServerConfig {
        ServerConfig {
            port: self.port.unwrap_or(DEFAULT_PORT),
            cors_enabled: self.cors_enabled.unwrap_or(true),
            registry_dir: self.registry_dir,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_defaults() {
        let config = ServerConfig::builder().build();
        assert_eq!(config.port, 8420);
        assert!(config.cors_enabled);
        assert!(config.registry_dir.is_none());
    }

    #[test]
    fn test_builder_overrides() {
        let config = ServerConfig::builder()
            .port(3000)
            .cors(false)
            .registry_dir("public")
            .build();
        assert_eq!(config.port, 3000);
        assert!(!config.cors_enabled);
        assert_eq!(config.registry_dir, Some(PathBuf::from("public")));
    }
}

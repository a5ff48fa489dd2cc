//! Elements Server Binary
//!
//! ## Usage
//!
//! ```bash
//! # Start with defaults (port 8420, empty registry)
//! elements-server
//!
//! # Custom port
//! ELEMENTS_PORT=3000 elements-server
//!
//! # Serve a registry directory (registry.json and r/*.json)
//! ELEMENTS_REGISTRY_DIR=./public elements-server
//! ```

use elements_server::{AppState, ElementsServer, ServerConfig};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "elements_server=info,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = ServerConfig::from_env();

    let state = match &config.registry_dir {
        Some(dir) if dir.exists() => AppState::from_directory(dir)?,
        Some(dir) => {
            tracing::warn!("Registry directory {:?} does not exist", dir);
            AppState::empty()
        }
        None => {
            tracing::warn!("ELEMENTS_REGISTRY_DIR not set, serving an empty registry");
            AppState::empty()
        }
    };
    tracing::info!("Serving {} item(s)", state.index.len());

    tracing::info!("Starting Elements Server v{}", env!("CARGO_PKG_VERSION"));

    let server = ElementsServer::new(state, config);
    server.run().await?;

    Ok(())
}

//! Elements Server - HTTP wrapper for Elements Core
//!
//! Serves a component registry the way the catalog consumes it:
//!
//! - `GET /r/{name}.json` returns an item manifest (what `shadcn add` fetches)
//! - `/v1/*` exposes the core operations (resolve, tree, install) as JSON
//!
//! ```text
//! ┌──────────────────────────────────────────────────────┐
//! │                   ElementsServer                      │
//! │  ┌────────────────────────────────────────────────┐  │
//! │  │  AppState: RegistryIndex + manifests + trees   │  │
//! │  └────────────────────────────────────────────────┘  │
//! │                         │                             │
//! │   ┌──────────┬──────────┼──────────┬──────────┐       │
//! │   ▼          ▼          ▼          ▼          ▼       │
//! │ /r/:file /v1/items /v1/resolve  …/tree   …/install   │
//! └──────────────────────────────────────────────────────┘
//! ```
//!
//! The server is a thin wrapper; matching and tree logic live in
//! `elements-core`.

mod config;
pub mod routes;

pub use config::{ServerConfig, ServerConfigBuilder, DEFAULT_PORT};

use std::collections::HashMap;
use std::net::SocketAddr;
use std::path::Path;
use std::sync::Arc;

use axum::Router;
use elements_core::registry::RegistryLoader;
use elements_core::{ItemManifest, RegistryIndex, TreeCache};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

/// Shared application state
///
/// The registry is immutable once loaded; only the tree cache mutates.
pub struct AppState {
    pub index: RegistryIndex,
    /// Item manifests keyed by canonical name
    pub manifests: HashMap<String, ItemManifest>,
    pub trees: TreeCache,
}

impl AppState {
    pub fn new(index: RegistryIndex, manifests: HashMap<String, ItemManifest>) -> Self {
        Self {
            index,
            manifests,
            trees: TreeCache::new(),
        }
    }

    /// Load `registry.json` and `r/*.json` from a directory
    pub fn from_directory(dir: &Path) -> elements_core::Result<Self> {
        let mut loader = RegistryLoader::new();
        let loaded = loader.load_from_directory(dir)?;
        tracing::info!("Loaded {} manifest(s) from {}", loaded.len(), dir.display());

        let (index, manifests) = loader.into_parts();
        Ok(Self::new(index, manifests))
    }

    /// A state with no items
    pub fn empty() -> Self {
        Self::new(RegistryIndex::new("", vec![]), HashMap::new())
    }
}

/// Elements HTTP Server
///
/// # Example
///
/// ```rust,ignore
/// use elements_server::{AppState, ElementsServer, ServerConfig};
///
/// #[tokio::main]
/// async fn main() {
///     let state = AppState::from_directory("public".as_ref()).unwrap();
///     let config = ServerConfig::builder().port(8420).build();
///
///     ElementsServer::new(state, config).run().await.unwrap();
/// }
/// ```
pub struct ElementsServer {
    state: Arc<AppState>,
    config: ServerConfig,
}

impl ElementsServer {
    pub fn new(state: AppState, config: ServerConfig) -> Self {
        Self {
            state: Arc::new(state),
            config,
        }
    }

    /// Build the Axum router with all routes and layers
    pub fn router(&self) -> Router {
        let router =
            routes::create_router(Arc::clone(&self.state)).layer(TraceLayer::new_for_http());

        if self.config.cors_enabled {
            router.layer(CorsLayer::permissive())
        } else {
            router
        }
    }

    /// Get the socket address for the server
    pub fn addr(&self) -> SocketAddr {
        SocketAddr::from(([0, 0, 0, 0], self.config.port))
    }

    pub fn state(&self) -> &Arc<AppState> {
        &self.state
    }

    /// Run the server
    pub async fn run(&self) -> Result<(), Box<dyn std::error::Error>> {
        let app = self.router();
        let addr = self.addr();

        tracing::info!("Elements Server listening on http://{}", addr);
        tracing::info!("Endpoints:");
        tracing::info!("  GET  /health");
        tracing::info!("  GET  /r/:name.json");
        tracing::info!("  GET  /v1/items");
        tracing::info!("  GET  /v1/resolve?key=");
        tracing::info!("  GET  /v1/items/:name/tree");
        tracing::info!("  GET  /v1/items/:name/install");

        let listener = tokio::net::TcpListener::bind(addr).await?;
        axum::serve(listener, app).await?;

        Ok(())
    }
}

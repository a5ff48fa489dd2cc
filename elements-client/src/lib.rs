//! Elements Client - manifest fetching and content loading
//!
//! The viewer shows the source of a registry file when a tree leaf is
//! selected. This crate does the async half of that:
//!
//! - [`ManifestSource`]: fetches `/r/{name}.json` ([`HttpManifestSource`]) or
//!   serves manifests from memory ([`StaticManifestSource`])
//! - [`ManifestCache`]: TTL cache so reselecting a file does not refetch
//! - [`ContentLoader`]: ties both to `elements-core`'s file resolver and falls
//!   back to a placeholder body on any failure
//!
//! ```text
//!   FileRequest ──► ContentLoader ──► ManifestCache ──miss──► ManifestSource
//!                         │                                        │
//!                         ▼                                        ▼
//!                   resolve_content ◄──────── ItemManifest ◄── /r/{name}.json
//!                         │
//!                         ▼
//!                    FileContent (manifest or placeholder)
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! use elements_client::{ClientConfig, ContentLoader};
//! use elements_core::FileRequest;
//!
//! let loader = ContentLoader::http(&ClientConfig::new("https://elements.dev"))?;
//! let content = loader
//!     .load("clerk-sign-in", &FileRequest::by_target("components/elements/clerk/sign-in.tsx"))
//!     .await;
//! println!("{}", content.content);
//! ```

pub mod cache;
pub mod config;
pub mod error;
pub mod loader;
pub mod source;

pub use cache::{CachedManifest, ManifestCache};
pub use config::{CacheConfig, ClientConfig};
pub use error::{ClientError, ClientResult};
pub use loader::ContentLoader;
pub use source::{HttpManifestSource, ManifestSource, StaticManifestSource};

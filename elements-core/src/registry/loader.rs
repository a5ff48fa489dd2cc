//! Registry Loader
//!
//! Loads registry documents from:
//! - JSON strings
//! - JSON files
//! - Directories laid out like a published registry:
//!
//! ```text
//! public/
//! ├── registry.json        # Index (optional)
//! └── r/
//!     ├── clerk-sign-in.json
//!     └── theme-switcher.json
//! ```

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{ElementsError, Result};

use super::manifest::{ItemManifest, RegistryIndex};
use super::validator::RegistryValidator;

/// File name of the registry index inside a registry directory
pub const INDEX_FILE: &str = "registry.json";

/// Sub-directory holding per-item manifests
pub const MANIFEST_DIR: &str = "r";

/// Loader for registry indexes and item manifests
pub struct RegistryLoader {
    /// The loaded index, if any
    index: Option<RegistryIndex>,

    /// Loaded item manifests by name
    manifests: HashMap<String, LoadedManifest>,

    /// Directories searched by `load_discovered`
    search_paths: Vec<PathBuf>,

    /// Whether to validate on load
    validate_on_load: bool,
}

/// An item manifest with its source information
#[derive(Debug, Clone)]
pub struct LoadedManifest {
    pub manifest: ItemManifest,

    /// Source path (if loaded from file)
    pub source_path: Option<PathBuf>,
}

impl RegistryLoader {
    pub fn new() -> Self {
        Self {
            index: None,
            manifests: HashMap::new(),
            search_paths: vec![],
            validate_on_load: true,
        }
    }

    /// Add a search path for registry discovery
    pub fn with_search_path(mut self, path: PathBuf) -> Self {
        self.search_paths.push(path);
        self
    }

    /// Disable validation on load
    pub fn skip_validation(mut self) -> Self {
        self.validate_on_load = false;
        self
    }

    /// Load a registry index from a JSON string, returning the registry name
    pub fn load_index_from_json(&mut self, json: &str) -> Result<String> {
        let index: RegistryIndex =
            serde_json::from_str(json).map_err(|e| ElementsError::InvalidManifest {
                reason: e.to_string(),
            })?;
        self.accept_index(index)
    }

    /// Load a registry index from a JSON file
    pub fn load_index_from_file<P: AsRef<Path>>(&mut self, path: P) -> Result<String> {
        let path = path.as_ref();
        let content = read_file(path)?;

        let index: RegistryIndex =
            serde_json::from_str(&content).map_err(|e| ElementsError::InvalidManifest {
                reason: format!("{}: {}", path.display(), e),
            })?;
        self.accept_index(index)
    }

    /// Load an item manifest from a JSON string, returning the item name
    pub fn load_manifest_from_json(&mut self, json: &str) -> Result<String> {
        let manifest: ItemManifest =
            serde_json::from_str(json).map_err(|e| ElementsError::InvalidManifest {
                reason: e.to_string(),
            })?;
        self.accept_manifest(manifest, None)
    }

    /// Load an item manifest from a JSON file
    pub fn load_manifest_from_file<P: AsRef<Path>>(&mut self, path: P) -> Result<String> {
        let path = path.as_ref();
        let content = read_file(path)?;

        let manifest: ItemManifest =
            serde_json::from_str(&content).map_err(|e| ElementsError::InvalidManifest {
                reason: format!("{}: {}", path.display(), e),
            })?;
        self.accept_manifest(manifest, Some(path.to_path_buf()))
    }

    /// Load a registry directory: `registry.json` if present, then every
    /// manifest under `r/` (or directly in the directory when there is no
    /// `r/`). Returns the names of the loaded manifests.
    pub fn load_from_directory<P: AsRef<Path>>(&mut self, path: P) -> Result<Vec<String>> {
        let path = path.as_ref();

        if !path.is_dir() {
            return Err(ElementsError::RegistryLoadError {
                path: path.display().to_string(),
                reason: "Not a directory".to_string(),
            });
        }

        let index_path = path.join(INDEX_FILE);
        if index_path.is_file() {
            self.load_index_from_file(&index_path)?;
        }

        // Published registries keep manifests under r/; flat directories of
        // manifests are accepted too
        let manifest_dir = match path.join(MANIFEST_DIR) {
            dir if dir.is_dir() => dir,
            _ => path.to_path_buf(),
        };
        let pattern = manifest_dir.join("*.json");
        let pattern = pattern.to_string_lossy();

        let entries = glob::glob(&pattern).map_err(|e| ElementsError::RegistryLoadError {
            path: manifest_dir.display().to_string(),
            reason: e.to_string(),
        })?;

        let mut loaded = Vec::new();
        for entry in entries {
            let file_path = entry.map_err(|e| ElementsError::RegistryLoadError {
                path: manifest_dir.display().to_string(),
                reason: e.to_string(),
            })?;
            // registry.json may also be published under r/
            if file_path.file_name().and_then(|n| n.to_str()) == Some(INDEX_FILE) {
                continue;
            }
            loaded.push(self.load_manifest_from_file(&file_path)?);
        }

        tracing::debug!(
            "Loaded {} manifest(s) from {}",
            loaded.len(),
            path.display()
        );

        Ok(loaded)
    }

    /// Load every configured search path
    pub fn load_discovered(&mut self) -> Result<Vec<String>> {
        let mut loaded = Vec::new();
        for path in self.search_paths.clone() {
            if !path.exists() {
                tracing::warn!("Registry path {:?} does not exist", path);
                continue;
            }
            loaded.extend(self.load_from_directory(&path)?);
        }
        Ok(loaded)
    }

    /// The loaded index, if one was present
    pub fn index(&self) -> Option<&RegistryIndex> {
        self.index.as_ref()
    }

    /// The loaded index, or one synthesized from the loaded manifests
    /// (sorted by name) when no `registry.json` was found
    pub fn index_or_synthesized(&self) -> RegistryIndex {
        if let Some(index) = &self.index {
            return index.clone();
        }

        let mut items: Vec<_> = self
            .manifests
            .values()
            .map(|m| m.manifest.to_item())
            .collect();
        items.sort_by(|a, b| a.name.cmp(&b.name));
        RegistryIndex::new("", items)
    }

    pub fn get(&self, name: &str) -> Option<&LoadedManifest> {
        self.manifests.get(name)
    }

    pub fn manifests(&self) -> impl Iterator<Item = &LoadedManifest> {
        self.manifests.values()
    }

    /// Consume the loader, returning the index and all manifests by name
    pub fn into_parts(self) -> (RegistryIndex, HashMap<String, ItemManifest>) {
        let index = self.index_or_synthesized();
        let manifests = self
            .manifests
            .into_iter()
            .map(|(name, loaded)| (name, loaded.manifest))
            .collect();
        (index, manifests)
    }

    fn accept_index(&mut self, index: RegistryIndex) -> Result<String> {
        if self.validate_on_load {
            let result = RegistryValidator::new().validate_index(&index);
            if !result.is_valid {
                return Err(ElementsError::InvalidManifest {
                    reason: result.error_messages().join("; "),
                });
            }
        }

        let name = index.name.clone();
        self.index = Some(index);
        Ok(name)
    }

    fn accept_manifest(
        &mut self,
        manifest: ItemManifest,
        source_path: Option<PathBuf>,
    ) -> Result<String> {
        if self.validate_on_load {
            let result = RegistryValidator::new().validate_manifest(&manifest);
            if !result.is_valid {
                return Err(ElementsError::InvalidManifest {
                    reason: result.error_messages().join("; "),
                });
            }
        }

        let name = manifest.name.clone();
        if self.manifests.contains_key(&name) {
            return Err(ElementsError::DuplicateItem { name });
        }

        self.manifests.insert(
            name.clone(),
            LoadedManifest {
                manifest,
                source_path,
            },
        );
        Ok(name)
    }
}

impl Default for RegistryLoader {
    fn default() -> Self {
        Self::new()
    }
}

fn read_file(path: &Path) -> Result<String> {
    fs::read_to_string(path).map_err(|e| ElementsError::RegistryLoadError {
        path: path.display().to_string(),
        reason: e.to_string(),
    })
}

//! Registry document types
//!
//! Field names follow the registry JSON format (`registryDependencies`,
//! `type`, ...), so documents served from `/r/{name}.json` and the top-level
//! `registry.json` deserialize directly.

use serde::{Deserialize, Serialize};

use super::NAMESPACE;
use crate::matching::{self, MatchResult, Named};

/// A file shipped by a registry item
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RegistryFile {
    /// Source location inside the registry
    pub path: String,

    /// File type tag (e.g., "registry:component", "registry:lib")
    #[serde(rename = "type")]
    pub file_type: String,

    /// Destination path inside the consumer project
    #[serde(default)]
    pub target: String,
}

impl RegistryFile {
    pub fn new(
        path: impl Into<String>,
        file_type: impl Into<String>,
        target: impl Into<String>,
    ) -> Self {
        Self {
            path: path.into(),
            file_type: file_type.into(),
            target: target.into(),
        }
    }

    /// Final segment of the target path
    pub fn file_name(&self) -> &str {
        basename(&self.target)
    }
}

/// A registry file together with its source text, as served by an item manifest
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegistryFileWithContent {
    #[serde(flatten)]
    pub file: RegistryFile,

    /// File body
    #[serde(default)]
    pub content: String,
}

impl RegistryFileWithContent {
    pub fn new(file: RegistryFile, content: impl Into<String>) -> Self {
        Self {
            file,
            content: content.into(),
        }
    }

    pub fn path(&self) -> &str {
        &self.file.path
    }

    pub fn target(&self) -> &str {
        &self.file.target
    }
}

/// An installable registry item as listed in `registry.json`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegistryItem {
    /// Canonical, unique item name (e.g., "clerk-sign-in")
    pub name: String,

    /// Item type tag (e.g., "registry:block")
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub item_type: Option<String>,

    /// Human-readable title
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    /// Short description
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Files installed by this item
    #[serde(default)]
    pub files: Vec<RegistryFile>,

    /// npm packages required by this item
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub dependencies: Vec<String>,

    /// Other registry items required by this item ("@elements/..." or plain)
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub registry_dependencies: Vec<String>,

    /// Catalog categories
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub categories: Vec<String>,
}

impl RegistryItem {
    /// Create an item with no dependencies
    pub fn new(name: impl Into<String>, files: Vec<RegistryFile>) -> Self {
        Self {
            name: name.into(),
            item_type: None,
            title: None,
            description: None,
            files,
            dependencies: vec![],
            registry_dependencies: vec![],
            categories: vec![],
        }
    }

    pub fn with_dependencies(mut self, deps: Vec<String>) -> Self {
        self.dependencies = deps;
        self
    }

    pub fn with_registry_dependencies(mut self, deps: Vec<String>) -> Self {
        self.registry_dependencies = deps;
        self
    }

    /// Registry dependency names with the namespace prefix removed
    pub fn registry_dependency_names(&self) -> Vec<&str> {
        self.registry_dependencies
            .iter()
            .map(|d| normalize_item_name(d))
            .collect()
    }
}

impl Named for RegistryItem {
    fn name(&self) -> &str {
        &self.name
    }
}

/// The payload of `GET /r/{name}.json`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemManifest {
    pub name: String,

    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub item_type: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Files with their content
    #[serde(default)]
    pub files: Vec<RegistryFileWithContent>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub dependencies: Vec<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub registry_dependencies: Vec<String>,
}

impl ItemManifest {
    /// Strip file contents, producing the index entry for this manifest
    pub fn to_item(&self) -> RegistryItem {
        RegistryItem {
            name: self.name.clone(),
            item_type: self.item_type.clone(),
            title: self.title.clone(),
            description: self.description.clone(),
            files: self.files.iter().map(|f| f.file.clone()).collect(),
            dependencies: self.dependencies.clone(),
            registry_dependencies: self.registry_dependencies.clone(),
            categories: vec![],
        }
    }
}

impl Named for ItemManifest {
    fn name(&self) -> &str {
        &self.name
    }
}

/// The top-level `registry.json` document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegistryIndex {
    /// Registry name (e.g., "elements")
    #[serde(default)]
    pub name: String,

    /// Registry homepage
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub homepage: Option<String>,

    /// All items in the registry
    #[serde(default)]
    pub items: Vec<RegistryItem>,
}

impl RegistryIndex {
    pub fn new(name: impl Into<String>, items: Vec<RegistryItem>) -> Self {
        Self {
            name: name.into(),
            homepage: None,
            items,
        }
    }

    /// Exact lookup by canonical name (namespace prefix accepted)
    pub fn get(&self, name: &str) -> Option<&RegistryItem> {
        let name = normalize_item_name(name);
        self.items.iter().find(|i| i.name == name)
    }

    /// Resolve a free-form key to the best-matching item
    pub fn resolve(&self, key: &str) -> Option<&RegistryItem> {
        matching::resolve(key, &self.items)
    }

    /// Resolve a free-form key and report which tier matched
    pub fn resolve_with_tier(&self, key: &str) -> Option<MatchResult<'_, RegistryItem>> {
        matching::resolve_with_tier(key, &self.items)
    }

    /// All canonical item names in registry order
    pub fn item_names(&self) -> Vec<&str> {
        self.items.iter().map(|i| i.name.as_str()).collect()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// Reduce a registry dependency reference to a plain item name.
///
/// Accepts `@elements/name`, plain `name`, and manifest URLs ending in
/// `/r/name.json`.
pub fn normalize_item_name(reference: &str) -> &str {
    let name = reference
        .strip_prefix(NAMESPACE)
        .and_then(|rest| rest.strip_prefix('/'))
        .unwrap_or(reference);

    if name.contains("://") || name.ends_with(".json") {
        let file = basename(name);
        return file.strip_suffix(".json").unwrap_or(file);
    }

    name
}

/// String after the last `/`
pub(crate) fn basename(path: &str) -> &str {
    path.rsplit('/').next().unwrap_or(path)
}

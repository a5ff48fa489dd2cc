//! Registry documents: what the catalog distributes
//!
//! A registry is published as:
//!
//! - `registry.json`: the index of installable items, each with its files
//!   and dependency lists
//! - `r/{name}.json`: one manifest per item, carrying file contents
//!
//! Both are plain JSON. This module provides the types, a loader for files
//! and directories, and a validator for the problems that would otherwise
//! surface as odd trees in the UI.

mod loader;
mod manifest;
mod validator;

pub use loader::{LoadedManifest, RegistryLoader, INDEX_FILE, MANIFEST_DIR};
pub use manifest::{
    normalize_item_name, ItemManifest, RegistryFile, RegistryFileWithContent, RegistryIndex,
    RegistryItem,
};
pub use validator::{RegistryValidator, ValidationIssue, ValidationResult};

pub(crate) use manifest::basename;

/// Namespace under which items are published (`@elements/<name>`)
pub const NAMESPACE: &str = "@elements";

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_index_roundtrip_preserves_unknown_types() {
        let index: RegistryIndex = serde_json::from_value(json!({
            "name": "elements",
            "homepage": "https://example.com",
            "items": [
                {
                    "name": "polar-sponsorship",
                    "type": "registry:block",
                    "categories": ["payments"],
                    "files": [
                        {
                            "path": "registry/polar/sponsorship.tsx",
                            "type": "registry:experimental",
                            "target": "components/elements/polar/sponsorship.tsx"
                        }
                    ]
                }
            ]
        }))
        .unwrap();

        let json = serde_json::to_value(&index).unwrap();
        assert_eq!(json["items"][0]["files"][0]["type"], "registry:experimental");
        assert_eq!(json["items"][0]["categories"][0], "payments");
        assert_eq!(json["homepage"], "https://example.com");
    }
}

//! # Elements Core - component registry resolution and file trees
//!
//! Elements is a catalog of ready-made UI blocks distributed through a
//! `shadcn`-style registry. This crate holds the logic behind the catalog:
//!
//! - **Registry**: `registry.json` and `/r/{name}.json` documents, a loader
//!   and a validator
//! - **Matching**: resolves a loose key ("sign-in") to a canonical item
//!   ("clerk-sign-in") through tiered fallbacks, and finds the manifest file a
//!   tree leaf refers to
//! - **Tree**: rebuilds a folder/file tree from flat target paths, merges
//!   dependency groups, and collapses single-child folder chains on read
//! - **Install**: `shadcn add` command strings per package manager
//!
//! Supporting pieces for the viewer (content placeholders, session state,
//! highlighting, auth-flow state) live alongside.
//!
//! ## Example
//!
//! ```rust
//! use elements_core::{RegistryIndex, FileTree, MatchTier, flatten};
//!
//! let index: RegistryIndex = serde_json::from_str(r#"{
//!     "name": "elements",
//!     "items": [
//!         {
//!             "name": "clerk-sign-in",
//!             "files": [{
//!                 "path": "registry/clerk/sign-in.tsx",
//!                 "type": "registry:component",
//!                 "target": "components/elements/clerk/sign-in.tsx"
//!             }],
//!             "dependencies": ["@clerk/nextjs"]
//!         }
//!     ]
//! }"#).unwrap();
//!
//! // "sign-in" is not an item name, but it is a suffix of one
//! let found = index.resolve_with_tier("sign-in").unwrap();
//! assert_eq!(found.item.name, "clerk-sign-in");
//! assert_eq!(found.tier, MatchTier::Suffix);
//!
//! // Build the tree and its flattened view
//! let tree = FileTree::from_item(found.item);
//! let view = flatten(&tree);
//! assert_eq!(view[0].name, "components/elements/clerk");
//! assert_eq!(view[1].name, "Dependencies");
//! ```

pub mod auth;
pub mod cache;
pub mod content;
pub mod error;
pub mod highlight;
pub mod install;
pub mod matching;
pub mod registry;
pub mod session;
pub mod tree;

// Re-export main types
pub use auth::{AuthFlow, SecondFactor, Verification, VerificationStrategy};
pub use cache::{CacheStats, TreeCache, TreeCacheConfig};
pub use content::{placeholder_content, resolve_content, ContentOrigin, FileContent};
pub use error::{ElementsError, ErrorCategory, ErrorDetail, ErrorResponse, Result};
pub use highlight::{highlighter, Highlighter};
pub use install::{InstallCommand, InstallCommands, PackageManager};
pub use matching::{
    find_best_file_match, resolve, resolve_with_tier, FileMatchKind, FileRequest, MatchEngine,
    MatchResult, MatchTier, Named, SynonymTable,
};
pub use registry::{
    ItemManifest, RegistryFile, RegistryFileWithContent, RegistryIndex, RegistryItem,
    RegistryLoader, RegistryValidator, ValidationResult,
};
pub use session::{CopyFeedback, SelectionTicket, ViewerSession};
pub use tree::{
    build_tree, display_children, display_name, flatten, render_tree, FileTree, FlatNode,
    NodeId, NodeKind, TreeBuilder, TreeNode,
};

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn create_test_index() -> RegistryIndex {
        serde_json::from_value(json!({
            "name": "elements",
            "homepage": "https://elements.example.com",
            "items": [
                {
                    "name": "clerk-sign-in",
                    "type": "registry:block",
                    "files": [
                        {
                            "path": "registry/clerk/sign-in.tsx",
                            "type": "registry:component",
                            "target": "components/elements/clerk/sign-in.tsx"
                        },
                        {
                            "path": "registry/clerk/lib/appearance.ts",
                            "type": "registry:lib",
                            "target": "components/elements/clerk/lib/appearance.ts"
                        }
                    ],
                    "dependencies": ["@clerk/nextjs"],
                    "registryDependencies": ["@elements/logos", "button"]
                },
                {
                    "name": "theme-switcher",
                    "files": [
                        {
                            "path": "registry/theme/switcher.tsx",
                            "type": "registry:ui",
                            "target": "components/elements/theme-switcher.tsx"
                        }
                    ]
                },
                {
                    "name": "logos",
                    "files": [
                        {
                            "path": "registry/logos/index.tsx",
                            "type": "registry:component",
                            "target": "components/elements/logos/index.tsx"
                        }
                    ]
                }
            ]
        }))
        .unwrap()
    }

    #[test]
    fn test_full_workflow() {
        let index = create_test_index();
        assert!(RegistryValidator::new().validate_index(&index).is_valid);

        // Resolve a display key
        let found = index.resolve_with_tier("sign-in").unwrap();
        assert_eq!(found.item.name, "clerk-sign-in");
        assert_eq!(found.tier, MatchTier::Suffix);

        // Build and flatten the tree
        let tree = FileTree::from_item(found.item);
        let view = flatten(&tree);
        let names: Vec<&str> = view.iter().map(|n| n.name.as_str()).collect();
        assert_eq!(
            names,
            vec!["components/elements/clerk", "Dependencies", "Registry Dependencies"]
        );

        let clerk = view[0].children.as_ref().unwrap();
        assert_eq!(clerk[0].name, "lib");
        assert_eq!(clerk[1].name, "sign-in.tsx");

        // Install command for the resolved item
        let commands = InstallCommands::for_item(&found.item.name);
        assert_eq!(
            commands.get(PackageManager::Pnpm),
            Some("pnpm dlx shadcn@latest add @elements/clerk-sign-in")
        );
    }

    #[test]
    fn test_synonym_resolution_in_registry() {
        let index = create_test_index();
        let found = index.resolve_with_tier("dark-mode-toggle").unwrap();
        assert_eq!(found.item.name, "theme-switcher");
    }

    #[test]
    fn test_viewer_flow_with_placeholder() {
        let index = create_test_index();
        let item = index.get("clerk-sign-in").unwrap();
        let tree = FileTree::from_item(item);

        let (leaf_id, leaf) = tree.files().next().unwrap();
        let request = FileRequest::from(leaf.registry_file.as_ref().unwrap());

        let mut session = ViewerSession::new();
        let ticket = session.select(leaf_id.clone());
        let content = resolve_content(&item.name, &request, None);
        assert!(session.apply_content(ticket, content));
        assert!(session.content().unwrap().is_placeholder());
    }
}

//! File trees for registry items
//!
//! - [`TreeBuilder`] / [`build_tree`]: flat targets → raw node map
//! - [`display_name`] / [`display_children`] / [`flatten`]: single-child folder
//!   chains shown as one segment, derived on read
//! - [`render_tree`]: text output of the flattened view
//!
//! ```
//! use elements_core::registry::RegistryFile;
//! use elements_core::tree::{build_tree, display_name};
//!
//! let files = vec![RegistryFile::new(
//!     "registry/ui/button.tsx",
//!     "registry:ui",
//!     "src/components/ui/button.tsx",
//! )];
//! let tree = build_tree(&files, None, None);
//! assert_eq!(display_name(&tree, "src").as_deref(), Some("src/components/ui"));
//! ```

mod builder;
mod flatten;
mod render;

pub use builder::{
    build_tree, FileTree, NodeId, NodeKind, TreeBuilder, TreeNode, DEPENDENCIES_ID,
    DEPENDENCIES_NAME, REGISTRY_DEPENDENCIES_ID, REGISTRY_DEPENDENCIES_NAME, ROOT_ID,
};
pub use flatten::{display_children, display_name, flatten, FlatNode};
pub use render::render_tree;

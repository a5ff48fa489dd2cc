//! Tree Builder
//!
//! Turns the flat list of file targets shipped by a registry item into a node
//! map keyed by cumulative slash-joined ids:
//!
//! ```text
//! components/elements/sign-in.tsx
//!   -> "components"
//!   -> "components/elements"
//!   -> "components/elements/sign-in.tsx"
//! ```
//!
//! npm and registry dependencies are merged in as two synthetic folders. All
//! sibling lists are sorted in one pass after every node is inserted, so the
//! input order never shows in the output.

use std::cmp::Ordering;
use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::registry::{RegistryFile, RegistryItem};

/// Synthetic, slash-joined node id
pub type NodeId = String;

/// Id of the tree root
pub const ROOT_ID: &str = "root";

/// Id and display name of the npm dependency group
pub const DEPENDENCIES_ID: &str = "dependencies";
pub const DEPENDENCIES_NAME: &str = "Dependencies";

/// Id and display name of the registry dependency group
pub const REGISTRY_DEPENDENCIES_ID: &str = "registry-dependencies";
pub const REGISTRY_DEPENDENCIES_NAME: &str = "Registry Dependencies";

/// What a tree node stands for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum NodeKind {
    File,
    Folder,
    Dependency,
    RegistryDependency,
}

impl NodeKind {
    pub fn is_folder(&self) -> bool {
        matches!(self, NodeKind::Folder)
    }
}

/// A node of the raw tree
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TreeNode {
    pub name: String,

    #[serde(rename = "type")]
    pub kind: NodeKind,

    /// Present (possibly empty) exactly when the node is a folder
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub children: Option<Vec<NodeId>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_extension: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub registry_file: Option<RegistryFile>,
}

impl TreeNode {
    pub fn folder(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: NodeKind::Folder,
            children: Some(Vec::new()),
            file_extension: None,
            registry_file: None,
        }
    }

    pub fn file(name: impl Into<String>, registry_file: RegistryFile) -> Self {
        let name = name.into();
        let file_extension = name.rsplit_once('.').map(|(_, ext)| ext.to_string());
        Self {
            name,
            kind: NodeKind::File,
            children: None,
            file_extension,
            registry_file: Some(registry_file),
        }
    }

    /// A dependency leaf (`Dependency` or `RegistryDependency`)
    pub fn leaf(name: impl Into<String>, kind: NodeKind) -> Self {
        Self {
            name: name.into(),
            kind,
            children: None,
            file_extension: None,
            registry_file: None,
        }
    }

    pub fn is_folder(&self) -> bool {
        self.kind.is_folder()
    }

    /// Child ids, empty for leaves
    pub fn children(&self) -> &[NodeId] {
        self.children.as_deref().unwrap_or(&[])
    }
}

/// The raw node map produced by [`TreeBuilder`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FileTree {
    nodes: BTreeMap<NodeId, TreeNode>,
}

impl FileTree {
    /// Build the tree for a registry item, including its dependency groups
    pub fn from_item(item: &RegistryItem) -> Self {
        TreeBuilder::new()
            .files(&item.files)
            .dependencies(&item.dependencies)
            .registry_dependencies(&item.registry_dependencies)
            .build()
    }

    pub fn get(&self, id: &str) -> Option<&TreeNode> {
        self.nodes.get(id)
    }

    /// The root node; only missing from a tree deserialized from elsewhere
    pub fn root(&self) -> Option<&TreeNode> {
        self.get(ROOT_ID)
    }

    /// Child ids of `id`, empty for leaves and unknown ids
    pub fn children(&self, id: &str) -> &[NodeId] {
        self.get(id).map(TreeNode::children).unwrap_or(&[])
    }

    pub fn contains(&self, id: &str) -> bool {
        self.nodes.contains_key(id)
    }

    /// Nodes in id order
    pub fn iter(&self) -> impl Iterator<Item = (&NodeId, &TreeNode)> {
        self.nodes.iter()
    }

    /// Number of nodes, root included
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// True when the tree holds nothing but the root
    pub fn is_empty(&self) -> bool {
        self.children(ROOT_ID).is_empty()
    }

    /// File nodes in id order
    pub fn files(&self) -> impl Iterator<Item = (&NodeId, &TreeNode)> {
        self.nodes.iter().filter(|(_, n)| n.kind == NodeKind::File)
    }
}

/// Incremental builder for [`FileTree`]
#[derive(Debug, Clone, Default)]
pub struct TreeBuilder {
    files: Vec<RegistryFile>,
    dependencies: Vec<String>,
    registry_dependencies: Vec<String>,
}

impl TreeBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn file(mut self, file: RegistryFile) -> Self {
        self.files.push(file);
        self
    }

    pub fn files<'a>(mut self, files: impl IntoIterator<Item = &'a RegistryFile>) -> Self {
        self.files.extend(files.into_iter().cloned());
        self
    }

    pub fn dependencies(mut self, deps: &[String]) -> Self {
        self.dependencies.extend(deps.iter().cloned());
        self
    }

    pub fn registry_dependencies(mut self, deps: &[String]) -> Self {
        self.registry_dependencies.extend(deps.iter().cloned());
        self
    }

    pub fn build(self) -> FileTree {
        let mut nodes = BTreeMap::new();
        nodes.insert(ROOT_ID.to_string(), TreeNode::folder(ROOT_ID));

        for file in &self.files {
            insert_file(&mut nodes, file);
        }

        if !self.registry_dependencies.is_empty() {
            insert_group(
                &mut nodes,
                REGISTRY_DEPENDENCIES_ID,
                REGISTRY_DEPENDENCIES_NAME,
                NodeKind::RegistryDependency,
                &self.registry_dependencies,
            );
        }

        if !self.dependencies.is_empty() {
            insert_group(
                &mut nodes,
                DEPENDENCIES_ID,
                DEPENDENCIES_NAME,
                NodeKind::Dependency,
                &self.dependencies,
            );
        }

        sort_children(&mut nodes);

        FileTree { nodes }
    }
}

/// Build a tree from files and optional dependency lists
pub fn build_tree(
    files: &[RegistryFile],
    deps: Option<&[String]>,
    registry_deps: Option<&[String]>,
) -> FileTree {
    TreeBuilder::new()
        .files(files)
        .dependencies(deps.unwrap_or(&[]))
        .registry_dependencies(registry_deps.unwrap_or(&[]))
        .build()
}

fn insert_file(nodes: &mut BTreeMap<NodeId, TreeNode>, file: &RegistryFile) {
    // Leading, trailing and doubled slashes would create nameless nodes
    let segments: Vec<&str> = file.target.split('/').filter(|s| !s.is_empty()).collect();
    if segments.is_empty() {
        tracing::debug!("Skipping file {} with empty target", file.path);
        return;
    }

    let mut parent = ROOT_ID.to_string();
    let mut id = String::new();

    for (i, segment) in segments.iter().enumerate() {
        // Path ids never start with '/', so "/root" cannot collide with a
        // real path and a top-level "root" folder never aliases ROOT_ID
        if i > 0 || *segment == ROOT_ID {
            id.push('/');
        }
        id.push_str(segment);

        let is_last = i == segments.len() - 1;
        if !nodes.contains_key(&id) {
            let node = if is_last && segment.contains('.') {
                TreeNode::file(*segment, file.clone())
            } else {
                TreeNode::folder(*segment)
            };
            nodes.insert(id.clone(), node);
        } else if !is_last {
            // "a.ts" listed before "a.ts/b.ts": the earlier file becomes a folder
            if let Some(node) = nodes.get_mut(&id) {
                if !node.is_folder() {
                    *node = TreeNode::folder(node.name.clone());
                }
            }
        }

        add_child(nodes, &parent, &id);
        parent = id.clone();
    }
}

fn insert_group(
    nodes: &mut BTreeMap<NodeId, TreeNode>,
    id: &str,
    name: &str,
    kind: NodeKind,
    entries: &[String],
) {
    // A file target such as "dependencies/x.ts" may already own the id
    let mut group_id = id.to_string();
    let mut n = 1;
    while nodes.contains_key(&group_id) {
        group_id = format!("{}~{}", id, n);
        n += 1;
    }

    nodes.insert(group_id.clone(), TreeNode::folder(name));
    add_child(nodes, ROOT_ID, &group_id);

    for entry in entries {
        let leaf_id = format!("{}/{}", group_id, entry);
        nodes
            .entry(leaf_id.clone())
            .or_insert_with(|| TreeNode::leaf(entry.as_str(), kind));
        add_child(nodes, &group_id, &leaf_id);
    }
}

fn add_child(nodes: &mut BTreeMap<NodeId, TreeNode>, parent: &str, child: &str) {
    if let Some(children) = nodes.get_mut(parent).and_then(|n| n.children.as_mut()) {
        if !children.iter().any(|c| c == child) {
            children.push(child.to_string());
        }
    }
}

fn sort_children(nodes: &mut BTreeMap<NodeId, TreeNode>) {
    let keys: Vec<(NodeId, bool, String)> = nodes
        .iter()
        .map(|(id, n)| (id.clone(), n.is_folder(), n.name.clone()))
        .collect();
    let info: BTreeMap<&str, (bool, &str)> = keys
        .iter()
        .map(|(id, folder, name)| (id.as_str(), (*folder, name.as_str())))
        .collect();

    let mut sorted = Vec::new();
    for (id, node) in nodes.iter() {
        if let Some(children) = &node.children {
            let mut children = children.clone();
            children.sort_by(|a, b| compare_siblings(&info, a, b));
            sorted.push((id.clone(), children));
        }
    }

    for (id, children) in sorted {
        if let Some(node) = nodes.get_mut(&id) {
            node.children = Some(children);
        }
    }
}

/// Folders first, then names case-insensitively, then case-sensitively, then id
fn compare_siblings(info: &BTreeMap<&str, (bool, &str)>, a: &str, b: &str) -> Ordering {
    let (a_folder, a_name) = info.get(a).copied().unwrap_or((false, a));
    let (b_folder, b_name) = info.get(b).copied().unwrap_or((false, b));

    b_folder
        .cmp(&a_folder)
        .then_with(|| a_name.to_lowercase().cmp(&b_name.to_lowercase()))
        .then_with(|| a_name.cmp(b_name))
        .then_with(|| a.cmp(b))
}

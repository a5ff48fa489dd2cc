//! Folder Flattener
//!
//! Read-time projection that shows a chain of single-child folders as one
//! segment (`src/components/ui` instead of three levels). The raw tree is
//! never modified; every call re-derives the view from it.

use serde::Serialize;

use super::builder::{FileTree, NodeId, NodeKind, ROOT_ID};

/// Display name of folder `id`, or `None` if `id` is not a folder
pub fn display_name(tree: &FileTree, id: &str) -> Option<String> {
    let node = tree.get(id).filter(|n| n.is_folder())?;
    let mut name = node.name.clone();

    let mut current = id;
    while let Some(next) = single_folder_child(tree, current) {
        name.push('/');
        name.push_str(tree.get(next).map(|n| n.name.as_str()).unwrap_or_default());
        current = next;
    }

    Some(name)
}

/// Display children of folder `id`, or `None` if `id` is not a folder
pub fn display_children<'t>(tree: &'t FileTree, id: &str) -> Option<&'t [NodeId]> {
    let mut current = tree.get(id).filter(|n| n.is_folder())?;

    while let [only] = current.children() {
        match tree.get(only) {
            Some(child) if child.is_folder() => current = child,
            _ => break,
        }
    }

    Some(current.children())
}

/// The folder that `id` collapses into, if it has exactly one child and that
/// child is a folder
fn single_folder_child<'t>(tree: &'t FileTree, id: &str) -> Option<&'t str> {
    match tree.get(id)?.children() {
        [only] if tree.get(only).is_some_and(|c| c.is_folder()) => Some(only.as_str()),
        _ => None,
    }
}

/// A node of the flattened view
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FlatNode {
    /// Id of the topmost raw node this entry stands for
    pub id: NodeId,

    pub name: String,

    #[serde(rename = "type")]
    pub kind: NodeKind,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub children: Option<Vec<FlatNode>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub file_extension: Option<String>,
}

impl FlatNode {
    pub fn is_folder(&self) -> bool {
        self.kind.is_folder()
    }
}

/// Materialize the flattened view below the root
pub fn flatten(tree: &FileTree) -> Vec<FlatNode> {
    // The root itself is never merged with its only child
    tree.children(ROOT_ID)
        .iter()
        .filter_map(|id| flat_node(tree, id))
        .collect()
}

fn flat_node(tree: &FileTree, id: &str) -> Option<FlatNode> {
    let node = tree.get(id)?;

    if !node.is_folder() {
        return Some(FlatNode {
            id: id.to_string(),
            name: node.name.clone(),
            kind: node.kind,
            children: None,
            file_extension: node.file_extension.clone(),
        });
    }

    let children = display_children(tree, id)
        .unwrap_or_default()
        .iter()
        .filter_map(|child| flat_node(tree, child))
        .collect();

    Some(FlatNode {
        id: id.to_string(),
        name: display_name(tree, id).unwrap_or_else(|| node.name.clone()),
        kind: NodeKind::Folder,
        children: Some(children),
        file_extension: None,
    })
}

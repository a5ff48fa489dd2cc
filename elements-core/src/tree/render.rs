//! Plain-text rendering of the flattened view, used by the CLI

use super::builder::NodeKind;
use super::flatten::FlatNode;

/// Render nodes as an indented box-drawing tree.
///
/// Folders get a trailing `/`; dependency leaves are tagged with their kind.
pub fn render_tree(title: &str, nodes: &[FlatNode]) -> String {
    let mut out = String::new();
    out.push_str(title);
    out.push('\n');
    render_level(nodes, "", &mut out);
    out
}

fn render_level(nodes: &[FlatNode], prefix: &str, out: &mut String) {
    for (i, node) in nodes.iter().enumerate() {
        let last = i + 1 == nodes.len();
        let (branch, indent) = if last {
            ("└── ", "    ")
        } else {
            ("├── ", "│   ")
        };

        out.push_str(prefix);
        out.push_str(branch);
        out.push_str(&node.name);
        match node.kind {
            NodeKind::Folder => out.push('/'),
            NodeKind::File => {}
            NodeKind::Dependency => out.push_str("  (npm)"),
            NodeKind::RegistryDependency => out.push_str("  (registry)"),
        }
        out.push('\n');

        if let Some(children) = &node.children {
            render_level(children, &format!("{}{}", prefix, indent), out);
        }
    }
}

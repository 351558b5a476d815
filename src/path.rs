//! Structural paths and short labels for host nodes.
//!
//! Both are pure functions of the current tree structure. A structural path is
//! accumulated leaf-to-root: it stops at the root marker or at the first
//! ancestor carrying an identifier, and each step is either the node kind with
//! its style tags or, when same-kind siblings exist, the kind with a 1-based
//! `:nth-of-type(n)` index in document order.

use serde::{Deserialize, Serialize};

use crate::host::{NodeId, NodeTree};

/// Rendering options for paths and labels.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PathOptions {
    /// Path of the tree root
    pub root_marker: String,
    /// Prefix rendered before an identifier
    pub identifier_prefix: String,
    /// Style tags starting with this prefix belong to the tool and are skipped
    pub tool_class_prefix: String,
    /// Maximum style tags per structural path segment
    pub path_class_limit: usize,
    /// Maximum style tags in a short label
    pub label_class_limit: usize,
}

impl Default for PathOptions {
    fn default() -> Self {
        Self {
            root_marker: "body".to_string(),
            identifier_prefix: "#".to_string(),
            tool_class_prefix: "agn-".to_string(),
            path_class_limit: 3,
            label_class_limit: 2,
        }
    }
}

/// Style tags of `node` in declaration order, without the tool's own tags.
pub fn style_tags(tree: &impl NodeTree, node: NodeId, options: &PathOptions) -> Vec<String> {
    tree.class_tags(node)
        .into_iter()
        .filter(|class| !class.is_empty() && !class.starts_with(&options.tool_class_prefix))
        .collect()
}

fn class_suffix(tree: &impl NodeTree, node: NodeId, options: &PathOptions, limit: usize) -> String {
    style_tags(tree, node, options)
        .iter()
        .take(limit)
        .map(|class| format!(".{}", class))
        .collect()
}

/// Long, deterministic locator for `node`.
pub fn resolve_path(tree: &impl NodeTree, node: NodeId, options: &PathOptions) -> String {
    let root = tree.root();
    let mut segments: Vec<String> = Vec::new();
    let mut current = node;

    let head = loop {
        if current == root {
            break options.root_marker.clone();
        }
        if let Some(id) = tree.identifier(current) {
            break format!("{}{}", options.identifier_prefix, id);
        }

        let kind = tree.tag_name(current);
        let tag = kind.to_lowercase();
        let suffix = class_suffix(tree, current, options, options.path_class_limit);

        let Some(parent) = tree.parent(current) else {
            break format!("{}{}", tag, suffix);
        };

        let same_kind: Vec<NodeId> = tree
            .children(parent)
            .into_iter()
            .filter(|sibling| tree.tag_name(*sibling).eq_ignore_ascii_case(&kind))
            .collect();

        let position = same_kind.iter().position(|sibling| *sibling == current);
        let segment = match position {
            Some(index) if same_kind.len() > 1 => format!("{}:nth-of-type({})", tag, index + 1),
            _ => format!("{}{}", tag, suffix),
        };
        segments.push(segment);
        current = parent;
    };

    segments
        .iter()
        .rev()
        .fold(head, |path, segment| format!("{} > {}", path, segment))
}

/// Short human label: the identifier, or the node kind with its first style tags.
pub fn resolve_label(tree: &impl NodeTree, node: NodeId, options: &PathOptions) -> String {
    if let Some(id) = tree.identifier(node) {
        return format!("{}{}", options.identifier_prefix, id);
    }
    format!(
        "{}{}",
        tree.tag_name(node).to_lowercase(),
        class_suffix(tree, node, options, options.label_class_limit)
    )
}

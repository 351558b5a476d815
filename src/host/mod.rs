//! Host surface abstraction.
//!
//! The engine never touches a concrete UI tree. Everything it needs from the
//! host (structure, style tags, text, geometry and scroll state) is read
//! through [`NodeTree`] and [`Surface`]. Nodes are referenced by opaque
//! [`NodeId`] handles, so a record never keeps a removed node alive; liveness
//! is checked with [`NodeTree::is_attached`] before any geometry is used.

mod memory;

pub use memory::{MemoryTree, NodeSpec};

use agentation_ui::{Viewport, ViewportRect};

/// Opaque handle to a node of the host tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(u64);

impl NodeId {
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    pub const fn raw(self) -> u64 {
        self.0
    }

    /// CSS selector matching the element tagged with this handle in `attribute`.
    pub fn attribute_selector(self, attribute: &str) -> String {
        format!("[{}=\"{}\"]", attribute, self.0)
    }
}

impl std::fmt::Display for NodeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "node#{}", self.0)
    }
}

/// Read-only structural queries over the host tree.
pub trait NodeTree {
    /// The designated root node (rendered as the root marker in paths).
    fn root(&self) -> NodeId;

    /// Parent of `node`, or `None` for the root and for detached subtrees.
    fn parent(&self, node: NodeId) -> Option<NodeId>;

    /// Element children of `node` in document order.
    fn children(&self, node: NodeId) -> Vec<NodeId>;

    /// Element kind as reported by the host. HTML hosts report upper case.
    fn tag_name(&self, node: NodeId) -> String;

    /// Unique identifier attribute, if the node carries a non-empty one.
    fn identifier(&self, node: NodeId) -> Option<String>;

    /// Style tags in declaration order, including any the tool injected.
    fn class_tags(&self, node: NodeId) -> Vec<String>;

    /// Concatenated text content of the node and its descendants.
    fn text_content(&self, node: NodeId) -> String;

    /// Whether `node` still belongs to the tree reachable from [`NodeTree::root`].
    fn is_attached(&self, node: NodeId) -> bool {
        let root = self.root();
        let mut current = node;
        loop {
            if current == root {
                return true;
            }
            match self.parent(current) {
                Some(parent) => current = parent,
                None => return false,
            }
        }
    }
}

/// A rendered host surface: tree structure plus live geometry.
pub trait Surface: NodeTree {
    /// Current viewport-relative bounding box of `node`.
    ///
    /// `None` when the node is detached or has no layout box.
    fn bounding_rect(&self, node: NodeId) -> Option<ViewportRect>;

    /// Current scroll offset and visible size.
    fn viewport(&self) -> Viewport;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_attribute_selector() {
        let node = NodeId::new(42);
        assert_eq!(node.attribute_selector("data-agn-node"), "[data-agn-node=\"42\"]");
        assert_eq!(node.to_string(), "node#42");
    }
}

//! In-memory host tree.
//!
//! A deterministic [`Surface`] used by the demo binary and by every engine
//! test. Layout is stored in page space; [`Surface::bounding_rect`] projects
//! it through the current scroll offset the way a browser would.

use std::collections::HashMap;

use agentation_ui::projection::to_viewport_space;
use agentation_ui::{PageRect, ScrollOffset, Viewport, ViewportRect};

use super::{NodeId, NodeTree, Surface};

/// Builder describing one element to append to a [`MemoryTree`].
#[derive(Debug, Clone, Default)]
pub struct NodeSpec {
    tag: String,
    id: Option<String>,
    classes: Vec<String>,
    text: String,
    layout: Option<PageRect>,
}

impl NodeSpec {
    /// Create a spec for an element of kind `tag` (e.g. `"div"`).
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            ..Self::default()
        }
    }

    pub fn id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn class(mut self, class: impl Into<String>) -> Self {
        self.classes.push(class.into());
        self
    }

    /// Own text of the element (descendant text is appended on read).
    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.text = text.into();
        self
    }

    /// Layout box in page space.
    pub fn at(mut self, x: f32, y: f32, width: f32, height: f32) -> Self {
        self.layout = Some(PageRect::new(x, y, width, height));
        self
    }
}

#[derive(Debug, Clone)]
struct MemoryNode {
    spec: NodeSpec,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
}

/// A mutable in-memory tree with page-space layout and a scrollable viewport.
#[derive(Debug, Clone)]
pub struct MemoryTree {
    nodes: HashMap<NodeId, MemoryNode>,
    root: NodeId,
    next_id: u64,
    viewport: Viewport,
}

impl MemoryTree {
    /// Create a tree holding only the root (`body`), laid out to fill the viewport.
    pub fn new(viewport: Viewport) -> Self {
        let root = NodeId::new(0);
        let mut nodes = HashMap::new();
        nodes.insert(
            root,
            MemoryNode {
                spec: NodeSpec::new("body").at(0.0, 0.0, viewport.width, viewport.height),
                parent: None,
                children: Vec::new(),
            },
        );
        Self {
            nodes,
            root,
            next_id: 1,
            viewport,
        }
    }

    /// Append a new element as the last child of `parent`.
    ///
    /// Appending under an unknown parent creates a detached node.
    pub fn append(&mut self, parent: NodeId, spec: NodeSpec) -> NodeId {
        let id = NodeId::new(self.next_id);
        self.next_id += 1;

        let parent = match self.nodes.get_mut(&parent) {
            Some(node) => {
                node.children.push(id);
                Some(parent)
            }
            None => None,
        };

        self.nodes.insert(
            id,
            MemoryNode {
                spec,
                parent,
                children: Vec::new(),
            },
        );
        id
    }

    /// Detach `node` (and its subtree) from its parent.
    ///
    /// The handle stays valid but [`NodeTree::is_attached`] becomes false and
    /// the node reports no geometry.
    pub fn detach(&mut self, node: NodeId) {
        let Some(parent) = self.nodes.get_mut(&node).and_then(|n| n.parent.take()) else {
            return;
        };
        if let Some(parent) = self.nodes.get_mut(&parent) {
            parent.children.retain(|child| *child != node);
        }
        log::debug!("Detached {}", node);
    }

    /// Move an element to a new page-space layout box (re-flow).
    pub fn set_layout(&mut self, node: NodeId, rect: PageRect) {
        if let Some(n) = self.nodes.get_mut(&node) {
            n.spec.layout = Some(rect);
        }
    }

    pub fn set_text(&mut self, node: NodeId, text: impl Into<String>) {
        if let Some(n) = self.nodes.get_mut(&node) {
            n.spec.text = text.into();
        }
    }

    pub fn add_class(&mut self, node: NodeId, class: impl Into<String>) {
        if let Some(n) = self.nodes.get_mut(&node) {
            n.spec.classes.push(class.into());
        }
    }

    pub fn scroll_to(&mut self, x: f32, y: f32) {
        self.viewport.scroll = ScrollOffset::new(x, y);
    }

    pub fn resize(&mut self, width: f32, height: f32) {
        self.viewport.width = width;
        self.viewport.height = height;
    }

    /// Page-space layout box of `node`, if it has one.
    pub fn layout(&self, node: NodeId) -> Option<PageRect> {
        self.nodes.get(&node).and_then(|n| n.spec.layout)
    }

    /// Scroll so that `node` is vertically centered, like `scrollIntoView({block: "center"})`.
    pub fn scroll_into_view(&mut self, node: NodeId) {
        if let Some(rect) = self.layout(node) {
            let y = (rect.center().y - self.viewport.height / 2.0).max(0.0);
            let x = self.viewport.scroll.x;
            self.scroll_to(x, y);
        }
    }

    /// First attached node whose identifier equals `id`.
    pub fn find_by_identifier(&self, id: &str) -> Option<NodeId> {
        let mut stack = vec![self.root];
        while let Some(node) = stack.pop() {
            if self.identifier(node).as_deref() == Some(id) {
                return Some(node);
            }
            stack.extend(self.children(node).into_iter().rev());
        }
        None
    }
}

impl NodeTree for MemoryTree {
    fn root(&self) -> NodeId {
        self.root
    }

    fn parent(&self, node: NodeId) -> Option<NodeId> {
        self.nodes.get(&node).and_then(|n| n.parent)
    }

    fn children(&self, node: NodeId) -> Vec<NodeId> {
        self.nodes
            .get(&node)
            .map(|n| n.children.clone())
            .unwrap_or_default()
    }

    fn tag_name(&self, node: NodeId) -> String {
        self.nodes
            .get(&node)
            .map(|n| n.spec.tag.to_uppercase())
            .unwrap_or_default()
    }

    fn identifier(&self, node: NodeId) -> Option<String> {
        self.nodes
            .get(&node)
            .and_then(|n| n.spec.id.clone())
            .filter(|id| !id.is_empty())
    }

    fn class_tags(&self, node: NodeId) -> Vec<String> {
        self.nodes
            .get(&node)
            .map(|n| n.spec.classes.clone())
            .unwrap_or_default()
    }

    fn text_content(&self, node: NodeId) -> String {
        let Some(n) = self.nodes.get(&node) else {
            return String::new();
        };
        let mut text = n.spec.text.clone();
        for child in &n.children {
            text.push_str(&self.text_content(*child));
        }
        text
    }
}

impl Surface for MemoryTree {
    fn bounding_rect(&self, node: NodeId) -> Option<ViewportRect> {
        if !self.is_attached(node) {
            return None;
        }
        self.layout(node)
            .map(|rect| to_viewport_space(rect, self.viewport.scroll))
    }

    fn viewport(&self) -> Viewport {
        self.viewport
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> (MemoryTree, NodeId, NodeId) {
        let mut tree = MemoryTree::new(Viewport::unscrolled(800.0, 600.0));
        let root = tree.root();
        let list = tree.append(root, NodeSpec::new("ul").at(0.0, 0.0, 800.0, 100.0));
        let item = tree.append(list, NodeSpec::new("li").text("hello").at(0.0, 0.0, 800.0, 20.0));
        (tree, list, item)
    }

    #[test]
    fn test_structure_queries() {
        let (tree, list, item) = sample();
        assert_eq!(tree.parent(item), Some(list));
        assert_eq!(tree.children(list), vec![item]);
        assert_eq!(tree.tag_name(item), "LI");
        assert_eq!(tree.text_content(list), "hello");
        assert!(tree.is_attached(item));
    }

    #[test]
    fn test_bounding_rect_follows_scroll() {
        let (mut tree, _, item) = sample();
        tree.scroll_to(0.0, 250.0);
        assert_eq!(
            tree.bounding_rect(item),
            Some(ViewportRect::new(0.0, -250.0, 800.0, 20.0))
        );
    }

    #[test]
    fn test_detach_removes_geometry() {
        let (mut tree, list, item) = sample();
        tree.detach(item);
        assert!(!tree.is_attached(item));
        assert!(tree.bounding_rect(item).is_none());
        assert!(tree.children(list).is_empty());
    }

    #[test]
    fn test_find_by_identifier() {
        let mut tree = MemoryTree::new(Viewport::unscrolled(800.0, 600.0));
        let root = tree.root();
        let header = tree.append(root, NodeSpec::new("header").id("top"));
        assert_eq!(tree.find_by_identifier("top"), Some(header));
        assert_eq!(tree.find_by_identifier("missing"), None);
    }
}

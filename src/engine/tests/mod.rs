//! Engine tests against the in-memory host.

mod panel_copy_tests;
mod sync_tests;

use agentation_ui::Viewport;

use crate::engine::Engine;
use crate::host::{MemoryTree, NodeId, NodeSpec, NodeTree};
use crate::interaction::{ChromePart, PointerTarget};

const EPSILON: f32 = 0.001;

pub(super) fn approx_eq(a: f32, b: f32) -> bool {
    (a - b).abs() < EPSILON
}

/// A small landing page laid out in a 1280x800 viewport.
pub(super) struct Page {
    pub engine: Engine<MemoryTree>,
    pub header: NodeId,
    pub hero: NodeId,
    pub first_item: NodeId,
    pub second_item: NodeId,
    pub button: NodeId,
    pub note: NodeId,
}

impl Page {
    pub fn new() -> Self {
        let mut tree = MemoryTree::new(Viewport::unscrolled(1280.0, 800.0));
        let root = tree.root();

        let header = tree.append(
            root,
            NodeSpec::new("header").id("top").text("Site").at(0.0, 0.0, 1280.0, 80.0),
        );
        let main = tree.append(
            root,
            NodeSpec::new("main").class("content").at(0.0, 80.0, 1280.0, 2000.0),
        );
        let hero = tree.append(
            main,
            NodeSpec::new("section")
                .class("hero")
                .class("dark")
                .text("  Welcome to the demo  ")
                .at(40.0, 100.0, 1200.0, 300.0),
        );
        let menu = tree.append(
            main,
            NodeSpec::new("ul").class("menu").at(40.0, 420.0, 400.0, 80.0),
        );
        let first_item = tree.append(
            menu,
            NodeSpec::new("li").class("item").text("One").at(40.0, 420.0, 400.0, 40.0),
        );
        let second_item = tree.append(
            menu,
            NodeSpec::new("li").class("item").text("Two").at(40.0, 460.0, 400.0, 40.0),
        );
        let button = tree.append(
            main,
            NodeSpec::new("button")
                .class("btn")
                .class("primary")
                .class("agn-hover")
                .text("Submit")
                .at(1100.0, 700.0, 120.0, 40.0),
        );
        let note = tree.append(
            main,
            NodeSpec::new("p").class("note").text("Footnote").at(40.0, 1800.0, 300.0, 20.0),
        );

        Self {
            engine: Engine::with_defaults(tree),
            header,
            hero,
            first_item,
            second_item,
            button,
            note,
        }
    }

    /// Active engine with one committed annotation on `node`.
    pub fn with_annotation(node: fn(&Page) -> NodeId, comment: &str) -> Self {
        let mut page = Self::new();
        page.engine.toggle_mode();
        let target = node(&page);
        page.engine.click(PointerTarget::Node(target));
        page.engine.commit(comment);
        page
    }

    pub fn scroll_to(&mut self, x: f32, y: f32) {
        self.engine.surface_mut().scroll_to(x, y);
        self.engine.notify_geometry_changed();
        self.engine.run_frame();
    }
}

pub(super) fn marker(id: u32) -> PointerTarget {
    PointerTarget::Chrome(ChromePart::Marker(id))
}

/// Scripted demo of the annotation engine against an in-memory page (native builds)
#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use agentation::{
        AgentationConfig, Engine, KeyContext, MemoryClipboard, MemoryTree, NodeSpec, NodeTree,
        PointerTarget,
    };
    use agentation::interaction::ChromePart;
    use agentation_ui::{Key, Modifiers, PageRect, Viewport};

    // First run writes the defaults so there is a file to edit
    let config = AgentationConfig::load_or_seed_default_path();

    // RUST_LOG overrides the configured level
    env_logger::Builder::new()
        .filter_level(config.preferences.log_level.to_level_filter())
        .parse_default_env()
        .init();

    let mut tree = MemoryTree::new(Viewport::unscrolled(1280.0, 800.0));
    let root = tree.root();
    let nav = tree.append(
        root,
        NodeSpec::new("nav").id("site-nav").text("Home Docs Blog").at(0.0, 0.0, 1280.0, 64.0),
    );
    let main = tree.append(
        root,
        NodeSpec::new("main").class("content").at(0.0, 64.0, 1280.0, 2400.0),
    );
    let card = tree.append(
        main,
        NodeSpec::new("article")
            .class("card")
            .class("featured")
            .text("Getting started with the SDK")
            .at(80.0, 120.0, 520.0, 240.0),
    );
    let cta = tree.append(
        main,
        NodeSpec::new("button")
            .class("btn")
            .class("cta")
            .text("Sign up")
            .at(1120.0, 180.0, 120.0, 44.0),
    );
    let footer = tree.append(
        root,
        NodeSpec::new("footer").text("(c) 2024").at(0.0, 2464.0, 1280.0, 120.0),
    );

    let mut engine = Engine::new(tree, config);
    engine.subscribe(|change| log::info!("Store changed: {:?}", change));

    engine.key_down(Key::Char('a'), Modifiers::NONE, KeyContext::Page);

    for (node, comment) in [
        (card, "Title is cut off on narrow screens"),
        (cta, "Use the brand color here"),
        (nav, "Active link is not highlighted"),
    ] {
        engine.pointer_enter(PointerTarget::Node(node));
        engine.click(PointerTarget::Node(node));
        if let Some(popup) = &engine.overlays().popup {
            log::info!(
                "Popup for {} opens {:?} at ({:.0}, {:.0})",
                popup.label,
                popup.placement.side,
                popup.placement.origin.x,
                popup.placement.origin.y
            );
        }
        if let Err(e) = engine.update_draft(comment) {
            log::warn!("Could not type into popup: {}", e);
        }
        engine.key_down(Key::Enter, Modifiers::NONE, KeyContext::PopupInput);
        engine.pointer_leave(PointerTarget::Node(node));
    }

    // Edit the first annotation through its marker
    engine.click(PointerTarget::Chrome(ChromePart::Marker(1)));
    if let Err(e) = engine.update_draft("Title wraps badly below 600px") {
        log::warn!("Could not edit annotation: {}", e);
    }
    engine.commit_draft();

    // Scroll and re-flow; markers follow on the next frame
    engine.surface_mut().scroll_to(0.0, 1800.0);
    engine.surface_mut().set_layout(card, PageRect::new(80.0, 160.0, 520.0, 240.0));
    engine.notify_geometry_changed();
    engine.notify_geometry_changed();
    engine.run_frame();
    for marker in &engine.overlays().markers {
        log::info!("Marker {} at {:?}", marker.key, marker.position);
    }

    // Footer is removed; its comment would be discarded
    engine.click(PointerTarget::Node(footer));
    engine.surface_mut().detach(footer);
    let outcome = engine.commit("Copyright year is outdated");
    log::info!("Commit on removed footer: {:?}", outcome);

    let mut clipboard = MemoryClipboard::new();
    let pulse = engine.copy_markdown(&mut clipboard);
    log::info!("Copy {} ({:?})", pulse.icon(), pulse);

    println!("{}", clipboard.contents().unwrap_or_default());
}

// WASM doesn't use main(), it uses wasm_bindgen's start function
#[cfg(target_arch = "wasm32")]
fn main() {}

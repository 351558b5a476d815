//! Browser host: DOM surface, event wiring and overlay rendering.
//!
//! All listeners are installed in the capture phase on the window so clicks
//! on the page can be swallowed before the host sees them. Every element the
//! overlay creates lives under `#agn-root` and carries an `agn-` id or class,
//! which is how pointer targets are classified as chrome.

use std::cell::{Cell, RefCell};
use std::rc::Rc;
use std::time::Duration;

use agentation_ui::{Key, Modifiers, OverlayScene, PopupOverlay, ScrollOffset, Viewport, ViewportRect};
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::JsFuture;
use web_sys::{
    AddEventListenerOptions, Document, Element, Event, EventTarget, HtmlElement,
    HtmlTextAreaElement, KeyboardEvent, MouseEvent, ScrollBehavior, ScrollIntoViewOptions,
    ScrollLogicalPosition, Window,
};

use crate::config::AgentationConfig;
use crate::engine::Engine;
use crate::error::ClipboardError;
use crate::host::{NodeId, NodeTree, Surface};
use crate::interaction::{ChromePart, KeyContext, PointerTarget};
use crate::model::AnnotationId;
use crate::panel::PANEL_EMPTY_MESSAGE;

const NODE_ATTR: &str = "data-agn-node";
const MARKER_ATTR: &str = "data-agn-marker";
const ROW_ATTR: &str = "data-agn-row";
const ACTION_ATTR: &str = "data-agn-action";
const CHROME_PREFIX: &str = "agn-";
const POPUP_INPUT_ID: &str = "agn-popup-input";
const COPY_ICON: &str = "⧉";

const CHROME_HTML: &str = r#"<style>
#agn-root{font:13px/1.4 system-ui,sans-serif;color:#111}
#agn-toolbar{position:fixed;right:16px;bottom:16px;z-index:2147483646;display:flex;gap:4px;padding:6px;border-radius:20px;background:#1a1a1a}
#agn-toolbar button{border:0;border-radius:14px;min-width:28px;height:28px;background:transparent;color:#fff;cursor:pointer}
#agn-root.agn-active [data-agn-action=toggle]{background:#3c82f7}
#agn-badge{margin-left:4px;font-size:11px}
#agn-layer{position:absolute;left:0;top:0;width:0;height:0;z-index:2147483645}
.agn-marker{position:absolute;width:22px;height:22px;border-radius:11px;background:#3c82f7;color:#fff;font-size:11px;text-align:center;line-height:22px;cursor:pointer}
.agn-marker.agn-editing{background:#f5a623}
#agn-highlight{position:fixed;display:none;pointer-events:none;border:2px solid #3c82f7;border-radius:4px;background:rgba(60,130,247,.08);z-index:2147483644;box-sizing:border-box}
#agn-popup{position:absolute;display:none;box-sizing:border-box;padding:10px;border-radius:10px;background:#fff;box-shadow:0 4px 24px rgba(0,0,0,.2)}
#agn-popup textarea{width:100%;box-sizing:border-box;resize:none}
.agn-popup-actions{display:flex;justify-content:flex-end;gap:6px;margin-top:6px}
#agn-tooltip{position:absolute;display:none;box-sizing:border-box;padding:7px 10px;border-radius:6px;background:#1a1a1a;color:#fff;font-size:12px;line-height:1.5;white-space:pre-wrap;pointer-events:none}
.agn-tooltip-arrow{position:absolute;top:-4px;width:8px;height:8px;margin-left:-4px;background:#1a1a1a;transform:rotate(45deg)}
#agn-panel{position:fixed;right:16px;bottom:64px;display:none;width:320px;max-height:50vh;overflow:auto;border-radius:10px;background:#fff;box-shadow:0 4px 24px rgba(0,0,0,.2);z-index:2147483646}
.agn-row{padding:8px 10px;border-bottom:1px solid #eee;cursor:pointer}
.agn-row code{display:block;font-size:11px;color:#666;word-break:break-all}
.agn-empty{padding:12px;color:#888}
</style>
<div id="agn-toolbar">
<button data-agn-action="toggle" title="Annotate (A)">✎</button>
<button data-agn-action="panel" title="Annotations">☰<span id="agn-badge"></span></button>
<button id="agn-copy" data-agn-action="copy" title="Copy Markdown">⧉</button>
<button data-agn-action="clear" title="Clear all">✕</button>
</div>
<div id="agn-layer"><div id="agn-markers"></div><div id="agn-popup"></div><div id="agn-tooltip"></div></div>
<div id="agn-highlight"></div>
<div id="agn-panel"></div>"#;

// ============================================================================
// DOM Surface
// ============================================================================

/// [`Surface`] over the live document.
///
/// Elements get a [`NodeId`] the first time the engine sees them; the id is
/// stored on the element so the same element always maps to the same handle.
/// Handles are resolved through the document on every lookup, so the surface
/// holds no reference to page elements and removed nodes stay collectable.
#[derive(Debug)]
struct DomSurface {
    window: Window,
    document: Document,
    body: Element,
    root: NodeId,
    next_id: Cell<u64>,
}

impl DomSurface {
    fn new(window: Window, document: Document, body: Element) -> Self {
        let surface = Self {
            window,
            document,
            body,
            root: NodeId::new(0),
            next_id: Cell::new(0),
        };
        surface.register(&surface.body);
        surface
    }

    /// Handle for `element`, registering it on first sight.
    fn register(&self, element: &Element) -> NodeId {
        let known = element
            .get_attribute(NODE_ATTR)
            .and_then(|raw| raw.parse::<u64>().ok())
            .filter(|raw| {
                // Cloned elements carry a copied attribute
                self.element(NodeId::new(*raw))
                    .is_some_and(|existing| existing.is_same_node(Some(element)))
            });
        if let Some(raw) = known {
            return NodeId::new(raw);
        }

        let id = NodeId::new(self.next_id.get());
        self.next_id.set(id.raw() + 1);
        if let Err(e) = element.set_attribute(NODE_ATTR, &id.raw().to_string()) {
            log::warn!("Could not tag {}: {:?}", id, e);
        }
        id
    }

    /// Element currently in the document carrying `node`'s tag.
    fn element(&self, node: NodeId) -> Option<Element> {
        if node == self.root {
            return Some(self.body.clone());
        }
        self.document
            .query_selector(&node.attribute_selector(NODE_ATTR))
            .ok()
            .flatten()
    }
}

fn is_chrome(element: &Element) -> bool {
    element.id().starts_with(CHROME_PREFIX)
}

impl NodeTree for DomSurface {
    fn root(&self) -> NodeId {
        self.root
    }

    fn parent(&self, node: NodeId) -> Option<NodeId> {
        if node == self.root {
            return None;
        }
        let parent = self.element(node)?.parent_element()?;
        Some(self.register(&parent))
    }

    fn children(&self, node: NodeId) -> Vec<NodeId> {
        let Some(element) = self.element(node) else {
            return Vec::new();
        };
        let children = element.children();
        (0..children.length())
            .filter_map(|i| children.item(i))
            .filter(|child| !is_chrome(child))
            .map(|child| self.register(&child))
            .collect()
    }

    fn tag_name(&self, node: NodeId) -> String {
        self.element(node)
            .map(|element| element.tag_name())
            .unwrap_or_default()
    }

    fn identifier(&self, node: NodeId) -> Option<String> {
        self.element(node)
            .map(|element| element.id())
            .filter(|id| !id.is_empty())
    }

    fn class_tags(&self, node: NodeId) -> Vec<String> {
        // getAttribute also works for SVG elements, whose className is not a string
        self.element(node)
            .and_then(|element| element.get_attribute("class"))
            .map(|classes| classes.split_whitespace().map(str::to_string).collect())
            .unwrap_or_default()
    }

    fn text_content(&self, node: NodeId) -> String {
        self.element(node)
            .and_then(|element| element.text_content())
            .unwrap_or_default()
    }

    fn is_attached(&self, node: NodeId) -> bool {
        let Some(element) = self.element(node) else {
            return false;
        };
        element.is_connected() && self.body.contains(Some(&element))
    }
}

impl Surface for DomSurface {
    fn bounding_rect(&self, node: NodeId) -> Option<ViewportRect> {
        if !self.is_attached(node) {
            return None;
        }
        let rect = self.element(node)?.get_bounding_client_rect();
        Some(ViewportRect::new(
            rect.x() as f32,
            rect.y() as f32,
            rect.width() as f32,
            rect.height() as f32,
        ))
    }

    fn viewport(&self) -> Viewport {
        let dimension = |value: Result<JsValue, JsValue>| {
            value.ok().and_then(|v| v.as_f64()).unwrap_or(0.0) as f32
        };
        Viewport::new(
            ScrollOffset::new(
                self.window.scroll_x().unwrap_or(0.0) as f32,
                self.window.scroll_y().unwrap_or(0.0) as f32,
            ),
            dimension(self.window.inner_width()),
            dimension(self.window.inner_height()),
        )
    }
}

// ============================================================================
// Application
// ============================================================================

struct App {
    engine: Engine<DomSurface>,
    document: Document,
    chrome: Element,
    /// Session the rendered popup belongs to
    popup_key: Option<String>,
}

type Shared = Rc<RefCell<App>>;

#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();

    let config = AgentationConfig::load_from_local_storage().unwrap_or_default();
    if let Err(e) = console_log::init_with_level(config.preferences.log_level.to_level()) {
        web_sys::console::warn_1(&format!("Logger already initialized: {}", e).into());
    }

    if let Err(e) = attach(config) {
        log::error!("Failed to attach overlay: {:?}", e);
    }
}

fn attach(config: AgentationConfig) -> Result<(), JsValue> {
    let window = web_sys::window().ok_or("no window")?;
    let hostname = window.location().hostname()?;
    if !config.host_gate.is_allowed(&hostname) {
        return Ok(());
    }

    let document = window.document().ok_or("no document")?;
    let body: Element = document.body().ok_or("no body")?.into();

    let chrome = document.create_element("div")?;
    chrome.set_id("agn-root");
    chrome.set_inner_html(CHROME_HTML);
    body.append_child(&chrome)?;

    let surface = DomSurface::new(window.clone(), document.clone(), body);
    let mut engine = Engine::new(surface, config);
    engine.subscribe(|change| log::debug!("Store: {:?}", change));

    let app: Shared = Rc::new(RefCell::new(App {
        engine,
        document,
        chrome,
        popup_key: None,
    }));

    listen(&window, "mouseover", true, false, &app, on_pointer_over)?;
    listen(&window, "mouseout", true, false, &app, on_pointer_out)?;
    listen(&window, "click", true, false, &app, on_click)?;
    listen(&window, "keydown", true, false, &app, on_key_down)?;
    listen(&window, "input", true, false, &app, on_input)?;
    listen(&window, "scroll", true, true, &app, on_geometry)?;
    listen(&window, "resize", false, true, &app, on_geometry)?;

    app.borrow_mut().render();
    log::info!("🖊️ Agentation attached to '{}'", hostname);
    Ok(())
}

fn listen<E: JsCast + 'static>(
    target: &EventTarget,
    kind: &str,
    capture: bool,
    passive: bool,
    app: &Shared,
    handler: fn(&Shared, E),
) -> Result<(), JsValue> {
    let app = app.clone();
    let closure = Closure::<dyn FnMut(Event)>::new(move |event: Event| {
        if let Ok(event) = event.dyn_into::<E>() {
            handler(&app, event);
        }
    });

    let options = AddEventListenerOptions::new();
    options.set_capture(capture);
    options.set_passive(passive);
    target.add_event_listener_with_callback_and_add_event_listener_options(
        kind,
        closure.as_ref().unchecked_ref(),
        &options,
    )?;
    // Listeners live as long as the page
    closure.forget();
    Ok(())
}

fn event_element(event: &Event) -> Option<Element> {
    event.target()?.dyn_into::<Element>().ok()
}

fn swallow(event: &Event) {
    event.prevent_default();
    event.stop_propagation();
}

// ============================================================================
// Event Handlers
// ============================================================================

fn on_pointer_over(app: &Shared, event: MouseEvent) {
    let Some(element) = event_element(&event) else {
        return;
    };
    let Ok(mut app) = app.try_borrow_mut() else {
        return;
    };
    if let Some(target) = app.classify(&element) {
        app.engine.pointer_enter(target);
        app.render();
    }
}

fn on_pointer_out(app: &Shared, event: MouseEvent) {
    let Some(element) = event_element(&event) else {
        return;
    };
    let Ok(mut app) = app.try_borrow_mut() else {
        return;
    };
    if let Some(target) = app.classify(&element) {
        app.engine.pointer_leave(target);
        app.render();
    }
}

fn on_click(shared: &Shared, event: MouseEvent) {
    let Some(element) = event_element(&event) else {
        return;
    };

    if let Some(action) = closest_attr(&element, ACTION_ATTR) {
        swallow(&event);
        run_action(shared, &action);
        return;
    }

    let Ok(mut app) = shared.try_borrow_mut() else {
        return;
    };
    if let Some(id) = closest_attr(&element, ROW_ATTR).and_then(|raw| raw.parse().ok()) {
        swallow(&event);
        app.focus_row(id);
        app.render();
        return;
    }

    let Some(target) = app.classify(&element) else {
        return;
    };
    if app.engine.click(target).is_consumed() {
        swallow(&event);
    }
    app.render();
}

fn on_key_down(app: &Shared, event: KeyboardEvent) {
    let Some(key) = Key::from_name(&event.key()) else {
        return;
    };
    let modifiers = Modifiers {
        shift: event.shift_key(),
        ctrl: event.ctrl_key(),
        alt: event.alt_key(),
        meta: event.meta_key(),
    };
    let Ok(mut app) = app.try_borrow_mut() else {
        return;
    };
    let context = focus_context(&app.document);
    if app.engine.key_down(key, modifiers, context).is_consumed() {
        swallow(&event);
        app.render();
    }
}

fn on_input(app: &Shared, event: Event) {
    let Some(input) = event
        .target()
        .and_then(|target| target.dyn_into::<HtmlTextAreaElement>().ok())
        .filter(|input| input.id() == POPUP_INPUT_ID)
    else {
        return;
    };
    let Ok(mut app) = app.try_borrow_mut() else {
        return;
    };
    if let Err(e) = app.engine.update_draft(&input.value()) {
        log::debug!("Input without session: {}", e);
    }
}

fn on_geometry(app: &Shared, _event: Event) {
    let needs_frame = match app.try_borrow_mut() {
        Ok(mut app) => app.engine.notify_geometry_changed(),
        Err(_) => return,
    };
    if needs_frame {
        request_frame(app);
    }
}

fn request_frame(app: &Shared) {
    let Some(window) = web_sys::window() else {
        return;
    };
    let app = app.clone();
    let callback = Closure::once_into_js(move || match app.try_borrow_mut() {
        Ok(mut guard) => {
            if guard.engine.run_frame() {
                guard.render();
            }
        }
        // The pending pass must still run or later notifications are ignored
        Err(_) => request_frame(&app),
    });
    if let Err(e) = window.request_animation_frame(callback.unchecked_ref()) {
        log::error!("requestAnimationFrame failed: {:?}", e);
    }
}

fn render_after(app: &Shared, delay: Duration) {
    let Some(window) = web_sys::window() else {
        return;
    };
    let app = app.clone();
    let callback = Closure::once_into_js(move || {
        if let Ok(mut app) = app.try_borrow_mut() {
            app.render();
        }
    });
    let millis = i32::try_from(delay.as_millis()).unwrap_or(i32::MAX);
    if let Err(e) =
        window.set_timeout_with_callback_and_timeout_and_arguments_0(callback.unchecked_ref(), millis)
    {
        log::error!("setTimeout failed: {:?}", e);
    }
}

/// Ask before a bulk clear.
fn confirm_clear(count: usize) -> bool {
    let Some(window) = web_sys::window() else {
        return false;
    };
    let message = format!("Clear all {} annotations?", count);
    window.confirm_with_message(&message).unwrap_or(false)
}

fn run_action(shared: &Shared, action: &str) {
    if action == "copy" {
        start_copy(shared);
        return;
    }
    let Ok(mut app) = shared.try_borrow_mut() else {
        return;
    };
    match action {
        "toggle" => {
            app.engine.toggle_mode();
        }
        "panel" => {
            app.engine.toggle_panel();
        }
        "clear" => {
            app.engine.clear_confirmed(confirm_clear);
        }
        "save" => {
            app.engine.commit_draft();
        }
        "cancel" => {
            app.engine.cancel_session();
        }
        "delete" => {
            app.engine.delete_current();
        }
        other => log::warn!("Unknown toolbar action '{}'", other),
    }
    app.render();
}

fn start_copy(shared: &Shared) {
    let report = match shared.try_borrow_mut() {
        Ok(mut app) => {
            let report = app.engine.begin_copy();
            app.render();
            report
        }
        Err(_) => return,
    };

    let Some(report) = report else {
        render_after(shared, crate::feedback::CopyPulse::Empty.duration());
        return;
    };

    let app = shared.clone();
    wasm_bindgen_futures::spawn_local(async move {
        let result = write_clipboard(&report).await;
        let pulse = match app.try_borrow_mut() {
            Ok(mut inner) => {
                let pulse = inner.engine.finish_copy(result);
                inner.render();
                pulse
            }
            Err(_) => return,
        };
        render_after(&app, pulse.duration());
    });
}

/// `navigator.clipboard.writeText(text)`.
async fn write_clipboard(text: &str) -> Result<(), ClipboardError> {
    let window = web_sys::window().ok_or(ClipboardError::Unavailable)?;
    let navigator = window.navigator();
    let clipboard = js_sys::Reflect::get(&navigator, &JsValue::from_str("clipboard"))
        .ok()
        .filter(|clipboard| !clipboard.is_undefined())
        .ok_or(ClipboardError::Unavailable)?;
    let write_text = js_sys::Reflect::get(&clipboard, &JsValue::from_str("writeText"))
        .ok()
        .and_then(|f| f.dyn_into::<js_sys::Function>().ok())
        .ok_or(ClipboardError::Unavailable)?;

    let promise = write_text
        .call1(&clipboard, &JsValue::from_str(text))
        .map_err(|e| ClipboardError::Rejected(format!("{:?}", e)))?
        .dyn_into::<js_sys::Promise>()
        .map_err(|_| ClipboardError::Rejected("writeText returned no promise".to_string()))?;

    JsFuture::from(promise)
        .await
        .map(|_| ())
        .map_err(|e| ClipboardError::Rejected(format!("{:?}", e)))
}

fn closest_attr(element: &Element, attr: &str) -> Option<String> {
    element
        .closest(&format!("[{}]", attr))
        .ok()
        .flatten()
        .and_then(|found| found.get_attribute(attr))
}

fn focus_context(document: &Document) -> KeyContext {
    let Some(active) = document.active_element() else {
        return KeyContext::Page;
    };
    if active.id() == POPUP_INPUT_ID {
        return KeyContext::PopupInput;
    }
    let editable = active
        .dyn_ref::<HtmlElement>()
        .is_some_and(HtmlElement::is_content_editable);
    match active.tag_name().as_str() {
        "INPUT" | "TEXTAREA" | "SELECT" => KeyContext::OtherInput,
        _ if editable => KeyContext::OtherInput,
        _ => KeyContext::Page,
    }
}

fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

fn px(value: f32) -> String {
    format!("{}px", value)
}

// ============================================================================
// Rendering
// ============================================================================

impl App {
    /// Chrome elements and pointer targets on the page.
    ///
    /// Returns `None` for the document root, which is never a target.
    fn classify(&self, element: &Element) -> Option<PointerTarget> {
        if let Some(id) = closest_attr(element, MARKER_ATTR).and_then(|raw| raw.parse().ok()) {
            return Some(PointerTarget::Chrome(ChromePart::Marker(id)));
        }
        let within = |selector: &str| element.closest(selector).ok().flatten().is_some();
        if within("#agn-popup") {
            return Some(PointerTarget::Chrome(ChromePart::Popup));
        }
        if within("#agn-panel") {
            return Some(PointerTarget::Chrome(ChromePart::Panel));
        }
        if within("#agn-root") {
            return Some(PointerTarget::Chrome(ChromePart::Toolbar));
        }

        let surface = self.engine.surface();
        let node = surface.register(element);
        (node != surface.root()).then_some(PointerTarget::Node(node))
    }

    fn focus_row(&mut self, id: AnnotationId) {
        match self.engine.focus_record(id) {
            Ok(node) => {
                if let Some(element) = self.engine.surface().element(node) {
                    let options = ScrollIntoViewOptions::new();
                    options.set_behavior(ScrollBehavior::Smooth);
                    options.set_block(ScrollLogicalPosition::Center);
                    element.scroll_into_view_with_scroll_into_view_options(&options);
                }
            }
            Err(e) => log::warn!("Cannot focus annotation {}: {}", id, e),
        }
    }

    fn part(&self, id: &str) -> Result<HtmlElement, JsValue> {
        self.document
            .get_element_by_id(id)
            .ok_or_else(|| JsValue::from_str(&format!("missing #{}", id)))?
            .dyn_into::<HtmlElement>()
            .map_err(JsValue::from)
    }

    fn render(&mut self) {
        let scene = self.engine.overlays().clone();
        if let Err(e) = self.render_scene(&scene) {
            log::error!("Overlay render failed: {:?}", e);
        }
    }

    fn render_scene(&mut self, scene: &OverlayScene) -> Result<(), JsValue> {
        self.chrome
            .class_list()
            .toggle_with_force("agn-active", self.engine.is_active())?;

        let count = self.engine.badge_count();
        let badge = self.part("agn-badge")?;
        badge.set_text_content((count > 0).then(|| count.to_string()).as_deref());

        let copy = self.part("agn-copy")?;
        let icon = self.engine.copy_feedback().map_or(COPY_ICON, |pulse| pulse.icon());
        copy.set_text_content(Some(icon));

        self.render_markers(scene)?;
        self.render_highlight(scene.highlight)?;
        self.render_popup(scene.popup.as_ref())?;
        self.render_tooltip(scene)?;
        self.render_panel()
    }

    fn render_markers(&self, scene: &OverlayScene) -> Result<(), JsValue> {
        let container = self.part("agn-markers")?;

        let existing = container.children();
        let stale: Vec<Element> = (0..existing.length())
            .filter_map(|i| existing.item(i))
            .filter(|element| {
                let key = element
                    .get_attribute(MARKER_ATTR)
                    .and_then(|raw| raw.parse::<AnnotationId>().ok());
                !key.is_some_and(|key| scene.marker(key).is_some_and(|m| m.is_visible()))
            })
            .collect();
        for element in stale {
            element.remove();
        }

        for marker in &scene.markers {
            let Some(bounds) = marker.bounds() else {
                continue;
            };
            let selector = format!("[{}=\"{}\"]", MARKER_ATTR, marker.key);
            let element = match container.query_selector(&selector)? {
                Some(element) => element,
                None => {
                    let element = self.document.create_element("div")?;
                    element.set_attribute(MARKER_ATTR, &marker.key.to_string())?;
                    element.set_text_content(Some(&marker.key.to_string()));
                    container.append_child(&element)?;
                    element
                }
            };
            element.set_class_name(if marker.editing {
                "agn-marker agn-editing"
            } else {
                "agn-marker"
            });
            let style = element.dyn_into::<HtmlElement>()?.style();
            style.set_property("left", &px(bounds.x))?;
            style.set_property("top", &px(bounds.y))?;
        }
        Ok(())
    }

    fn render_highlight(&self, highlight: Option<ViewportRect>) -> Result<(), JsValue> {
        let element = self.part("agn-highlight")?;
        let style = element.style();
        let Some(rect) = highlight else {
            return style.set_property("display", "none");
        };
        style.set_property("display", "block")?;
        style.set_property("left", &px(rect.x))?;
        style.set_property("top", &px(rect.y))?;
        style.set_property("width", &px(rect.width))?;
        style.set_property("height", &px(rect.height))
    }

    fn render_popup(&mut self, popup: Option<&PopupOverlay>) -> Result<(), JsValue> {
        let element = self.part("agn-popup")?;
        let style = element.style();
        let key = self
            .engine
            .session()
            .map(|session| format!("{:?}@{}", session.kind, session.target));

        let (Some(popup), Some(key)) = (popup, key) else {
            self.popup_key = None;
            element.set_inner_html("");
            return style.set_property("display", "none");
        };

        let rect = popup.placement.rect();
        style.set_property("display", "block")?;
        style.set_property("left", &px(rect.x))?;
        style.set_property("top", &px(rect.y))?;
        style.set_property("width", &px(rect.width))?;
        style.set_property("min-height", &px(rect.height))?;

        if self.popup_key.as_deref() == Some(key.as_str()) {
            return Ok(());
        }

        let delete = if popup.existing {
            r#"<button data-agn-action="delete">Delete</button>"#
        } else {
            ""
        };
        element.set_inner_html(&format!(
            "<div class=\"agn-popup-title\">{}</div>\
             <textarea id=\"{}\" rows=\"4\" placeholder=\"What should change?\"></textarea>\
             <div class=\"agn-popup-actions\">{}\
             <button data-agn-action=\"cancel\">Cancel</button>\
             <button data-agn-action=\"save\">{}</button></div>",
            escape_html(&popup.label),
            POPUP_INPUT_ID,
            delete,
            if popup.existing { "Save" } else { "Add" },
        ));
        let input = self
            .part(POPUP_INPUT_ID)?
            .dyn_into::<HtmlTextAreaElement>()
            .map_err(JsValue::from)?;
        input.set_value(&popup.draft);
        input.focus()?;
        self.popup_key = Some(key);
        Ok(())
    }

    fn render_tooltip(&self, scene: &OverlayScene) -> Result<(), JsValue> {
        let element = self.part("agn-tooltip")?;
        let style = element.style();
        let Some(tooltip) = &scene.tooltip else {
            return style.set_property("display", "none");
        };

        let rect = tooltip.placement.rect();
        element.set_inner_html(&format!(
            "<span class=\"agn-tooltip-arrow\" style=\"left:{}\"></span>{}",
            px(tooltip.placement.arrow_left),
            escape_html(&tooltip.text)
        ));
        style.set_property("display", "block")?;
        style.set_property("left", &px(rect.x))?;
        style.set_property("top", &px(rect.y))?;
        style.set_property("width", &px(rect.width))
    }

    fn render_panel(&self) -> Result<(), JsValue> {
        let element = self.part("agn-panel")?;
        if !self.engine.is_panel_open() {
            return element.style().set_property("display", "none");
        }

        let rows = self.engine.panel_rows();
        let html = if rows.is_empty() {
            format!("<div class=\"agn-empty\">{}</div>", PANEL_EMPTY_MESSAGE)
        } else {
            rows.iter()
                .map(|row| {
                    format!(
                        "<div class=\"agn-row\" {}=\"{}\"><b>{}</b><code>{}</code>{}</div>",
                        ROW_ATTR,
                        row.id,
                        row.id,
                        escape_html(&row.structural_path),
                        escape_html(&row.comment)
                    )
                })
                .collect()
        };
        element.set_inner_html(&html);
        element.style().set_property("display", "block")
    }
}

//! The overlay annotation engine.
//!
//! One [`Engine`] is created per attached host surface and owns everything
//! that used to be global: the mode flag, the record store, the open session,
//! hover and tooltip targets, the panel and the frame scheduler. Several
//! engines can run side by side without sharing state.
//!
//! Interaction events (pointer, keyboard, toolbar actions) are handled to
//! completion and leave [`Engine::overlays`] up to date. Scroll and resize
//! signals go through [`Engine::notify_geometry_changed`], which coalesces
//! them into a single [`Engine::run_frame`] pass per frame.

#[cfg(test)]
mod tests;

use agentation_ui::placement::{
    highlight_rect, marker_position, place_popup, place_tooltip, tooltip_size,
};
use agentation_ui::projection::to_page_space;
use agentation_ui::{
    FrameScheduler, Key, MarkerOverlay, Modifiers, OverlayScene, PopupOverlay, SubscriptionId,
    TooltipOverlay, ViewportRect,
};

use crate::config::AgentationConfig;
use crate::error::{ClipboardError, EngineError};
use crate::export::{ExportError, ReportFormat, export_markdown};
use crate::feedback::{Clipboard, CopyFeedback, CopyPulse};
use crate::host::{NodeId, Surface};
use crate::interaction::{
    ActiveState, ChromePart, CommitOutcome, EventDisposition, InteractionState, KeyContext,
    PointerTarget, Session, SessionKind,
};
use crate::model::{AnnotationId, AnnotationRecord, NodeSnapshot};
use crate::panel::{PanelRow, PanelState, panel_rows};
use crate::path::resolve_label;
use crate::store::{AnnotationStore, StoreChange};

/// Annotation engine bound to one host surface.
#[derive(Debug)]
pub struct Engine<S: Surface> {
    surface: S,
    config: AgentationConfig,
    store: AnnotationStore,
    active: bool,
    hover: Option<NodeId>,
    session: Option<Session>,
    /// Record whose marker is hovered
    tooltip: Option<AnnotationId>,
    panel: PanelState,
    scheduler: FrameScheduler,
    feedback: CopyFeedback,
    scene: OverlayScene,
}

impl<S: Surface> Engine<S> {
    pub fn new(surface: S, config: AgentationConfig) -> Self {
        let mut engine = Self {
            surface,
            config,
            store: AnnotationStore::new(),
            active: false,
            hover: None,
            session: None,
            tooltip: None,
            panel: PanelState::default(),
            scheduler: FrameScheduler::new(),
            feedback: CopyFeedback::new(),
            scene: OverlayScene::new(),
        };
        engine.recompute();
        engine
    }

    /// Engine with the default configuration.
    pub fn with_defaults(surface: S) -> Self {
        Self::new(surface, AgentationConfig::default())
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    /// Mutable access to the host surface.
    ///
    /// Geometry changes made through this handle are picked up by the next
    /// frame pass; call [`Engine::notify_geometry_changed`] afterwards.
    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    pub fn config(&self) -> &AgentationConfig {
        &self.config
    }

    // ========================================================================
    // State
    // ========================================================================

    /// Observable state. An open session takes precedence over hover.
    pub fn state(&self) -> InteractionState {
        if !self.active {
            return InteractionState::Inactive;
        }
        let sub = match (&self.session, self.hover) {
            (Some(session), _) => match session.kind {
                SessionKind::New => ActiveState::EditingNew(session.target),
                SessionKind::Existing(id) => ActiveState::EditingExisting(id),
            },
            (None, Some(node)) => ActiveState::Hovering(node),
            (None, None) => ActiveState::Idle,
        };
        InteractionState::Active(sub)
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn session(&self) -> Option<&Session> {
        self.session.as_ref()
    }

    /// Current overlay scene.
    pub fn overlays(&self) -> &OverlayScene {
        &self.scene
    }

    // ========================================================================
    // Mode & Sessions
    // ========================================================================

    /// Switch between inactive and active mode. Returns the new mode.
    ///
    /// Leaving active mode discards hover, the open session and the tooltip.
    pub fn toggle_mode(&mut self) -> bool {
        self.active = !self.active;
        if !self.active {
            self.hover = None;
            self.session = None;
            self.tooltip = None;
        }
        log::debug!(
            "Annotation mode {}",
            if self.active { "ON" } else { "OFF" }
        );
        self.recompute();
        self.active
    }

    /// Open a new-annotation session on `node`, replacing any open session.
    pub fn open_new_session(&mut self, node: NodeId) -> Result<(), EngineError> {
        if !self.active {
            return Err(EngineError::Inactive);
        }
        self.check_target(node)?;

        self.hover = None;
        self.session = Some(Session::new_annotation(node));
        log::debug!("Opened new session on {}", node);
        self.recompute();
        Ok(())
    }

    /// Open an edit session for record `id`, replacing any open session.
    pub fn open_edit_session(&mut self, id: AnnotationId) -> Result<(), EngineError> {
        if !self.active {
            return Err(EngineError::Inactive);
        }
        let record = self
            .store
            .get(id)
            .ok_or(EngineError::UnknownAnnotation(id))?;
        let session = Session::edit(id, record.target, &record.comment);
        self.check_target(session.target)?;

        self.hover = None;
        self.tooltip = None;
        self.session = Some(session);
        log::debug!("Opened edit session for annotation {}", id);
        self.recompute();
        Ok(())
    }

    /// Replace the draft text of the open session.
    pub fn update_draft(&mut self, text: &str) -> Result<(), EngineError> {
        let session = self.session.as_mut().ok_or(EngineError::NoSession)?;
        session.draft = text.to_string();
        if let Some(popup) = self.scene.popup.as_mut() {
            popup.draft = text.to_string();
        }
        Ok(())
    }

    /// Commit the open session with `text`.
    ///
    /// Empty text cancels. A session whose node has left the tree is
    /// discarded without touching the store.
    pub fn commit(&mut self, text: &str) -> CommitOutcome {
        let Some(session) = self.session.take() else {
            return CommitOutcome::NoSession;
        };
        self.hover = None;

        let outcome = if text.trim().is_empty() {
            CommitOutcome::Cancelled
        } else {
            match session.kind {
                SessionKind::Existing(id) => {
                    if let Err(e) = self.check_target(session.target) {
                        log::warn!("Discarding edit of annotation {}: {}", id, e);
                        CommitOutcome::Discarded
                    } else if self.store.update(id, text) {
                        CommitOutcome::Updated(id)
                    } else {
                        log::warn!("Annotation {} vanished while being edited", id);
                        CommitOutcome::Discarded
                    }
                }
                SessionKind::New => self.create_record(session.target, text),
            }
        };

        log::debug!("Commit: {:?}", outcome);
        self.recompute();
        outcome
    }

    /// Commit the open session with its current draft.
    pub fn commit_draft(&mut self) -> CommitOutcome {
        let draft = match &self.session {
            Some(session) => session.draft.clone(),
            None => return CommitOutcome::NoSession,
        };
        self.commit(&draft)
    }

    fn create_record(&mut self, target: NodeId, text: &str) -> CommitOutcome {
        let snapshot = NodeSnapshot::capture(
            &self.surface,
            target,
            &self.config.paths,
            self.config.preferences.snippet_max_chars,
        );
        match snapshot {
            Ok(snapshot) => match self.store.create(target, snapshot, text) {
                Some(id) => CommitOutcome::Created(id),
                None => CommitOutcome::Cancelled,
            },
            Err(e) => {
                log::warn!("Discarding session: {}", e);
                CommitOutcome::Discarded
            }
        }
    }

    /// Discard the open session. Returns false if none was open.
    pub fn cancel_session(&mut self) -> bool {
        let had_session = self.session.take().is_some();
        self.hover = None;
        if had_session {
            log::debug!("Session cancelled");
        }
        self.recompute();
        had_session
    }

    // ========================================================================
    // Records
    // ========================================================================

    /// Delete record `id`. Idempotent.
    ///
    /// Closes the open session only if it is editing this record.
    pub fn delete_record(&mut self, id: AnnotationId) -> bool {
        let deleted = self.store.delete(id);
        if self.session.as_ref().and_then(Session::editing_id) == Some(id) {
            self.session = None;
            self.hover = None;
        }
        if self.tooltip == Some(id) {
            self.tooltip = None;
        }
        self.recompute();
        deleted
    }

    /// Popup delete button: delete the record being edited and close the session.
    pub fn delete_current(&mut self) -> bool {
        match self.session.as_ref().and_then(Session::editing_id) {
            Some(id) => self.delete_record(id),
            None => false,
        }
    }

    /// Remove every record and reset ids. Returns the number removed.
    pub fn clear_all(&mut self) -> usize {
        let removed = self.store.clear();
        self.session = None;
        self.hover = None;
        self.tooltip = None;
        self.recompute();
        removed
    }

    /// Toolbar clear: asks `confirm` with the record count first.
    ///
    /// Nothing is asked and nothing changes when there are no records.
    pub fn clear_confirmed<F>(&mut self, confirm: F) -> usize
    where
        F: FnOnce(usize) -> bool,
    {
        let count = self.store.list().len();
        if count == 0 || !confirm(count) {
            return 0;
        }
        self.clear_all()
    }

    /// Records in creation order.
    pub fn list(&self) -> &[AnnotationRecord] {
        self.store.list()
    }

    pub fn get(&self, id: AnnotationId) -> Option<&AnnotationRecord> {
        self.store.get(id)
    }

    pub fn export_markdown(&self) -> String {
        export_markdown(self.store.list())
    }

    /// Render the records with any report format.
    pub fn export(&self, format: &dyn ReportFormat) -> Result<String, ExportError> {
        format.render(self.store.list())
    }

    /// Register a store change listener (badge and panel refresh).
    pub fn subscribe<F>(&mut self, listener: F) -> SubscriptionId
    where
        F: FnMut(&StoreChange) + 'static,
    {
        self.store.subscribe(listener)
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.store.unsubscribe(id)
    }

    // ========================================================================
    // Pointer & Keyboard
    // ========================================================================

    /// Pointer entered `target`.
    pub fn pointer_enter(&mut self, target: PointerTarget) {
        match target {
            PointerTarget::Node(node) => {
                if !self.active {
                    return;
                }
                self.hover = self.surface.is_attached(node).then_some(node);
            }
            PointerTarget::Chrome(ChromePart::Marker(id)) => {
                if self.editing_id() == Some(id) {
                    return;
                }
                self.tooltip = Some(id);
            }
            PointerTarget::Chrome(_) => return,
        }
        self.recompute();
    }

    /// Pointer left `target`.
    pub fn pointer_leave(&mut self, target: PointerTarget) {
        match target {
            PointerTarget::Node(node) => {
                if !self.active || self.hover != Some(node) {
                    return;
                }
                self.hover = None;
            }
            PointerTarget::Chrome(ChromePart::Marker(id)) => {
                if self.tooltip != Some(id) {
                    return;
                }
                self.tooltip = None;
            }
            PointerTarget::Chrome(_) => return,
        }
        self.recompute();
    }

    /// Pointer click on `target`.
    ///
    /// While active, clicks on host nodes are always consumed so they never
    /// reach the host surface, even if the session cannot be opened.
    pub fn click(&mut self, target: PointerTarget) -> EventDisposition {
        // Markers open their editor in any mode
        if let PointerTarget::Chrome(ChromePart::Marker(id)) = target {
            self.tooltip = None;
            if let Err(e) = self.focus_record(id) {
                log::warn!("Marker click ignored: {}", e);
                self.recompute();
            }
            return EventDisposition::Consumed;
        }
        if !self.active {
            return EventDisposition::PassThrough;
        }
        match target {
            PointerTarget::Node(node) => {
                if let Err(e) = self.open_new_session(node) {
                    log::warn!("Click ignored: {}", e);
                }
                EventDisposition::Consumed
            }
            PointerTarget::Chrome(_) => EventDisposition::PassThrough,
        }
    }

    /// Key pressed with focus in `context`.
    pub fn key_down(
        &mut self,
        key: Key,
        modifiers: Modifiers,
        context: KeyContext,
    ) -> EventDisposition {
        let bindings = &self.config.keybindings;
        let is_toggle = bindings.is_toggle(key, modifiers);
        let is_commit = bindings.is_commit(key, modifiers);
        let is_cancel = bindings.is_cancel(key);

        match context {
            KeyContext::OtherInput => EventDisposition::PassThrough,
            KeyContext::PopupInput => {
                if is_commit {
                    self.commit_draft();
                    EventDisposition::Consumed
                } else if is_cancel {
                    self.cancel_session();
                    EventDisposition::Consumed
                } else {
                    EventDisposition::PassThrough
                }
            }
            KeyContext::Page => {
                if is_toggle {
                    self.toggle_mode();
                    EventDisposition::Consumed
                } else if is_cancel && self.active {
                    if self.session.is_some() {
                        self.cancel_session();
                    } else {
                        self.toggle_mode();
                    }
                    EventDisposition::Consumed
                } else {
                    EventDisposition::PassThrough
                }
            }
        }
    }

    // ========================================================================
    // Sync Scheduler
    // ========================================================================

    /// Record a scroll/resize/re-flow signal.
    ///
    /// Returns true when the host must schedule [`Engine::run_frame`] for the
    /// next frame; false when a pass is already pending.
    pub fn notify_geometry_changed(&mut self) -> bool {
        self.scheduler.notify()
    }

    /// Deferred frame task. Runs at most one recomputation pass.
    pub fn run_frame(&mut self) -> bool {
        if !self.scheduler.take_pending() {
            return false;
        }
        self.recompute();
        true
    }

    pub fn scheduler(&self) -> &FrameScheduler {
        &self.scheduler
    }

    // ========================================================================
    // Panel, Badge, Copy
    // ========================================================================

    pub fn toggle_panel(&mut self) -> bool {
        let open = self.panel.toggle();
        log::debug!("Panel {}", if open { "opened" } else { "closed" });
        open
    }

    pub fn is_panel_open(&self) -> bool {
        self.panel.is_open()
    }

    pub fn panel_rows(&self) -> Vec<PanelRow> {
        panel_rows(self.store.list())
    }

    /// Number shown on the toolbar badge.
    pub fn badge_count(&self) -> usize {
        self.store.len()
    }

    /// Panel row or marker click: activate the mode if needed and open the
    /// edit session.
    ///
    /// Returns the record's node so the host can scroll it into view.
    pub fn focus_record(&mut self, id: AnnotationId) -> Result<NodeId, EngineError> {
        let target = self
            .store
            .get(id)
            .map(|record| record.target)
            .ok_or(EngineError::UnknownAnnotation(id))?;
        self.check_target(target)?;
        if !self.active {
            self.toggle_mode();
        }
        self.open_edit_session(id)?;
        Ok(target)
    }

    /// Copy the Markdown report to `clipboard` and start the feedback pulse.
    pub fn copy_markdown(&mut self, clipboard: &mut dyn Clipboard) -> CopyPulse {
        match self.begin_copy() {
            Some(report) => self.finish_copy(clipboard.write_text(&report)),
            None => CopyPulse::Empty,
        }
    }

    /// First half of an asynchronous copy.
    ///
    /// Returns the report to write, or `None` (showing the empty pulse) when
    /// there is nothing to copy.
    pub fn begin_copy(&mut self) -> Option<String> {
        if self.store.is_empty() {
            self.feedback.show(CopyPulse::Empty);
            return None;
        }
        Some(self.export_markdown())
    }

    /// Second half of an asynchronous copy: report the clipboard outcome.
    pub fn finish_copy(&mut self, result: Result<(), ClipboardError>) -> CopyPulse {
        let pulse = match result {
            Ok(()) => CopyPulse::Copied,
            Err(e) => {
                log::error!("Copy failed: {}", e);
                CopyPulse::Failed
            }
        };
        self.feedback.show(pulse);
        pulse
    }

    /// The copy pulse still visible, if any.
    pub fn copy_feedback(&self) -> Option<CopyPulse> {
        self.feedback.current()
    }

    // ========================================================================
    // Recomputation
    // ========================================================================

    fn editing_id(&self) -> Option<AnnotationId> {
        self.session.as_ref().and_then(Session::editing_id)
    }

    fn check_target(&self, node: NodeId) -> Result<ViewportRect, EngineError> {
        if !self.surface.is_attached(node) {
            return Err(EngineError::NodeDetached(node));
        }
        self.surface
            .bounding_rect(node)
            .ok_or(EngineError::NoGeometry(node))
    }

    fn live_rect(&self, node: NodeId) -> Option<ViewportRect> {
        self.check_target(node).ok()
    }

    /// Rebuild the overlay scene from current state and geometry.
    ///
    /// Sessions and hover targets whose node has left the tree are dropped.
    fn recompute(&mut self) {
        let viewport = self.surface.viewport();
        let placement = &self.config.placement;

        let anchor = self.session.as_ref().map(|session| session.anchor);
        let popup_anchor = anchor.and_then(|anchor| {
            let rect = self.live_rect(anchor);
            if rect.is_none() {
                log::warn!("Popup anchor {} detached, discarding session", anchor);
            }
            rect
        });
        if anchor.is_some() && popup_anchor.is_none() {
            self.session = None;
        }

        let highlight_node = self.hover.and_then(|node| self.live_rect(node));
        if highlight_node.is_none() {
            self.hover = None;
        }

        let editing = self.editing_id();
        let markers: Vec<MarkerOverlay> = self
            .store
            .list()
            .iter()
            .map(|record| MarkerOverlay {
                key: record.id,
                position: self
                    .live_rect(record.target)
                    .map(|rect| marker_position(to_page_space(rect, viewport.scroll))),
                editing: editing == Some(record.id),
            })
            .collect();

        let popup = match (&self.session, popup_anchor) {
            (Some(session), Some(rect)) => {
                let label = match session.kind {
                    SessionKind::New => {
                        resolve_label(&self.surface, session.target, &self.config.paths)
                    }
                    SessionKind::Existing(id) => self
                        .store
                        .get(id)
                        .map(AnnotationRecord::title)
                        .unwrap_or_default(),
                };
                Some(PopupOverlay {
                    placement: place_popup(rect, &viewport, placement),
                    label,
                    draft: session.draft.clone(),
                    existing: session.editing_id().is_some(),
                })
            }
            _ => None,
        };

        if self.tooltip.is_some_and(|id| editing == Some(id) || !self.store.contains(id)) {
            self.tooltip = None;
        }
        let tooltip = self.tooltip.and_then(|id| {
            let record = self.store.get(id)?;
            let marker = markers.iter().find(|m| m.key == id)?.position?;
            let text = format!("{}\n{}", record.title(), record.comment);
            let size = tooltip_size(&text, placement);
            Some(TooltipOverlay {
                key: id,
                placement: place_tooltip(marker, size, &viewport, placement),
                text,
            })
        });

        log::trace!(
            "Recomputed overlays: {} markers, popup={}, highlight={}, tooltip={}",
            markers.len(),
            popup.is_some(),
            highlight_node.is_some(),
            tooltip.is_some()
        );

        self.scene = OverlayScene {
            markers,
            popup,
            highlight: highlight_node.map(|rect| highlight_rect(rect, placement)),
            tooltip,
        };
    }
}

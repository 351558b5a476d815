//! Overlay placement and frame-coalesced sync.

use super::{Page, approx_eq, marker};
use crate::interaction::{ActiveState, InteractionState, PointerTarget};
use agentation_ui::{PagePoint, PageRect, PopupSide, ViewportRect};

#[test]
fn test_marker_sits_on_top_right_corner() {
    let page = Page::with_annotation(|p| p.hero, "first");
    let marker = page.engine.overlays().marker(1).unwrap();
    assert_eq!(marker.position, Some(PagePoint::new(1240.0, 100.0)));
    assert!(!marker.editing);
}

#[test]
fn test_markers_stable_in_page_space_under_scroll() {
    let mut page = Page::with_annotation(|p| p.hero, "first");
    let before = page.engine.overlays().marker(1).unwrap().position;

    page.scroll_to(0.0, 1200.0);
    let after = page.engine.overlays().marker(1).unwrap().position;
    assert_eq!(before, after);
}

#[test]
fn test_geometry_signals_coalesce_into_one_pass() {
    let mut page = Page::new();
    page.engine.surface_mut().scroll_to(0.0, 10.0);
    assert!(page.engine.notify_geometry_changed());
    page.engine.surface_mut().scroll_to(0.0, 20.0);
    assert!(!page.engine.notify_geometry_changed());
    page.engine.surface_mut().resize(1024.0, 700.0);
    assert!(!page.engine.notify_geometry_changed());

    assert!(page.engine.scheduler().is_pending());
    assert!(page.engine.run_frame());
    assert!(!page.engine.run_frame());
    assert_eq!(page.engine.scheduler().notifications(), 3);
    assert_eq!(page.engine.scheduler().passes(), 1);

    // The next signal schedules a fresh pass
    assert!(page.engine.notify_geometry_changed());
}

#[test]
fn test_skipped_frame_keeps_pass_pending_until_rerun() {
    let mut page = Page::with_annotation(|p| p.hero, "first");
    assert!(page.engine.notify_geometry_changed());

    // Host could not run the frame; signals stay coalesced on the pending pass
    page.engine.surface_mut().scroll_to(0.0, 300.0);
    assert!(!page.engine.notify_geometry_changed());
    assert!(page.engine.scheduler().is_pending());

    // Rescheduled frame runs the pass and reopens scheduling
    assert!(page.engine.run_frame());
    assert!(!page.engine.scheduler().is_pending());
    assert!(page.engine.notify_geometry_changed());
}

#[test]
fn test_reflow_is_picked_up_on_next_frame() {
    let mut page = Page::with_annotation(|p| p.first_item, "first");
    page.engine
        .surface_mut()
        .set_layout(page.first_item, PageRect::new(40.0, 520.0, 400.0, 40.0));
    // Stale until the pass runs
    assert_eq!(
        page.engine.overlays().marker(1).unwrap().position,
        Some(PagePoint::new(440.0, 420.0))
    );

    page.engine.notify_geometry_changed();
    page.engine.run_frame();
    assert_eq!(
        page.engine.overlays().marker(1).unwrap().position,
        Some(PagePoint::new(440.0, 520.0))
    );
    // The record keeps its creation-time anchor
    assert_eq!(page.engine.get(1).unwrap().anchor.y, 440);
}

#[test]
fn test_popup_right_of_narrow_node() {
    let mut page = Page::new();
    page.engine.toggle_mode();
    page.engine.click(PointerTarget::Node(page.second_item));

    let placement = page.engine.overlays().popup.as_ref().unwrap().placement;
    assert_eq!(placement.side, PopupSide::Right);
    assert_eq!(placement.origin, PagePoint::new(452.0, 460.0));
}

#[test]
fn test_popup_left_near_right_edge() {
    let mut page = Page::new();
    page.engine.toggle_mode();
    page.engine.click(PointerTarget::Node(page.button));

    let placement = page.engine.overlays().popup.as_ref().unwrap().placement;
    assert_eq!(placement.side, PopupSide::Left);
    assert_eq!(placement.origin, PagePoint::new(844.0, 700.0));
}

#[test]
fn test_popup_below_wide_node() {
    let mut page = Page::new();
    page.engine.toggle_mode();
    page.engine.click(PointerTarget::Node(page.hero));

    let placement = page.engine.overlays().popup.as_ref().unwrap().placement;
    assert_eq!(placement.side, PopupSide::Below);
    assert_eq!(placement.origin, PagePoint::new(40.0, 408.0));
    assert_eq!(placement.size.width, 244.0);
}

#[test]
fn test_popup_above_in_short_viewport() {
    let mut page = Page::new();
    page.engine.toggle_mode();
    page.engine.click(PointerTarget::Node(page.hero));

    page.engine.surface_mut().resize(1280.0, 400.0);
    page.engine.notify_geometry_changed();
    page.engine.run_frame();

    let placement = page.engine.overlays().popup.as_ref().unwrap().placement;
    assert_eq!(placement.side, PopupSide::Above);
    assert_eq!(placement.origin, PagePoint::new(40.0, -78.0));
}

#[test]
fn test_popup_follows_content_when_scrolled() {
    let mut page = Page::new();
    page.engine.toggle_mode();
    page.engine.click(PointerTarget::Node(page.hero));
    page.scroll_to(0.0, 50.0);

    let placement = page.engine.overlays().popup.as_ref().unwrap().placement;
    assert_eq!(placement.origin, PagePoint::new(40.0, 408.0));
}

#[test]
fn test_highlight_tracks_viewport_position() {
    let mut page = Page::new();
    page.engine.toggle_mode();
    page.engine.pointer_enter(PointerTarget::Node(page.hero));
    assert_eq!(
        page.engine.overlays().highlight,
        Some(ViewportRect::new(38.0, 98.0, 1204.0, 304.0))
    );

    page.scroll_to(0.0, 50.0);
    let highlight = page.engine.overlays().highlight.unwrap();
    assert!(approx_eq(highlight.y, 48.0));
}

#[test]
fn test_hover_inactive_draws_nothing() {
    let mut page = Page::new();
    page.engine.pointer_enter(PointerTarget::Node(page.hero));
    assert!(page.engine.overlays().highlight.is_none());
}

#[test]
fn test_detached_marker_is_hidden() {
    let mut page = Page::with_annotation(|p| p.note, "first");
    assert!(page.engine.overlays().marker(1).unwrap().is_visible());

    page.engine.surface_mut().detach(page.note);
    page.engine.notify_geometry_changed();
    page.engine.run_frame();

    let marker = page.engine.overlays().marker(1).unwrap();
    assert!(!marker.is_visible());
    assert!(marker.bounds().is_none());
    // Still listed and exported
    assert_eq!(page.engine.list().len(), 1);
}

#[test]
fn test_detached_popup_anchor_discards_session() {
    let mut page = Page::new();
    page.engine.toggle_mode();
    page.engine.click(PointerTarget::Node(page.note));
    page.engine.surface_mut().detach(page.note);
    page.engine.notify_geometry_changed();
    page.engine.run_frame();

    assert!(page.engine.session().is_none());
    assert!(page.engine.overlays().popup.is_none());
}

#[test]
fn test_detached_hover_is_cleared() {
    let mut page = Page::new();
    page.engine.toggle_mode();
    page.engine.pointer_enter(PointerTarget::Node(page.first_item));
    page.engine.surface_mut().detach(page.first_item);
    page.engine.notify_geometry_changed();
    page.engine.run_frame();

    assert!(page.engine.overlays().highlight.is_none());
    assert_eq!(
        page.engine.state(),
        InteractionState::Active(ActiveState::Idle)
    );
}

#[test]
fn test_marker_tooltip_is_clamped_inside_viewport() {
    let mut page = Page::with_annotation(|p| p.hero, "first");
    page.engine.pointer_enter(marker(1));

    let tooltip = page.engine.overlays().tooltip.as_ref().unwrap();
    assert_eq!(tooltip.key, 1);
    assert_eq!(tooltip.text, "[1] section.hero.dark\nfirst");

    // 21 chars * 12 * 0.6 + 2 * 10 padding
    let placement = tooltip.placement;
    assert!(approx_eq(placement.size.width, 171.2));
    assert!(approx_eq(placement.origin.x, 1280.0 - 8.0 - 171.2));
    assert!(approx_eq(placement.origin.y, 114.0));
    assert!(approx_eq(placement.arrow_left, 1240.0 - placement.origin.x));

    page.engine.pointer_leave(marker(1));
    assert!(page.engine.overlays().tooltip.is_none());
}

#[test]
fn test_tooltip_shown_while_inactive() {
    let mut page = Page::with_annotation(|p| p.first_item, "first");
    page.engine.toggle_mode();
    page.engine.pointer_enter(marker(1));
    assert!(page.engine.overlays().tooltip.is_some());
}

#[test]
fn test_tooltip_hidden_for_marker_being_edited() {
    let mut page = Page::with_annotation(|p| p.first_item, "first");
    page.engine.click(marker(1));
    assert!(page.engine.overlays().marker(1).unwrap().editing);

    page.engine.pointer_enter(marker(1));
    assert!(page.engine.overlays().tooltip.is_none());
}

#[test]
fn test_tooltip_closed_when_record_deleted() {
    let mut page = Page::with_annotation(|p| p.first_item, "first");
    page.engine.pointer_enter(marker(1));
    page.engine.delete_record(1);
    assert!(page.engine.overlays().tooltip.is_none());
}

//! List panel, badge and clipboard copy.

use super::Page;
use crate::export::{EMPTY_REPORT, JsonReport, REPORT_TITLE};
use crate::feedback::{CopyPulse, MemoryClipboard};
use crate::interaction::{InteractionState, PointerTarget, SessionKind};
use crate::panel::PanelRow;
use crate::error::{ClipboardError, EngineError};

fn two_records() -> Page {
    let mut page = Page::with_annotation(|p| p.hero, "fix spacing");
    page.engine.click(PointerTarget::Node(page.second_item));
    page.engine.commit("wrong color");
    page
}

#[test]
fn test_panel_toggle() {
    let mut page = Page::new();
    assert!(!page.engine.is_panel_open());
    assert!(page.engine.toggle_panel());
    assert!(page.engine.is_panel_open());
    assert!(!page.engine.toggle_panel());
}

#[test]
fn test_panel_rows_follow_list_order() {
    let page = two_records();
    let rows = page.engine.panel_rows();
    assert_eq!(
        rows,
        vec![
            PanelRow {
                id: 1,
                structural_path: "body > main.content > section.hero.dark".to_string(),
                comment: "fix spacing".to_string(),
            },
            PanelRow {
                id: 2,
                structural_path: "body > main.content > ul.menu > li:nth-of-type(2)".to_string(),
                comment: "wrong color".to_string(),
            },
        ]
    );
    assert_eq!(page.engine.badge_count(), 2);
}

#[test]
fn test_badge_tracks_mutations() {
    let mut page = two_records();
    page.engine.delete_record(1);
    assert_eq!(page.engine.badge_count(), 1);
    page.engine.clear_all();
    assert_eq!(page.engine.badge_count(), 0);
    assert!(page.engine.panel_rows().is_empty());
}

#[test]
fn test_clear_asks_with_record_count() {
    let mut page = two_records();

    let mut asked = None;
    let removed = page.engine.clear_confirmed(|count| {
        asked = Some(count);
        false
    });
    assert_eq!(asked, Some(2));
    assert_eq!(removed, 0);
    assert_eq!(page.engine.badge_count(), 2);

    assert_eq!(page.engine.clear_confirmed(|_| true), 2);
    assert!(page.engine.list().is_empty());
}

#[test]
fn test_clear_on_empty_store_does_not_ask() {
    let mut page = Page::new();
    let removed = page
        .engine
        .clear_confirmed(|_| panic!("nothing to confirm"));
    assert_eq!(removed, 0);
}

#[test]
fn test_focus_record_activates_and_opens_edit() {
    let mut page = two_records();
    page.engine.toggle_mode();
    assert_eq!(page.engine.state(), InteractionState::Inactive);

    let target = page.engine.focus_record(2).unwrap();
    assert_eq!(target, page.second_item);
    assert!(page.engine.is_active());
    assert_eq!(page.engine.session().unwrap().kind, SessionKind::Existing(2));

    // The host scrolls the node into view, then runs a frame
    page.engine.surface_mut().scroll_into_view(target);
    page.engine.notify_geometry_changed();
    page.engine.run_frame();
    assert!(page.engine.overlays().popup.is_some());
}

#[test]
fn test_focus_unknown_record() {
    let mut page = Page::new();
    assert_eq!(
        page.engine.focus_record(9),
        Err(EngineError::UnknownAnnotation(9))
    );
    assert!(!page.engine.is_active());
}

#[test]
fn test_focus_detached_record_keeps_mode() {
    let mut page = two_records();
    page.engine.toggle_mode();
    page.engine.surface_mut().detach(page.hero);

    assert_eq!(
        page.engine.focus_record(1),
        Err(EngineError::NodeDetached(page.hero))
    );
    assert!(!page.engine.is_active());
    assert!(page.engine.session().is_none());
}

#[test]
fn test_copy_empty_store() {
    let mut page = Page::new();
    let mut clipboard = MemoryClipboard::new();
    assert_eq!(page.engine.copy_markdown(&mut clipboard), CopyPulse::Empty);
    assert!(clipboard.contents().is_none());
    assert_eq!(page.engine.copy_feedback(), Some(CopyPulse::Empty));
    assert_eq!(page.engine.export_markdown(), EMPTY_REPORT);
}

#[test]
fn test_copy_writes_report() {
    let mut page = two_records();
    let mut clipboard = MemoryClipboard::new();
    assert_eq!(page.engine.copy_markdown(&mut clipboard), CopyPulse::Copied);

    let copied = clipboard.contents().unwrap();
    assert!(copied.starts_with(REPORT_TITLE));
    assert_eq!(copied, page.engine.export_markdown());
    assert!(copied.contains("### [2] li.item"));
    assert_eq!(page.engine.copy_feedback(), Some(CopyPulse::Copied));
}

#[test]
fn test_copy_failure_shows_failed_pulse() {
    let mut page = two_records();
    let mut clipboard = MemoryClipboard::new();
    clipboard.fail = true;
    assert_eq!(page.engine.copy_markdown(&mut clipboard), CopyPulse::Failed);
    assert_eq!(page.engine.copy_feedback(), Some(CopyPulse::Failed));
}

#[test]
fn test_async_copy_halves() {
    let mut page = two_records();
    let report = page.engine.begin_copy().unwrap();
    assert_eq!(report, page.engine.export_markdown());
    assert_eq!(
        page.engine
            .finish_copy(Err(ClipboardError::Unavailable)),
        CopyPulse::Failed
    );
    assert_eq!(page.engine.finish_copy(Ok(())), CopyPulse::Copied);

    page.engine.clear_all();
    assert!(page.engine.begin_copy().is_none());
    assert_eq!(page.engine.copy_feedback(), Some(CopyPulse::Empty));
}

#[test]
fn test_json_export_through_engine() {
    let page = two_records();
    let json = page.engine.export(&JsonReport).unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(value.as_array().unwrap().len(), 2);
    assert_eq!(value[1]["comment"], "wrong color");
}

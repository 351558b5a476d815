//! Tests for the JSON report.

use super::record;
use crate::export::{JsonReport, ReportFormat, ReportRegistry};

#[test]
fn test_json_format_metadata() {
    let format = JsonReport;
    assert_eq!(format.id(), "json");
    assert_eq!(format.extension(), "json");
}

#[test]
fn test_json_renders_records_without_node_handle() {
    let output = JsonReport
        .render(&[record(1, "div", "fix spacing")])
        .unwrap();
    let value: serde_json::Value = serde_json::from_str(&output).unwrap();

    let first = &value[0];
    assert_eq!(first["id"], 1);
    assert_eq!(first["comment"], "fix spacing");
    assert_eq!(first["anchor"]["x"], 100);
    assert!(first.get("target").is_none());
}

#[test]
fn test_json_empty_is_empty_array() {
    let output = JsonReport.render(&[]).unwrap();
    assert_eq!(output.trim(), "[]");
}

#[test]
fn test_registry_lists_builtin_formats() {
    let registry = ReportRegistry::new();
    assert_eq!(registry.ids(), vec!["markdown", "json"]);
    assert!(registry.get("markdown").is_some());
    assert!(registry.get("csv").is_none());
}

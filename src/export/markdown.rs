//! Markdown report.

use super::{ExportError, ReportFormat};
use crate::model::AnnotationRecord;

/// First line of a non-empty report.
pub const REPORT_TITLE: &str = "## Agentation Annotations";

/// The whole report when there is nothing to export.
pub const EMPTY_REPORT: &str = "// No annotations";

/// Render `records` as Markdown, one block per record in list order.
///
/// Output is byte-identical for identical input.
pub fn export_markdown(records: &[AnnotationRecord]) -> String {
    if records.is_empty() {
        return EMPTY_REPORT.to_string();
    }

    let mut lines = vec![REPORT_TITLE.to_string(), String::new()];
    for record in records {
        push_block(&mut lines, record);
    }
    lines.join("\n")
}

fn push_block(lines: &mut Vec<String>, record: &AnnotationRecord) {
    lines.push(format!("### {}", record.title()));
    lines.push(format!("- **Selector:** `{}`", record.structural_path));
    lines.push(format!("- **Tag:** {}", record.tag_name));
    if !record.snippet.is_empty() {
        lines.push(format!("- **Text:** {}", record.snippet));
    }
    if !record.class_tags.is_empty() {
        lines.push(format!("- **Classes:** {}", record.class_tags.join(" ")));
    }
    lines.push(format!(
        "- **Position:** x:{} y:{}",
        record.anchor.x, record.anchor.y
    ));
    lines.push(format!("- **Comment:** {}", record.comment));
    lines.push(String::new());
}

/// Markdown report format.
#[derive(Debug, Clone, Copy, Default)]
pub struct MarkdownReport;

impl ReportFormat for MarkdownReport {
    fn id(&self) -> &'static str {
        "markdown"
    }

    fn display_name(&self) -> &'static str {
        "Markdown"
    }

    fn extension(&self) -> &'static str {
        "md"
    }

    fn render(&self, records: &[AnnotationRecord]) -> Result<String, ExportError> {
        Ok(export_markdown(records))
    }
}

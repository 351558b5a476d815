//! JSON report: the records as a pretty-printed array.

use super::{ExportError, ReportFormat};
use crate::model::AnnotationRecord;

/// JSON report format. Node handles are not serialized.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonReport;

impl ReportFormat for JsonReport {
    fn id(&self) -> &'static str {
        "json"
    }

    fn display_name(&self) -> &'static str {
        "JSON"
    }

    fn extension(&self) -> &'static str {
        "json"
    }

    fn render(&self, records: &[AnnotationRecord]) -> Result<String, ExportError> {
        Ok(serde_json::to_string_pretty(records)?)
    }
}

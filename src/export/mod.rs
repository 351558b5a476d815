//! Report export.
//!
//! Reports are produced through the [`ReportFormat`] trait so the toolbar can
//! offer more than one format. Markdown is the primary format and is what the
//! copy button puts on the clipboard.
//!
//! ```rust,ignore
//! use agentation::export::{ReportRegistry, ReportFormat};
//!
//! let registry = ReportRegistry::new();
//! let format = registry.get("markdown").unwrap();
//! let report = format.render(engine.list())?;
//! ```

mod json;
mod markdown;

#[cfg(test)]
mod tests;

pub use json::JsonReport;
pub use markdown::{EMPTY_REPORT, MarkdownReport, REPORT_TITLE, export_markdown};

use thiserror::Error;

use crate::model::AnnotationRecord;

/// Errors that can occur while rendering a report.
#[derive(Error, Debug)]
pub enum ExportError {
    /// JSON serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// A report format for annotation records.
pub trait ReportFormat {
    /// Unique identifier (e.g. "markdown", "json").
    fn id(&self) -> &'static str;

    /// Human-readable name for UI display.
    fn display_name(&self) -> &'static str;

    /// File extension without the dot.
    fn extension(&self) -> &'static str;

    /// Render `records` in list order.
    fn render(&self, records: &[AnnotationRecord]) -> Result<String, ExportError>;
}

/// Registry of the built-in report formats, in menu order.
pub struct ReportRegistry {
    formats: Vec<Box<dyn ReportFormat>>,
}

impl ReportRegistry {
    /// Create a new registry with all built-in formats registered.
    pub fn new() -> Self {
        let mut registry = Self {
            formats: Vec::new(),
        };
        registry.register(Box::new(MarkdownReport));
        registry.register(Box::new(JsonReport));
        registry
    }

    /// Register a format, replacing any format with the same id.
    pub fn register(&mut self, format: Box<dyn ReportFormat>) {
        self.formats.retain(|f| f.id() != format.id());
        self.formats.push(format);
    }

    pub fn get(&self, id: &str) -> Option<&dyn ReportFormat> {
        self.formats.iter().find(|f| f.id() == id).map(|f| f.as_ref())
    }

    pub fn all(&self) -> impl Iterator<Item = &dyn ReportFormat> {
        self.formats.iter().map(|f| f.as_ref())
    }

    pub fn ids(&self) -> Vec<&'static str> {
        self.formats.iter().map(|f| f.id()).collect()
    }
}

impl Default for ReportRegistry {
    fn default() -> Self {
        Self::new()
    }
}

//! List panel model: one row per record, in list order.

use crate::model::{AnnotationId, AnnotationRecord};

/// Shown instead of rows when the store is empty.
pub const PANEL_EMPTY_MESSAGE: &str = "No annotations yet";

/// One panel row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PanelRow {
    pub id: AnnotationId,
    pub structural_path: String,
    pub comment: String,
}

impl From<&AnnotationRecord> for PanelRow {
    fn from(record: &AnnotationRecord) -> Self {
        Self {
            id: record.id,
            structural_path: record.structural_path.clone(),
            comment: record.comment.clone(),
        }
    }
}

/// Build panel rows for `records`, preserving order.
pub fn panel_rows(records: &[AnnotationRecord]) -> Vec<PanelRow> {
    records.iter().map(PanelRow::from).collect()
}

/// Open/closed state of the list panel.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PanelState {
    open: bool,
}

impl PanelState {
    pub fn toggle(&mut self) -> bool {
        self.open = !self.open;
        self.open
    }

    pub fn is_open(&self) -> bool {
        self.open
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::NodeId;
    use crate::model::{AnchorPoint, NodeSnapshot};

    #[test]
    fn test_rows_follow_record_order() {
        let records: Vec<AnnotationRecord> = (1..=3)
            .map(|id| {
                AnnotationRecord::new(
                    id,
                    NodeId::new(id as u64),
                    NodeSnapshot {
                        structural_path: format!("body > div:nth-of-type({})", id),
                        short_label: "div".to_string(),
                        tag_name: "DIV".to_string(),
                        snippet: String::new(),
                        class_tags: Vec::new(),
                        anchor: AnchorPoint::default(),
                    },
                    format!("comment {}", id),
                )
            })
            .collect();

        let rows = panel_rows(&records);
        assert_eq!(rows.iter().map(|r| r.id).collect::<Vec<_>>(), vec![1, 2, 3]);
        assert_eq!(rows[1].structural_path, "body > div:nth-of-type(2)");
        assert_eq!(rows[2].comment, "comment 3");
    }

    #[test]
    fn test_toggle() {
        let mut panel = PanelState::default();
        assert!(panel.toggle());
        assert!(panel.is_open());
        assert!(!panel.toggle());
    }
}

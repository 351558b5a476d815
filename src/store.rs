//! Annotation store.
//!
//! Owns the authoritative record list (insertion order) and id allocation.
//! Every successful mutation emits exactly one [`StoreChange`] to subscribers;
//! no-op calls (empty comment, unknown id) emit nothing.

use agentation_ui::{Listeners, SubscriptionId};

use crate::host::NodeId;
use crate::model::{AnnotationId, AnnotationRecord, NodeSnapshot};

/// What changed in the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeKind {
    Created(AnnotationId),
    Updated(AnnotationId),
    Deleted(AnnotationId),
    Cleared,
}

/// Notification sent to store subscribers after a mutation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StoreChange {
    pub kind: ChangeKind,
    /// Number of records after the change (badge count)
    pub len: usize,
}

// ============================================================================
// Annotation Store
// ============================================================================

/// Ordered storage for annotation records.
#[derive(Debug, Default)]
pub struct AnnotationStore {
    /// Records in creation order.
    records: Vec<AnnotationRecord>,
    /// Last allocated id; 0 means none allocated since the last clear.
    counter: AnnotationId,
    listeners: Listeners<StoreChange>,
}

impl AnnotationStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a record for `target` and return its id.
    ///
    /// Returns `None` (and changes nothing) if `comment` is empty after trimming.
    pub fn create(
        &mut self,
        target: NodeId,
        snapshot: NodeSnapshot,
        comment: &str,
    ) -> Option<AnnotationId> {
        let comment = comment.trim();
        if comment.is_empty() {
            return None;
        }

        self.counter += 1;
        let id = self.counter;
        self.records
            .push(AnnotationRecord::new(id, target, snapshot, comment.to_string()));
        log::debug!("📌 Created annotation {} ({} total)", id, self.records.len());
        self.notify(ChangeKind::Created(id));
        Some(id)
    }

    /// Replace the comment of record `id`.
    ///
    /// Returns false if the id is unknown or the comment is empty after trimming.
    pub fn update(&mut self, id: AnnotationId, comment: &str) -> bool {
        let comment = comment.trim();
        if comment.is_empty() {
            return false;
        }
        let Some(record) = self.records.iter_mut().find(|r| r.id == id) else {
            return false;
        };
        record.comment = comment.to_string();
        log::debug!("Updated annotation {}", id);
        self.notify(ChangeKind::Updated(id));
        true
    }

    /// Remove record `id`. Idempotent: returns false if it did not exist.
    pub fn delete(&mut self, id: AnnotationId) -> bool {
        let Some(index) = self.records.iter().position(|r| r.id == id) else {
            return false;
        };
        self.records.remove(index);
        log::debug!("Deleted annotation {} ({} left)", id, self.records.len());
        self.notify(ChangeKind::Deleted(id));
        true
    }

    /// Remove every record and reset id allocation so the next id is 1.
    ///
    /// Returns the number of records removed.
    pub fn clear(&mut self) -> usize {
        let removed = self.records.len();
        let changed = removed > 0 || self.counter > 0;
        self.records.clear();
        self.counter = 0;
        if changed {
            log::debug!("Cleared {} annotations", removed);
            self.notify(ChangeKind::Cleared);
        }
        removed
    }

    /// Records in insertion order.
    pub fn list(&self) -> &[AnnotationRecord] {
        &self.records
    }

    pub fn get(&self, id: AnnotationId) -> Option<&AnnotationRecord> {
        self.records.iter().find(|r| r.id == id)
    }

    pub fn contains(&self, id: AnnotationId) -> bool {
        self.get(id).is_some()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Id the next successful `create` will allocate.
    pub fn next_id(&self) -> AnnotationId {
        self.counter + 1
    }

    /// Register a change listener.
    pub fn subscribe<F>(&mut self, listener: F) -> SubscriptionId
    where
        F: FnMut(&StoreChange) + 'static,
    {
        self.listeners.subscribe(listener)
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.listeners.unsubscribe(id)
    }

    fn notify(&mut self, kind: ChangeKind) {
        let change = StoreChange {
            kind,
            len: self.records.len(),
        };
        self.listeners.emit(&change);
    }
}

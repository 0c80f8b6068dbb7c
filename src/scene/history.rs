use std::collections::VecDeque;

use crate::scene::model::Document;

/// Default number of undo steps kept by [`History::default`].
pub const DEFAULT_HISTORY_CAPACITY: usize = 50;

#[derive(Debug, Clone)]
struct Snapshot {
    doc: Document,
    label: String,
}

/// Bounded undo/redo stacks of whole-document snapshots.
///
/// Callers [`push`](History::push) the current document *before* applying an edit. Undo hands
/// back the snapshot to make current and stores the document it replaces for redo.
#[derive(Debug, Clone)]
pub struct History {
    undo: VecDeque<Snapshot>,
    redo: Vec<Snapshot>,
    capacity: usize,
}

impl Default for History {
    fn default() -> Self {
        Self::with_capacity(DEFAULT_HISTORY_CAPACITY)
    }
}

impl History {
    /// A history keeping at most `capacity` undo steps (at least one).
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            undo: VecDeque::new(),
            redo: Vec::new(),
            capacity: capacity.max(1),
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Record `current` under `label` and drop everything redoable.
    pub fn push(&mut self, label: impl Into<String>, current: &Document) {
        if self.undo.len() == self.capacity {
            self.undo.pop_front();
        }
        self.undo.push_back(Snapshot {
            doc: current.clone(),
            label: label.into(),
        });
        self.redo.clear();
    }

    /// Step back: returns the document to make current, or `None` when there is nothing to undo.
    pub fn undo(&mut self, current: &Document) -> Option<Document> {
        let snap = self.undo.pop_back()?;
        self.redo.push(Snapshot {
            doc: current.clone(),
            label: snap.label.clone(),
        });
        tracing::debug!(label = %snap.label, "undo");
        Some(snap.doc)
    }

    pub fn redo(&mut self, current: &Document) -> Option<Document> {
        let snap = self.redo.pop()?;
        if self.undo.len() == self.capacity {
            self.undo.pop_front();
        }
        self.undo.push_back(Snapshot {
            doc: current.clone(),
            label: snap.label.clone(),
        });
        tracing::debug!(label = %snap.label, "redo");
        Some(snap.doc)
    }

    pub fn can_undo(&self) -> bool {
        !self.undo.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.redo.is_empty()
    }

    /// Label of the edit the next [`undo`](History::undo) reverts.
    pub fn undo_label(&self) -> Option<&str> {
        self.undo.back().map(|s| s.label.as_str())
    }

    pub fn redo_label(&self) -> Option<&str> {
        self.redo.last().map(|s| s.label.as_str())
    }

    pub fn undo_len(&self) -> usize {
        self.undo.len()
    }

    pub fn clear(&mut self) {
        self.undo.clear();
        self.redo.clear();
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scene/history.rs"]
mod tests;

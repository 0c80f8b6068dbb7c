use std::path::{Path, PathBuf};

use crate::foundation::error::{VanimError, VanimResult};
use crate::scene::history::History;
use crate::scene::model::Document;

/// The document being edited, where it lives on disk, and its undo history.
#[derive(Debug, Clone, Default)]
pub struct Project {
    document: Document,
    path: Option<PathBuf>,
    dirty: bool,
    history: History,
}

impl Project {
    pub fn new(document: Document) -> Self {
        Self {
            document,
            ..Self::default()
        }
    }

    /// Load `path` as the current document. History starts empty.
    pub fn open(path: impl AsRef<Path>) -> VanimResult<Self> {
        let path = path.as_ref();
        let document = Document::from_path(path)?;
        Ok(Self {
            document,
            path: Some(path.to_path_buf()),
            dirty: false,
            history: History::default(),
        })
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    /// Apply `f` to the current document, recording an undo step labelled `label`.
    ///
    /// A failed edit leaves the project untouched.
    pub fn edit<F>(&mut self, label: &str, f: F) -> VanimResult<()>
    where
        F: FnOnce(&Document) -> VanimResult<Document>,
    {
        let next = f(&self.document)?;
        self.history.push(label, &self.document);
        self.document = next;
        self.dirty = true;
        Ok(())
    }

    /// Returns `false` when there was nothing to undo.
    pub fn undo(&mut self) -> bool {
        match self.history.undo(&self.document) {
            Some(doc) => {
                self.document = doc;
                self.dirty = true;
                true
            }
            None => false,
        }
    }

    pub fn redo(&mut self) -> bool {
        match self.history.redo(&self.document) {
            Some(doc) => {
                self.document = doc;
                self.dirty = true;
                true
            }
            None => false,
        }
    }

    /// Replace the document wholesale, e.g. after loading. Clears the dirty flag.
    pub fn set_document(&mut self, document: Document, path: Option<PathBuf>) {
        self.document = document;
        self.path = path;
        self.dirty = false;
    }

    pub fn new_document(&mut self) {
        self.set_document(Document::default(), None);
    }

    /// Save to the project's path, or to `path` when given (which then becomes the project path).
    pub fn save(&mut self, path: Option<&Path>) -> VanimResult<()> {
        let target = match (path, &self.path) {
            (Some(p), _) => p.to_path_buf(),
            (None, Some(p)) => p.clone(),
            (None, None) => {
                return Err(VanimError::validation(
                    "project has no file path; pass one to save",
                ));
            }
        };
        self.document.save(&target)?;
        self.path = Some(target);
        self.dirty = false;
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scene/project.rs"]
mod tests;

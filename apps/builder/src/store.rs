use std::sync::Arc;

use tracing::info;

use crate::cv::{CvDocument, Section};

/// Receives document lifecycle events from the store. The persistence bridge
/// is the only production observer.
pub trait DocumentObserver: Send + Sync {
    fn document_changed(&self, doc: &CvDocument);
    fn document_reset(&self);
}

/// Owns the single in-memory CV document.
///
/// All mutations are synchronous and last-write-wins. No validation happens
/// here; callers run the shared rules before handing sections in.
pub struct CvStore {
    document: CvDocument,
    hydrated: bool,
    observers: Vec<Arc<dyn DocumentObserver>>,
}

impl Default for CvStore {
    fn default() -> Self {
        Self::new()
    }
}

impl CvStore {
    pub fn new() -> Self {
        Self {
            document: CvDocument::default(),
            hydrated: false,
            observers: Vec::new(),
        }
    }

    pub fn document(&self) -> &CvDocument {
        &self.document
    }

    pub fn is_hydrated(&self) -> bool {
        self.hydrated
    }

    pub fn subscribe(&mut self, observer: Arc<dyn DocumentObserver>) {
        self.observers.push(observer);
    }

    /// Replaces one section wholesale.
    pub fn replace_section(&mut self, section: Section) {
        self.document.apply(section);
        self.notify_changed();
    }

    /// Replaces the whole document (import, hydration).
    pub fn set_document(&mut self, doc: CvDocument) {
        self.document = doc;
        self.notify_changed();
    }

    /// Restores the default document and tells observers to purge storage.
    pub fn reset(&mut self) {
        self.document = CvDocument::default();
        for observer in &self.observers {
            observer.document_reset();
        }
        info!("CV document reset to defaults");
    }

    /// One-way: a load attempt has finished, whether or not it found anything.
    pub fn mark_hydrated(&mut self) {
        self.hydrated = true;
    }

    fn notify_changed(&self) {
        for observer in &self.observers {
            observer.document_changed(&self.document);
        }
    }
}

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::config::Config;
use crate::cv::Section;
use crate::forms::StepDraft;
use crate::persistence::{KeyValueStorage, PersistenceBridge};
use crate::print::PrintJob;
use crate::steps::{step_section, StepNavigator};
use crate::store::CvStore;

/// The document and the open step. Always locked together so statuses are
/// computed against the same document the navigator decided on.
#[derive(Default)]
pub struct BuilderSession {
    pub store: CvStore,
    pub navigator: StepNavigator,
}

/// Shared shell state injected into all route handlers via Axum extractors.
///
/// Lock order: never hold `session` while taking `draft` or `print`. The
/// draft's commit callback takes `session` on its own.
#[derive(Clone)]
pub struct AppState {
    pub session: Arc<Mutex<BuilderSession>>,
    pub bridge: Arc<PersistenceBridge>,
    /// Form state for the open step, if it has been edited.
    pub draft: Arc<Mutex<Option<StepDraft>>>,
    /// Print waiting for layout to settle. Replacing it cancels the old one.
    pub print: Arc<Mutex<Option<PrintJob>>>,
    pub config: Config,
}

impl AppState {
    /// Builds the session and hydrates it from `storage`. Must run inside the
    /// tokio runtime.
    pub fn new(config: Config, storage: Arc<dyn KeyValueStorage>) -> Self {
        let bridge = PersistenceBridge::new(storage, config.save_debounce);
        let mut session = BuilderSession::default();
        bridge.bind(&mut session.store);
        Self {
            session: Arc::new(Mutex::new(session)),
            bridge,
            draft: Arc::new(Mutex::new(None)),
            print: Arc::new(Mutex::new(None)),
            config,
        }
    }

    pub fn session(&self) -> MutexGuard<'_, BuilderSession> {
        lock(&self.session)
    }

    /// Drops the open form's pending commit.
    pub fn discard_draft(&self) {
        lock(&self.draft).take();
    }

    /// Rebases the open form after its section was replaced directly.
    pub fn sync_draft(&self, current: &Section) {
        if let Some(draft) = lock(&self.draft).as_ref() {
            if step_section(draft.step()) == Some(current.key()) {
                draft.sync(current);
            }
        }
    }
}

/// A panic in another handler leaves plain data behind; keep serving it.
pub fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

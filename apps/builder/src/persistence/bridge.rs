use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, info, warn};

use crate::cv::CvDocument;
use crate::debounce::Debouncer;
use crate::persistence::storage::KeyValueStorage;
use crate::persistence::transfer::{export_document, load_saved_document};
use crate::store::{CvStore, DocumentObserver};

/// The one well-known slot the document lives under.
pub const STORAGE_KEY: &str = "makemycv:data";

pub const DEFAULT_SAVE_DELAY: Duration = Duration::from_millis(500);

/// Keeps the store and the local storage slot in sync.
///
/// Hydrates the store once, then writes the latest document after each burst
/// of changes. Reset clears the slot immediately.
pub struct PersistenceBridge {
    storage: Arc<dyn KeyValueStorage>,
    saver: Debouncer<CvDocument>,
    bound: AtomicBool,
}

/// Runs on the blocking pool via the save debouncer.
fn save(storage: &dyn KeyValueStorage, doc: &CvDocument) {
    // Write failures are logged only; the next change tries again.
    match storage.set(STORAGE_KEY, &export_document(doc)) {
        Ok(()) => debug!("Saved CV document to local storage"),
        Err(e) => warn!("Failed to save CV document: {e}"),
    }
}

impl PersistenceBridge {
    /// Must be called inside a tokio runtime (the save timer is a task).
    pub fn new(storage: Arc<dyn KeyValueStorage>, save_delay: Duration) -> Arc<Self> {
        let saver = {
            let storage = Arc::clone(&storage);
            Debouncer::new(save_delay, move |doc: CvDocument| save(storage.as_ref(), &doc))
        };
        Arc::new(Self {
            storage,
            saver,
            bound: AtomicBool::new(false),
        })
    }

    /// Reads the saved document. Missing, unreadable or undecodable content
    /// all mean "nothing saved".
    pub fn load(&self) -> Option<CvDocument> {
        let raw = match self.storage.get(STORAGE_KEY) {
            Ok(raw) => raw?,
            Err(e) => {
                debug!("Local storage unavailable, starting fresh: {e}");
                return None;
            }
        };
        let doc = load_saved_document(&raw);
        if doc.is_none() {
            debug!("Discarding saved CV document that no longer decodes");
        }
        doc
    }

    /// Hydrates `store` from storage and starts saving its changes.
    ///
    /// Only the first call per bridge does anything; later calls return
    /// `false`. Hydration itself does not schedule a save.
    pub fn bind(self: &Arc<Self>, store: &mut CvStore) -> bool {
        if self.bound.swap(true, Ordering::SeqCst) {
            return false;
        }
        match self.load() {
            Some(doc) => {
                info!("Restored saved CV document");
                store.set_document(doc);
            }
            None => info!("No saved CV document, using defaults"),
        }
        store.mark_hydrated();
        store.subscribe(self.clone());
        true
    }

    /// Writes any pending save now.
    pub async fn flush(&self) {
        self.saver.flush().await;
    }
}

impl DocumentObserver for PersistenceBridge {
    fn document_changed(&self, doc: &CvDocument) {
        self.saver.schedule(doc.clone());
    }

    fn document_reset(&self) {
        self.saver.cancel();
        if let Err(e) = self.storage.remove(STORAGE_KEY) {
            warn!("Failed to clear saved CV document: {e}");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cv::{ItemId, Section, Skill};
    use crate::persistence::storage::{FileStorage, MemoryStorage, StorageError};
    use crate::persistence::transfer::import_document;
    use tokio::time::sleep;

    struct BrokenStorage;

    impl KeyValueStorage for BrokenStorage {
        fn get(&self, _key: &str) -> Result<Option<String>, StorageError> {
            Err(StorageError::Unavailable("quota".to_string()))
        }
        fn set(&self, _key: &str, _value: &str) -> Result<(), StorageError> {
            Err(StorageError::Unavailable("quota".to_string()))
        }
        fn remove(&self, _key: &str) -> Result<(), StorageError> {
            Err(StorageError::Unavailable("quota".to_string()))
        }
    }

    fn skill(name: &str) -> Skill {
        Skill {
            id: ItemId::generate(),
            name: name.to_string(),
            level: None,
        }
    }

    fn saved(storage: &MemoryStorage) -> Option<CvDocument> {
        storage
            .get(STORAGE_KEY)
            .unwrap()
            .map(|text| import_document(&text).unwrap())
    }

    #[tokio::test(start_paused = true)]
    async fn test_bind_without_saved_document_keeps_default() {
        let storage = Arc::new(MemoryStorage::new());
        let bridge = PersistenceBridge::new(storage.clone(), DEFAULT_SAVE_DELAY);
        let mut store = CvStore::new();
        assert!(bridge.bind(&mut store));
        assert!(store.is_hydrated());
        assert_eq!(store.document().experience.len(), 1);
        sleep(Duration::from_secs(1)).await;
        assert_eq!(storage.write_count(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_bind_adopts_saved_document_and_backfills_ids() {
        let storage = Arc::new(MemoryStorage::new());
        let mut value = serde_json::to_value(CvDocument::default()).unwrap();
        value["personal"]["firstName"] = "Grace".into();
        value["skills"] = serde_json::json!([{"name": "COBOL"}]);
        storage.set(STORAGE_KEY, &value.to_string()).unwrap();

        let bridge = PersistenceBridge::new(storage.clone(), DEFAULT_SAVE_DELAY);
        let mut store = CvStore::new();
        bridge.bind(&mut store);
        assert_eq!(store.document().personal.first_name, "Grace");
        assert!(!store.document().skills[0].id.as_str().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_unparseable_saved_document_is_ignored() {
        let storage = Arc::new(MemoryStorage::new());
        storage.set(STORAGE_KEY, "{ definitely not json").unwrap();
        let bridge = PersistenceBridge::new(storage.clone(), DEFAULT_SAVE_DELAY);
        let mut store = CvStore::new();
        bridge.bind(&mut store);
        assert!(store.is_hydrated());
        assert_eq!(store.document().personal.first_name, "");
    }

    #[tokio::test(start_paused = true)]
    async fn test_storage_read_failure_is_tolerated() {
        let bridge = PersistenceBridge::new(Arc::new(BrokenStorage), DEFAULT_SAVE_DELAY);
        let mut store = CvStore::new();
        assert!(bridge.bind(&mut store));
        assert!(store.is_hydrated());
        store.replace_section(Section::Skills(vec![skill("Rust")]));
        sleep(Duration::from_secs(1)).await;
    }

    #[tokio::test(start_paused = true)]
    async fn test_second_bind_is_noop() {
        let storage = Arc::new(MemoryStorage::new());
        let bridge = PersistenceBridge::new(storage.clone(), DEFAULT_SAVE_DELAY);
        let mut store = CvStore::new();
        assert!(bridge.bind(&mut store));
        assert!(!bridge.bind(&mut store));
        store.replace_section(Section::Skills(vec![skill("Rust")]));
        sleep(Duration::from_secs(1)).await;
        assert_eq!(storage.write_count(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_rapid_changes_coalesce_into_one_write() {
        let storage = Arc::new(MemoryStorage::new());
        let bridge = PersistenceBridge::new(storage.clone(), DEFAULT_SAVE_DELAY);
        let mut store = CvStore::new();
        bridge.bind(&mut store);

        let names = ["R", "Ru", "Rus", "Rust"];
        for name in names {
            store.replace_section(Section::Skills(vec![skill(name)]));
            sleep(Duration::from_millis(100)).await;
        }
        assert_eq!(storage.write_count(), 0);
        sleep(Duration::from_millis(500)).await;
        assert_eq!(storage.write_count(), 1);
        assert_eq!(saved(&storage).unwrap().skills[0].name, "Rust");
    }

    #[tokio::test(start_paused = true)]
    async fn test_reset_clears_slot_and_cancels_pending_save() {
        let storage = Arc::new(MemoryStorage::new());
        let bridge = PersistenceBridge::new(storage.clone(), DEFAULT_SAVE_DELAY);
        let mut store = CvStore::new();
        bridge.bind(&mut store);

        store.replace_section(Section::Skills(vec![skill("Rust")]));
        bridge.flush().await;
        assert!(saved(&storage).is_some());

        store.replace_section(Section::Skills(vec![skill("Go")]));
        store.reset();
        assert!(storage.get(STORAGE_KEY).unwrap().is_none());
        sleep(Duration::from_secs(1)).await;
        assert!(storage.get(STORAGE_KEY).unwrap().is_none());
        assert!(store.document().skills.is_empty());
    }

    #[tokio::test]
    async fn test_flush_finishes_file_write_before_returning() {
        let dir = tempfile::tempdir().unwrap();
        let storage = Arc::new(FileStorage::open(dir.path()).unwrap());
        let bridge = PersistenceBridge::new(storage.clone(), Duration::from_secs(60));
        let mut store = CvStore::new();
        bridge.bind(&mut store);

        for name in ["Go", "Rust"] {
            store.replace_section(Section::Skills(vec![skill(name)]));
        }
        bridge.flush().await;
        let raw = storage.get(STORAGE_KEY).unwrap().unwrap();
        assert_eq!(import_document(&raw).unwrap().skills[0].name, "Rust");
    }

    #[tokio::test(start_paused = true)]
    async fn test_write_failure_is_swallowed() {
        let bridge = PersistenceBridge::new(Arc::new(BrokenStorage), Duration::from_millis(10));
        bridge.document_changed(&CvDocument::default());
        bridge.flush().await;
        bridge.document_reset();
    }
}

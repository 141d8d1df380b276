// Local persistence: the storage slot, the debounced store bridge, and the
// import/export file format.

pub mod bridge;
pub mod storage;
pub mod transfer;

pub use bridge::{PersistenceBridge, DEFAULT_SAVE_DELAY, STORAGE_KEY};
pub use storage::{FileStorage, KeyValueStorage, MemoryStorage, StorageError};
pub use transfer::{export_document, import_document, ImportError, EXPORT_FILE_NAME};

pub(crate) mod error;
pub(crate) mod file_storage;
pub(crate) mod key_value_store;
pub(crate) mod memory_storage;
pub(crate) mod persistence_adapter;

pub use error::{Result as StorageResult, StorageError};
pub use file_storage::FileStorage;
pub use key_value_store::KeyValueStore;
pub use memory_storage::MemoryStorage;
pub use persistence_adapter::PersistenceAdapter;

use crate::StorageResult;

/// Durable string key/value storage, the shape of a browser's local storage.
///
/// `set_many` and `remove_many` apply all of their keys as one write, so a reader
/// never observes half of a record.
pub trait KeyValueStore: Send + Sync {
    fn get(&self, key: &str) -> StorageResult<Option<String>>;

    fn set_many(&self, entries: &[(String, String)]) -> StorageResult<()>;

    fn remove_many(&self, keys: &[String]) -> StorageResult<()>;
}

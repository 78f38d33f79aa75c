use crate::error::StorageResult;
use async_trait::async_trait;

/// Generic key-value persistence contract.
///
/// Records are stored as JSON text under string keys. The engine assumes
/// last-write-wins-per-key semantics: it does not detect stale writes, and
/// the single concurrency-sensitive transition (VT submission) goes through
/// [`compare_and_set`](KeyValueStore::compare_and_set) instead of a
/// read-modify-write cycle.
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    /// Reads the value stored under `key`, if any.
    async fn get(&self, key: &str) -> StorageResult<Option<String>>;

    /// Writes `value` under `key`, overwriting any previous value.
    async fn set(&self, key: &str, value: String) -> StorageResult<()>;

    /// Removes the value stored under `key`. Removing an absent key is not
    /// an error.
    async fn delete(&self, key: &str) -> StorageResult<()>;

    /// Lists every key starting with `prefix`.
    async fn list_keys_with_prefix(&self, prefix: &str) -> StorageResult<Vec<String>>;

    /// Atomically writes `value` under `key` iff the current value equals
    /// `expected` (`None` meaning the key must be absent). Returns `true`
    /// when the write happened.
    async fn compare_and_set(
        &self,
        key: &str,
        expected: Option<&str>,
        value: String,
    ) -> StorageResult<bool>;
}

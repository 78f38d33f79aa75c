use crate::error::StorageError;
use crate::store::KeyValueStore;
use error_common::CoreResult;
use serde::de::DeserializeOwned;
use serde::Serialize;

/// Reads and decodes the record stored under `key`
pub async fn fetch_record<T: DeserializeOwned>(
    store: &dyn KeyValueStore,
    key: &str,
) -> CoreResult<Option<T>> {
    match store.get(key).await? {
        Some(raw) => {
            let record = serde_json::from_str(&raw).map_err(StorageError::Serialization)?;
            Ok(Some(record))
        }
        None => Ok(None),
    }
}

/// Encodes and writes `record` under `key`, overwriting any previous value
pub async fn put_record<T: Serialize>(
    store: &dyn KeyValueStore,
    key: &str,
    record: &T,
) -> CoreResult<()> {
    let raw = serde_json::to_string(record).map_err(StorageError::Serialization)?;
    store.set(key, raw).await?;
    Ok(())
}

/// Reads the record under `key` together with its raw stored text, for use
/// with [`put_record_if`] compare-and-set cycles
pub async fn fetch_record_raw<T: DeserializeOwned>(
    store: &dyn KeyValueStore,
    key: &str,
) -> CoreResult<Option<(T, String)>> {
    match store.get(key).await? {
        Some(raw) => {
            let record = serde_json::from_str(&raw).map_err(StorageError::Serialization)?;
            Ok(Some((record, raw)))
        }
        None => Ok(None),
    }
}

/// Encodes `record` and writes it under `key` only if the stored text still
/// equals `expected_raw` (`None` meaning the key must be absent). Returns
/// whether the write happened.
pub async fn put_record_if<T: Serialize>(
    store: &dyn KeyValueStore,
    key: &str,
    expected_raw: Option<&str>,
    record: &T,
) -> CoreResult<bool> {
    let raw = serde_json::to_string(record).map_err(StorageError::Serialization)?;
    let swapped = store.compare_and_set(key, expected_raw, raw).await?;
    Ok(swapped)
}

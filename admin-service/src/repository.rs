use crate::models::AdminCase;
use error_common::{CoreError, CoreResult};
use std::sync::Arc;
use storage_layer::{fetch_record, put_record, KeyValueStore};

/// Storage key for an admin case, keyed by VT folio
pub fn admin_case_key(vt_folio: &str) -> String {
    format!("admin-case:{vt_folio}")
}

/// Repository for [`AdminCase`] records
#[derive(Clone)]
pub struct AdminCaseRepository {
    store: Arc<dyn KeyValueStore>,
}

impl AdminCaseRepository {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    pub async fn get(&self, vt_folio: &str) -> CoreResult<Option<AdminCase>> {
        fetch_record(self.store.as_ref(), &admin_case_key(vt_folio)).await
    }

    /// Loads the case or fails with a not-found error
    pub async fn require(&self, vt_folio: &str) -> CoreResult<AdminCase> {
        self.get(vt_folio)
            .await?
            .ok_or_else(|| CoreError::not_found("AdminCase", vt_folio))
    }

    pub async fn exists(&self, vt_folio: &str) -> CoreResult<bool> {
        Ok(self.get(vt_folio).await?.is_some())
    }

    pub async fn save(&self, case: &AdminCase) -> CoreResult<()> {
        put_record(self.store.as_ref(), &admin_case_key(&case.vt_folio), case).await
    }

    /// Lists every stored VT folio
    pub async fn list_folios(&self) -> CoreResult<Vec<String>> {
        let keys = self.store.list_keys_with_prefix("admin-case:").await?;
        Ok(keys
            .into_iter()
            .filter_map(|k| k.strip_prefix("admin-case:").map(str::to_string))
            .collect())
    }
}

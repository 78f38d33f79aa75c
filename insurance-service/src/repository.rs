use crate::models::InsuranceCase;
use error_common::CoreResult;
use std::sync::Arc;
use storage_layer::{fetch_record, put_record, KeyValueStore};
use uuid::Uuid;

/// Storage key for an insurance case
pub fn insurance_key(request_id: Uuid) -> String {
    format!("insurance:{request_id}")
}

/// Repository for [`InsuranceCase`] records
#[derive(Clone)]
pub struct InsuranceCaseRepository {
    store: Arc<dyn KeyValueStore>,
}

impl InsuranceCaseRepository {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    /// Loads the case, `None` when the request has no insurer gating
    pub async fn get(&self, request_id: Uuid) -> CoreResult<Option<InsuranceCase>> {
        fetch_record(self.store.as_ref(), &insurance_key(request_id)).await
    }

    /// Loads the case; an absent record reads as a fresh pending one
    pub async fn get_or_new(&self, request_id: Uuid) -> CoreResult<InsuranceCase> {
        Ok(self
            .get(request_id)
            .await?
            .unwrap_or_else(|| InsuranceCase::new(request_id)))
    }

    pub async fn save(&self, case: &InsuranceCase) -> CoreResult<()> {
        put_record(self.store.as_ref(), &insurance_key(case.request_id), case).await
    }
}

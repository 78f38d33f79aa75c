use crate::models::CreditAdjustment;
use error_common::{CoreError, CoreResult};
use std::sync::Arc;
use storage_layer::{fetch_record, put_record, KeyValueStore};
use uuid::Uuid;

/// Storage key for a credit adjustment
pub fn credit_adjustment_key(id: Uuid) -> String {
    format!("credit-adjustment:{id}")
}

/// Repository for [`CreditAdjustment`] records
#[derive(Clone)]
pub struct CreditAdjustmentRepository {
    store: Arc<dyn KeyValueStore>,
}

impl CreditAdjustmentRepository {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    pub async fn get(&self, id: Uuid) -> CoreResult<Option<CreditAdjustment>> {
        fetch_record(self.store.as_ref(), &credit_adjustment_key(id)).await
    }

    pub async fn require(&self, id: Uuid) -> CoreResult<CreditAdjustment> {
        self.get(id)
            .await?
            .ok_or_else(|| CoreError::not_found("CreditAdjustment", id.to_string()))
    }

    pub async fn save(&self, adjustment: &CreditAdjustment) -> CoreResult<()> {
        put_record(
            self.store.as_ref(),
            &credit_adjustment_key(adjustment.id),
            adjustment,
        )
        .await
    }

    /// Loads every stored adjustment
    pub async fn list(&self) -> CoreResult<Vec<CreditAdjustment>> {
        let keys = self
            .store
            .list_keys_with_prefix("credit-adjustment:")
            .await?;
        let mut adjustments = Vec::with_capacity(keys.len());
        for key in keys {
            if let Some(adjustment) = fetch_record(self.store.as_ref(), &key).await? {
                adjustments.push(adjustment);
            }
        }
        Ok(adjustments)
    }
}

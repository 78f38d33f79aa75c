use crate::models::{CreditAdjustment, NewCreditAdjustment};
use crate::repository::CreditAdjustmentRepository;
use chrono::Utc;
use error_common::{CoreError, CoreResult};
use rust_decimal::Decimal;
use std::sync::Arc;
use storage_layer::KeyValueStore;
use uuid::Uuid;

/// Standalone adjustment bookkeeping (credit notes, discounts, commissions).
///
/// Adjustments reference invoices but never mutate them; corrections to a
/// stamped invoice happen only here.
#[derive(Clone)]
pub struct CreditAdjustmentService {
    adjustments: CreditAdjustmentRepository,
}

impl CreditAdjustmentService {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self {
            adjustments: CreditAdjustmentRepository::new(store),
        }
    }

    /// Creates a standalone adjustment record
    pub async fn create_credit_adjustment(
        &self,
        new: NewCreditAdjustment,
    ) -> CoreResult<CreditAdjustment> {
        if new.amount <= Decimal::ZERO {
            return Err(CoreError::validation("Adjustment amount must be positive"));
        }
        if new.folio.trim().is_empty() {
            return Err(CoreError::validation("Adjustment folio is required"));
        }

        let adjustment = CreditAdjustment {
            id: Uuid::new_v4(),
            kind: new.kind,
            recipient_tax_id: new.recipient_tax_id,
            legal_name: new.legal_name,
            amount: new.amount,
            concept: new.concept,
            folio: new.folio,
            authorization_token: new.authorization_token,
            linked_case_folio: new.linked_case_folio,
            created_at: Utc::now(),
        };
        self.adjustments.save(&adjustment).await?;
        tracing::info!(adjustment_id = %adjustment.id, kind = ?adjustment.kind, "created credit adjustment");
        Ok(adjustment)
    }

    /// Loads one adjustment by id
    pub async fn get_adjustment(&self, id: Uuid) -> CoreResult<CreditAdjustment> {
        self.adjustments.require(id).await
    }

    /// All adjustment records, for reporting
    pub async fn list_adjustments(&self) -> CoreResult<Vec<CreditAdjustment>> {
        self.adjustments.list().await
    }

    /// Adjustments linked to one case's invoice
    pub async fn adjustments_for_case(&self, vt_folio: &str) -> CoreResult<Vec<CreditAdjustment>> {
        Ok(self
            .adjustments
            .list()
            .await?
            .into_iter()
            .filter(|a| a.linked_case_folio.as_deref() == Some(vt_folio))
            .collect())
    }
}

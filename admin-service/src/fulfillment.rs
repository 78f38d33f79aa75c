use crate::models::{
    AdminCase, ApprovalStatus, LabPayment, LabPaymentStatus, LogisticsStatus, NewLabPayment,
    PurchasingStatus, ResultsStatus,
};
use crate::repository::AdminCaseRepository;
use error_common::{CoreError, CoreResult};
use rust_decimal::Decimal;
use std::sync::Arc;
use storage_layer::KeyValueStore;
use uuid::Uuid;

/// Fulfillment tracking on an admin case.
///
/// The four tracks are set by direct assignment and move independently.
/// Operational staff report out of order (results may complete while
/// logistics is still pending), and that is accepted as-is. Invalid labels
/// never reach these setters; they are rejected at the serde boundary.
#[derive(Clone)]
pub struct FulfillmentService {
    cases: AdminCaseRepository,
}

impl FulfillmentService {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self {
            cases: AdminCaseRepository::new(store),
        }
    }

    /// Loads a case by VT folio
    pub async fn get_case(&self, vt_folio: &str) -> CoreResult<AdminCase> {
        self.cases.require(vt_folio).await
    }

    /// Sets the administrative approval track
    pub async fn set_approval_status(
        &self,
        vt_folio: &str,
        status: ApprovalStatus,
    ) -> CoreResult<AdminCase> {
        let mut case = self.cases.require(vt_folio).await?;
        case.approval = status;
        self.cases.save(&case).await?;
        tracing::info!(vt_folio = %vt_folio, status = ?status, "set approval status");
        Ok(case)
    }

    /// Sets the purchasing track
    pub async fn set_purchasing_status(
        &self,
        vt_folio: &str,
        status: PurchasingStatus,
    ) -> CoreResult<AdminCase> {
        let mut case = self.cases.require(vt_folio).await?;
        case.purchasing = status;
        self.cases.save(&case).await?;
        tracing::info!(vt_folio = %vt_folio, status = ?status, "set purchasing status");
        Ok(case)
    }

    /// Sets the logistics track
    pub async fn set_logistics_status(
        &self,
        vt_folio: &str,
        status: LogisticsStatus,
    ) -> CoreResult<AdminCase> {
        let mut case = self.cases.require(vt_folio).await?;
        case.logistics = status;
        self.cases.save(&case).await?;
        tracing::info!(vt_folio = %vt_folio, status = ?status, "set logistics status");
        Ok(case)
    }

    /// Sets the results track
    pub async fn set_results_status(
        &self,
        vt_folio: &str,
        status: ResultsStatus,
    ) -> CoreResult<AdminCase> {
        let mut case = self.cases.require(vt_folio).await?;
        case.results = status;
        self.cases.save(&case).await?;
        tracing::info!(vt_folio = %vt_folio, status = ?status, "set results status");
        Ok(case)
    }

    /// Appends a lab payment to the case
    pub async fn add_lab_payment(
        &self,
        vt_folio: &str,
        new: NewLabPayment,
    ) -> CoreResult<LabPayment> {
        if new.provider.trim().is_empty() {
            return Err(CoreError::validation("Provider is required"));
        }
        if new.amount <= Decimal::ZERO {
            return Err(CoreError::validation("Amount must be positive"));
        }

        let mut case = self.cases.require(vt_folio).await?;
        let payment = LabPayment {
            id: Uuid::new_v4(),
            provider: new.provider,
            invoice_folio: new.invoice_folio,
            date: new.date,
            amount: new.amount,
            currency: new.currency,
            status: LabPaymentStatus::Pending,
            document: new.document,
        };
        case.lab_payments.push(payment.clone());
        self.cases.save(&case).await?;
        Ok(payment)
    }

    /// Updates the status of one lab payment
    pub async fn set_lab_payment_status(
        &self,
        vt_folio: &str,
        payment_id: Uuid,
        status: LabPaymentStatus,
    ) -> CoreResult<LabPayment> {
        let mut case = self.cases.require(vt_folio).await?;
        let payment = case
            .lab_payments
            .iter_mut()
            .find(|p| p.id == payment_id)
            .ok_or_else(|| CoreError::not_found("LabPayment", payment_id.to_string()))?;
        payment.status = status;
        let updated = payment.clone();
        self.cases.save(&case).await?;
        Ok(updated)
    }

    /// Removes one lab payment from the case
    pub async fn remove_lab_payment(&self, vt_folio: &str, payment_id: Uuid) -> CoreResult<()> {
        let mut case = self.cases.require(vt_folio).await?;
        let before = case.lab_payments.len();
        case.lab_payments.retain(|p| p.id != payment_id);
        if case.lab_payments.len() == before {
            return Err(CoreError::not_found("LabPayment", payment_id.to_string()));
        }
        self.cases.save(&case).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gate::VtGateService;
    use chrono::NaiveDate;
    use intake_service::{IntakeService, NewServiceRequest};
    use storage_layer::MemoryStore;

    async fn spawned_case(store: Arc<MemoryStore>) -> String {
        let request = IntakeService::new(store.clone())
            .create_request(NewServiceRequest {
                doctor_name: "Dr. Elena Vargas".into(),
                patient_name: "Jorge Luna".into(),
                condition: "Routine screen".into(),
                test_type: "Panel".into(),
                contact_phone: "5550001111".into(),
                specialist_phone: "5552223333".into(),
            })
            .await
            .unwrap();
        VtGateService::new(store)
            .submit_vt(request.id)
            .await
            .unwrap()
            .case
            .vt_folio
    }

    fn lab_invoice() -> NewLabPayment {
        NewLabPayment {
            provider: "Genolab".into(),
            invoice_folio: "GL-4411".into(),
            date: NaiveDate::from_ymd_opt(2026, 3, 14).unwrap(),
            amount: Decimal::new(480000, 2),
            currency: "MXN".into(),
            document: None,
        }
    }

    #[tokio::test]
    async fn test_tracks_move_independently() {
        let store = Arc::new(MemoryStore::new());
        let folio = spawned_case(store.clone()).await;
        let fulfillment = FulfillmentService::new(store);

        // out-of-order reporting is accepted
        fulfillment
            .set_results_status(&folio, ResultsStatus::Completed)
            .await
            .unwrap();
        let case = fulfillment.get_case(&folio).await.unwrap();
        assert_eq!(case.results, ResultsStatus::Completed);
        assert_eq!(case.logistics, LogisticsStatus::Pending);
        assert_eq!(case.purchasing, PurchasingStatus::Pending);
    }

    #[tokio::test]
    async fn test_lab_payment_lifecycle() {
        let store = Arc::new(MemoryStore::new());
        let folio = spawned_case(store.clone()).await;
        let fulfillment = FulfillmentService::new(store);

        let payment = fulfillment.add_lab_payment(&folio, lab_invoice()).await.unwrap();
        assert_eq!(payment.status, LabPaymentStatus::Pending);

        let payment = fulfillment
            .set_lab_payment_status(&folio, payment.id, LabPaymentStatus::Paid)
            .await
            .unwrap();
        assert_eq!(payment.status, LabPaymentStatus::Paid);

        fulfillment.remove_lab_payment(&folio, payment.id).await.unwrap();
        let case = fulfillment.get_case(&folio).await.unwrap();
        assert!(case.lab_payments.is_empty());

        let err = fulfillment
            .remove_lab_payment(&folio, payment.id)
            .await
            .unwrap_err();
        assert!(matches!(err, CoreError::NotFound { .. }));
    }

    #[tokio::test]
    async fn test_lab_payment_validation() {
        let store = Arc::new(MemoryStore::new());
        let folio = spawned_case(store.clone()).await;
        let fulfillment = FulfillmentService::new(store);

        let mut invalid = lab_invoice();
        invalid.provider = "".into();
        assert!(matches!(
            fulfillment.add_lab_payment(&folio, invalid).await.unwrap_err(),
            CoreError::Validation(_)
        ));

        let mut invalid = lab_invoice();
        invalid.amount = Decimal::ZERO;
        assert!(matches!(
            fulfillment.add_lab_payment(&folio, invalid).await.unwrap_err(),
            CoreError::Validation(_)
        ));
    }

    #[tokio::test]
    async fn test_unknown_case_is_not_found() {
        let fulfillment = FulfillmentService::new(Arc::new(MemoryStore::new()));
        let err = fulfillment
            .set_approval_status("VT-20260314-101010-001", ApprovalStatus::Approved)
            .await
            .unwrap_err();
        assert!(matches!(err, CoreError::NotFound { .. }));
    }
}

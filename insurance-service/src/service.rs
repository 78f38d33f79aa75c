use crate::models::{outcome_allowed, InsuranceCase, InsuranceStatus};
use crate::repository::InsuranceCaseRepository;
use chrono::Utc;
use error_common::{CoreError, CoreResult};
use intake_service::{PaymentMethod, ServiceSelectionRepository};
use std::sync::Arc;
use storage_layer::{AttachmentRef, KeyValueStore};
use uuid::Uuid;

/// Insurance case operations: submission to the insurer, recorded outcomes,
/// and the authorization-letter reference
#[derive(Clone)]
pub struct InsuranceService {
    cases: InsuranceCaseRepository,
    selections: ServiceSelectionRepository,
}

impl InsuranceService {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self {
            cases: InsuranceCaseRepository::new(store.clone()),
            selections: ServiceSelectionRepository::new(store),
        }
    }

    /// Loads the case for a request (absent reads as pending)
    pub async fn get_case(&self, request_id: Uuid) -> CoreResult<InsuranceCase> {
        self.cases.get_or_new(request_id).await
    }

    /// Submits the request's file to the insurer.
    ///
    /// Requires a service selection, and a selected insurer when the payment
    /// method is insurer-billed; otherwise fails with "service data
    /// incomplete" and changes nothing. Refreshes the submission timestamp
    /// on entry to submitted.
    pub async fn submit(&self, request_id: Uuid) -> CoreResult<InsuranceCase> {
        let selection = self
            .selections
            .get(request_id)
            .await?
            .ok_or_else(|| CoreError::precondition("service data incomplete"))?;
        if selection.payment_method == PaymentMethod::InsurerBilled
            && selection.insurer_id.is_none()
        {
            return Err(CoreError::precondition("service data incomplete"));
        }

        let mut case = self.cases.get_or_new(request_id).await?;
        if case.status != InsuranceStatus::Pending {
            return Err(CoreError::precondition(
                "insurance case already submitted",
            ));
        }
        case.status = InsuranceStatus::Submitted;
        case.last_submission_at = Some(Utc::now());
        self.cases.save(&case).await?;
        tracing::info!(request_id = %request_id, "submitted insurance case");
        Ok(case)
    }

    /// Records the insurer's outcome, or a manual correction of one.
    ///
    /// Allowed moves: submitted → approved/rejected, approved ↔ rejected,
    /// approved/rejected → pending. The submission timestamp is untouched.
    pub async fn record_outcome(
        &self,
        request_id: Uuid,
        outcome: InsuranceStatus,
    ) -> CoreResult<InsuranceCase> {
        let mut case = self.cases.get_or_new(request_id).await?;
        if !outcome_allowed(case.status, outcome) {
            return Err(CoreError::precondition(format!(
                "cannot record outcome {outcome:?} from status {:?}",
                case.status
            )));
        }
        case.status = outcome;
        self.cases.save(&case).await?;
        tracing::info!(request_id = %request_id, outcome = ?outcome, "recorded insurance outcome");
        Ok(case)
    }

    /// Stores the authorization-letter reference.
    ///
    /// Allowed only while the case is approved; does not itself change the
    /// status.
    pub async fn attach_authorization_letter(
        &self,
        request_id: Uuid,
        letter: AttachmentRef,
    ) -> CoreResult<InsuranceCase> {
        let mut case = self.cases.get_or_new(request_id).await?;
        if case.status != InsuranceStatus::Approved {
            return Err(CoreError::precondition(
                "authorization letter requires an approved case",
            ));
        }
        case.authorization_letter = Some(letter);
        self.cases.save(&case).await?;
        Ok(case)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use catalog_service::{Insurer, ServiceEntry, StaticCatalog};
    use intake_service::{IntakeService, NewServiceRequest, SelectionService};
    use rust_decimal::Decimal;
    use storage_layer::MemoryStore;

    fn catalog() -> Arc<StaticCatalog> {
        Arc::new(StaticCatalog::new(
            vec![ServiceEntry {
                id: "SVC-01".into(),
                name: "Carrier screen".into(),
                lab_name: "Genolab".into(),
                unit_price: Decimal::new(950000, 2),
                unit_cost: Decimal::new(600000, 2),
                turnaround: "7 business days".into(),
            }],
            vec![Insurer {
                id: "INS-01".into(),
                name: "Atlas Seguros".into(),
                tax_id: "ASE010101AAA".into(),
            }],
            vec![],
            vec![],
        ))
    }

    async fn request_on(store: Arc<MemoryStore>) -> Uuid {
        IntakeService::new(store)
            .create_request(NewServiceRequest {
                doctor_name: "Dr. Elena Vargas".into(),
                patient_name: "Jorge Luna".into(),
                condition: "Routine screen".into(),
                test_type: "Panel".into(),
                contact_phone: "5550001111".into(),
                specialist_phone: "5552223333".into(),
            })
            .await
            .unwrap()
            .id
    }

    #[tokio::test]
    async fn test_submit_requires_selection() {
        let store = Arc::new(MemoryStore::new());
        let request_id = request_on(store.clone()).await;
        let insurance = InsuranceService::new(store);

        let err = insurance.submit(request_id).await.unwrap_err();
        assert_eq!(err.to_string(), "Precondition failed: service data incomplete");
    }

    #[tokio::test]
    async fn test_submit_insurer_billed_needs_insurer() {
        let store = Arc::new(MemoryStore::new());
        let request_id = request_on(store.clone()).await;
        let selections = SelectionService::new(store.clone(), catalog());
        let insurance = InsuranceService::new(store);

        selections.set_service(request_id, "SVC-01").await.unwrap();
        selections
            .set_payment_method(request_id, PaymentMethod::InsurerBilled)
            .await
            .unwrap();

        // no insurer selected yet
        let err = insurance.submit(request_id).await.unwrap_err();
        assert_eq!(err.to_string(), "Precondition failed: service data incomplete");
        // state unchanged by the failed submit
        let case = insurance.get_case(request_id).await.unwrap();
        assert_eq!(case.status, InsuranceStatus::Pending);

        // same call succeeds once the insurer is recorded
        selections.set_insurer(request_id, "INS-01").await.unwrap();
        let case = insurance.submit(request_id).await.unwrap();
        assert_eq!(case.status, InsuranceStatus::Submitted);
        assert!(case.last_submission_at.is_some());
    }

    #[tokio::test]
    async fn test_outcome_and_manual_correction() {
        let store = Arc::new(MemoryStore::new());
        let request_id = request_on(store.clone()).await;
        let selections = SelectionService::new(store.clone(), catalog());
        let insurance = InsuranceService::new(store);

        selections.set_service(request_id, "SVC-01").await.unwrap();
        insurance.submit(request_id).await.unwrap();

        let case = insurance
            .record_outcome(request_id, InsuranceStatus::Rejected)
            .await
            .unwrap();
        assert_eq!(case.status, InsuranceStatus::Rejected);

        // a human corrects the recorded outcome
        let case = insurance
            .record_outcome(request_id, InsuranceStatus::Approved)
            .await
            .unwrap();
        assert_eq!(case.status, InsuranceStatus::Approved);

        // direct pending → approved stays forbidden
        let err = insurance
            .record_outcome(Uuid::new_v4(), InsuranceStatus::Approved)
            .await
            .unwrap_err();
        assert!(matches!(err, CoreError::Precondition(_)));
    }

    #[tokio::test]
    async fn test_letter_only_while_approved() {
        let store = Arc::new(MemoryStore::new());
        let request_id = request_on(store.clone()).await;
        let selections = SelectionService::new(store.clone(), catalog());
        let insurance = InsuranceService::new(store);

        selections.set_service(request_id, "SVC-01").await.unwrap();
        insurance.submit(request_id).await.unwrap();

        let err = insurance
            .attach_authorization_letter(request_id, AttachmentRef::new("blob:letter"))
            .await
            .unwrap_err();
        assert!(matches!(err, CoreError::Precondition(_)));

        insurance
            .record_outcome(request_id, InsuranceStatus::Approved)
            .await
            .unwrap();
        let case = insurance
            .attach_authorization_letter(request_id, AttachmentRef::new("blob:letter"))
            .await
            .unwrap();
        assert_eq!(case.status, InsuranceStatus::Approved);
        assert_eq!(
            case.authorization_letter.unwrap().as_str(),
            "blob:letter"
        );
    }
}

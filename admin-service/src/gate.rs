use crate::models::{
    AdminCase, ApprovalStatus, CollectionsStatus, InsurerSnapshot, InvoicingStatus,
    LogisticsStatus, PatientSnapshot, PurchasingStatus, ResultsStatus, ServiceSnapshot,
};
use crate::repository::AdminCaseRepository;
use chrono::{DateTime, Utc};
use error_common::{log_warnings, CoreError, CoreResult, Warning};
use insurance_service::{InsuranceCaseRepository, InsuranceStatus};
use intake_service::{
    PatientProfile, PatientProfileRepository, ServiceRequestRepository, ServiceSelection,
    ServiceSelectionRepository, VtRequest, VtRequestRepository, VtStatus,
};
use rand::Rng;
use rust_decimal::Decimal;
use std::sync::Arc;
use storage_layer::KeyValueStore;
use uuid::Uuid;

/// Tuning knobs for the VT gate
#[derive(Debug, Clone)]
pub struct VtGateConfig {
    /// Attempts to allocate a VT folio not already present in the repository
    pub id_max_attempts: u32,
}

impl Default for VtGateConfig {
    fn default() -> Self {
        Self { id_max_attempts: 5 }
    }
}

/// Result of a successful VT submission
#[derive(Debug, Clone)]
pub struct VtSubmission {
    pub vt: VtRequest,
    pub case: AdminCase,
    /// Non-fatal conditions the caller must surface (e.g. missing price)
    pub warnings: Vec<Warning>,
}

/// The VT gate: validates that a request may be handed off to
/// administration, assigns the VT folio, and spawns the admin case
#[derive(Clone)]
pub struct VtGateService {
    requests: ServiceRequestRepository,
    patients: PatientProfileRepository,
    selections: ServiceSelectionRepository,
    vts: VtRequestRepository,
    insurance: InsuranceCaseRepository,
    cases: AdminCaseRepository,
    config: VtGateConfig,
}

impl VtGateService {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self::with_config(store, VtGateConfig::default())
    }

    pub fn with_config(store: Arc<dyn KeyValueStore>, config: VtGateConfig) -> Self {
        Self {
            requests: ServiceRequestRepository::new(store.clone()),
            patients: PatientProfileRepository::new(store.clone()),
            selections: ServiceSelectionRepository::new(store.clone()),
            vts: VtRequestRepository::new(store.clone()),
            insurance: InsuranceCaseRepository::new(store.clone()),
            cases: AdminCaseRepository::new(store),
            config,
        }
    }

    /// Submits the VT request and spawns the admin case.
    ///
    /// Preconditions: the VT record is still pending, and the insurance
    /// case, when one exists, is approved. A missing insurance case means no
    /// insurer gating is required. The pending to submitted transition is a
    /// compare-and-set, so two racing callers can never spawn two cases.
    pub async fn submit_vt(&self, request_id: Uuid) -> CoreResult<VtSubmission> {
        let request = self.requests.require(request_id).await?;

        let observed = self.vts.get_raw(request_id).await?;
        let (vt, observed_raw) = match observed {
            Some((vt, raw)) => (vt, Some(raw)),
            None => (VtRequest::new(request_id), None),
        };
        if vt.status != VtStatus::Pending {
            return Err(CoreError::precondition("already submitted"));
        }

        if let Some(case) = self.insurance.get(request_id).await? {
            if case.status != InsuranceStatus::Approved {
                return Err(CoreError::precondition("insurer approval required"));
            }
        }

        let selection = self.selections.get(request_id).await?;
        let (amount, warnings) = resolve_amount(vt.quoted_amount, selection.as_ref());

        let now = Utc::now();
        let vt_folio = self.allocate_folio(now).await?;

        let mut submitted = vt.clone();
        submitted.status = VtStatus::Submitted;
        submitted.vt_folio = Some(vt_folio.clone());
        submitted.submitted_at = Some(now);
        let won = self
            .vts
            .submit_if_unchanged(&submitted, observed_raw.as_deref())
            .await?;
        if !won {
            // another caller transitioned the record between our read and
            // the compare-and-set
            return Err(CoreError::precondition("already submitted"));
        }

        let profile = match self.patients.get(request_id).await? {
            Some(profile) => profile,
            None => PatientProfile::seeded_from_name(request_id, &request.patient_name),
        };
        let selection = selection.unwrap_or_else(|| ServiceSelection::new(request_id));

        let case = AdminCase {
            vt_folio: vt_folio.clone(),
            request_id,
            created_at: now,
            patient: PatientSnapshot::from_profile(&request.patient_name, &profile),
            service: ServiceSnapshot::from_selection(&selection),
            insurer: InsurerSnapshot::from_selection(&selection),
            amount,
            approval: ApprovalStatus::Pending,
            purchasing: PurchasingStatus::Pending,
            logistics: LogisticsStatus::Pending,
            results: ResultsStatus::Pending,
            invoicing: InvoicingStatus::Pending,
            collections: CollectionsStatus::Pending,
            lab_payments: Vec::new(),
            invoice: None,
            outstanding_balance: Decimal::ZERO,
            payments: Vec::new(),
        };
        self.cases.save(&case).await?;

        log_warnings("submit_vt", &warnings);
        tracing::info!(request_id = %request_id, vt_folio = %vt_folio, "spawned admin case");
        Ok(VtSubmission {
            vt: submitted,
            case,
            warnings,
        })
    }

    /// Allocates a VT folio not already present in the case repository.
    ///
    /// The timestamp-plus-random format carries limited entropy, so the
    /// repository is consulted before the folio is finalized.
    async fn allocate_folio(&self, now: DateTime<Utc>) -> CoreResult<String> {
        for _ in 0..self.config.id_max_attempts {
            let folio = generate_folio(now);
            if !self.cases.exists(&folio).await? {
                return Ok(folio);
            }
        }
        Err(CoreError::Storage(
            "could not allocate a unique VT folio".into(),
        ))
    }
}

/// Builds a folio of the form `VT-{yyyyMMdd}-{HHmmss}-{3-digit random}`
fn generate_folio(now: DateTime<Utc>) -> String {
    let suffix: u16 = rand::thread_rng().gen_range(0..1000);
    format!(
        "VT-{}-{}-{suffix:03}",
        now.format("%Y%m%d"),
        now.format("%H%M%S")
    )
}

/// Resolves the effective case amount: the explicit quote wins, then the
/// selection-derived amount. A non-positive result is flagged but never
/// blocks the workflow.
fn resolve_amount(
    quoted: Option<Decimal>,
    selection: Option<&ServiceSelection>,
) -> (Decimal, Vec<Warning>) {
    let resolved = quoted
        .or_else(|| selection.map(ServiceSelection::amount))
        .unwrap_or(Decimal::ZERO);
    if resolved <= Decimal::ZERO {
        (resolved, vec![Warning::MissingPrice])
    } else {
        (resolved, Vec::new())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use catalog_service::{Insurer, ServiceEntry, StaticCatalog};
    use insurance_service::InsuranceService;
    use intake_service::{
        IntakeService, NewServiceRequest, PaymentMethod, SelectionService,
    };
    use storage_layer::MemoryStore;

    fn catalog() -> Arc<StaticCatalog> {
        Arc::new(StaticCatalog::new(
            vec![ServiceEntry {
                id: "SVC-01".into(),
                name: "Exome sequencing".into(),
                lab_name: "Genolab".into(),
                unit_price: Decimal::new(1000000, 2), // 10000.00
                unit_cost: Decimal::new(700000, 2),
                turnaround: "15 business days".into(),
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
                patient_name: "Jorge Luna Prieto".into(),
                condition: "Suspected Lynch syndrome".into(),
                test_type: "Genetic panel".into(),
                contact_phone: "5550001111".into(),
                specialist_phone: "5552223333".into(),
            })
            .await
            .unwrap()
            .id
    }

    #[tokio::test]
    async fn test_submit_without_insurance_case_succeeds() {
        let store = Arc::new(MemoryStore::new());
        let request_id = request_on(store.clone()).await;
        SelectionService::new(store.clone(), catalog())
            .set_service(request_id, "SVC-01")
            .await
            .unwrap();

        // no insurance case at all: the gate treats the request as ungated
        let submission = VtGateService::new(store).submit_vt(request_id).await.unwrap();
        assert_eq!(submission.vt.status, VtStatus::Submitted);
        assert!(submission.warnings.is_empty());
        assert_eq!(submission.case.amount, Decimal::new(1000000, 2));
        assert!(submission.case.vt_folio.starts_with("VT-"));
    }

    #[tokio::test]
    async fn test_submit_is_idempotent() {
        let store = Arc::new(MemoryStore::new());
        let request_id = request_on(store.clone()).await;
        let gate = VtGateService::new(store.clone());

        gate.submit_vt(request_id).await.unwrap();
        let err = gate.submit_vt(request_id).await.unwrap_err();
        assert_eq!(err.to_string(), "Precondition failed: already submitted");

        // exactly one case was spawned
        let folios = AdminCaseRepository::new(store).list_folios().await.unwrap();
        assert_eq!(folios.len(), 1);
    }

    #[tokio::test]
    async fn test_unapproved_insurance_blocks_gate() {
        let store = Arc::new(MemoryStore::new());
        let request_id = request_on(store.clone()).await;
        let selections = SelectionService::new(store.clone(), catalog());
        selections.set_service(request_id, "SVC-01").await.unwrap();
        selections
            .set_payment_method(request_id, PaymentMethod::InsurerBilled)
            .await
            .unwrap();
        selections.set_insurer(request_id, "INS-01").await.unwrap();

        let insurance = InsuranceService::new(store.clone());
        insurance.submit(request_id).await.unwrap();

        let gate = VtGateService::new(store.clone());
        let err = gate.submit_vt(request_id).await.unwrap_err();
        assert_eq!(
            err.to_string(),
            "Precondition failed: insurer approval required"
        );

        insurance
            .record_outcome(request_id, InsuranceStatus::Approved)
            .await
            .unwrap();
        let submission = gate.submit_vt(request_id).await.unwrap();
        let insurer = submission.case.insurer.unwrap();
        assert_eq!(insurer.tax_id, "ASE010101AAA");
    }

    #[tokio::test]
    async fn test_quoted_amount_takes_priority() {
        let store = Arc::new(MemoryStore::new());
        let request_id = request_on(store.clone()).await;
        SelectionService::new(store.clone(), catalog())
            .set_service(request_id, "SVC-01")
            .await
            .unwrap();
        IntakeService::new(store.clone())
            .set_quoted_amount(request_id, Some(Decimal::new(850000, 2)))
            .await
            .unwrap();

        let submission = VtGateService::new(store).submit_vt(request_id).await.unwrap();
        assert_eq!(submission.case.amount, Decimal::new(850000, 2));
    }

    #[tokio::test]
    async fn test_missing_price_warns_but_spawns() {
        let store = Arc::new(MemoryStore::new());
        let request_id = request_on(store.clone()).await;

        // no selection, no quote
        let submission = VtGateService::new(store).submit_vt(request_id).await.unwrap();
        assert_eq!(submission.warnings, vec![Warning::MissingPrice]);
        assert_eq!(submission.case.amount, Decimal::ZERO);
    }

    #[tokio::test]
    async fn test_snapshot_survives_later_edits() {
        let store = Arc::new(MemoryStore::new());
        let request_id = request_on(store.clone()).await;
        let submission = VtGateService::new(store.clone())
            .submit_vt(request_id)
            .await
            .unwrap();

        // edit the patient profile after the spawn
        let intake = IntakeService::new(store.clone());
        let mut profile = intake.get_patient(request_id).await.unwrap().unwrap();
        profile.first_name = "Renamed".into();
        intake.save_patient(profile).await.unwrap();

        let case = AdminCaseRepository::new(store)
            .require(&submission.case.vt_folio)
            .await
            .unwrap();
        assert_eq!(case.patient.first_name, "Jorge");
    }

    #[test]
    fn test_folio_format() {
        let now = Utc::now();
        let folio = generate_folio(now);
        let parts: Vec<&str> = folio.split('-').collect();
        assert_eq!(parts[0], "VT");
        assert_eq!(parts[1].len(), 8);
        assert_eq!(parts[2].len(), 6);
        assert_eq!(parts[3].len(), 3);
    }
}

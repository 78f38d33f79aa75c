use crate::models::PaymentSummary;
use admin_service::{AdminCase, AdminCaseRepository, CollectionsStatus, InvoicingStatus, PaymentRecord};
use chrono::{DateTime, Utc};
use error_common::{CoreError, CoreResult};
use rust_decimal::Decimal;
use std::sync::Arc;
use storage_layer::KeyValueStore;

/// Collections ledger: draws down the outstanding balance of a stamped
/// invoice and flips the case to paid when it reaches zero
#[derive(Clone)]
pub struct CollectionsService {
    cases: AdminCaseRepository,
}

impl CollectionsService {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self {
            cases: AdminCaseRepository::new(store),
        }
    }

    /// Applies a payment against the case's invoice.
    ///
    /// The amount must be positive and the invoice stamped. Overpayment is
    /// accepted and floors the balance at zero; the excess is not tracked as
    /// a refund. The payment is appended to the case's history with its
    /// timestamp and reference.
    pub async fn apply_payment(
        &self,
        vt_folio: &str,
        amount: Decimal,
        paid_on: DateTime<Utc>,
        reference: impl Into<String>,
    ) -> CoreResult<AdminCase> {
        if amount <= Decimal::ZERO {
            return Err(CoreError::validation("Payment amount must be positive"));
        }
        let mut case = self.cases.require(vt_folio).await?;
        if case.invoicing != InvoicingStatus::Stamped {
            return Err(CoreError::precondition(
                "case has no stamped invoice to collect against",
            ));
        }

        let new_balance = (case.outstanding_balance - amount).max(Decimal::ZERO);
        case.outstanding_balance = new_balance;
        case.collections = if new_balance.is_zero() {
            CollectionsStatus::Paid
        } else {
            CollectionsStatus::Pending
        };
        case.payments.push(PaymentRecord {
            amount,
            paid_on,
            reference: reference.into(),
        });
        self.cases.save(&case).await?;
        tracing::info!(
            vt_folio = %vt_folio,
            amount = %amount,
            balance = %new_balance,
            "applied payment"
        );
        Ok(case)
    }

    /// Balance view of a stamped case for the document renderer
    pub async fn payment_summary(&self, vt_folio: &str) -> CoreResult<PaymentSummary> {
        let case = self.cases.require(vt_folio).await?;
        let invoice = case
            .invoice
            .as_ref()
            .ok_or_else(|| CoreError::precondition("case has no issued invoice"))?;
        Ok(PaymentSummary {
            vt_folio: case.vt_folio.clone(),
            invoice_folio: invoice.folio.clone(),
            total: invoice.total,
            paid_amount: case.paid_amount(),
            outstanding_balance: case.outstanding_balance,
            payments: case.payments.clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use admin_service::{ApprovalStatus, FulfillmentService, InvoiceType, VtGateService};
    use billing_service::{InvoiceDraft, InvoicingService};
    use intake_service::{IntakeService, NewServiceRequest};
    use storage_layer::MemoryStore;

    async fn stamped_case(store: Arc<MemoryStore>, pre_tax: Decimal, tax: Decimal) -> String {
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
        let folio = VtGateService::new(store.clone())
            .submit_vt(request.id)
            .await
            .unwrap()
            .case
            .vt_folio;
        FulfillmentService::new(store.clone())
            .set_approval_status(&folio, ApprovalStatus::Approved)
            .await
            .unwrap();
        InvoicingService::new(store)
            .issue_invoice(
                &folio,
                InvoiceDraft {
                    recipient_tax_id: "LUPJ840101AAA".into(),
                    legal_name: "Jorge Luna Prieto".into(),
                    postal_code: "06100".into(),
                    invoice_type: InvoiceType::SinglePayment,
                    payment_method_label: "transfer".into(),
                    tax_regime: "612".into(),
                    product_code: "85121800".into(),
                    concept: "Genetic panel".into(),
                    pre_tax_amount: pre_tax,
                    tax_percent: Some(tax),
                    folio: "F-0001".into(),
                },
            )
            .await
            .unwrap();
        folio
    }

    #[tokio::test]
    async fn test_partial_then_full_settlement() {
        let store = Arc::new(MemoryStore::new());
        // 862.07 at 16% stamps a 1000.00 total
        let folio = stamped_case(store.clone(), Decimal::new(86207, 2), Decimal::from(16)).await;
        let collections = CollectionsService::new(store);

        let case = collections
            .apply_payment(&folio, Decimal::new(40000, 2), Utc::now(), "wire-1")
            .await
            .unwrap();
        assert_eq!(case.outstanding_balance, Decimal::new(60000, 2));
        assert_eq!(case.collections, CollectionsStatus::Pending);
        assert_eq!(case.paid_amount(), Decimal::new(40000, 2));

        let case = collections
            .apply_payment(&folio, Decimal::new(60000, 2), Utc::now(), "wire-2")
            .await
            .unwrap();
        assert_eq!(case.outstanding_balance, Decimal::ZERO);
        assert_eq!(case.collections, CollectionsStatus::Paid);

        // overpayment after settlement floors at zero without erroring
        let case = collections
            .apply_payment(&folio, Decimal::new(5000, 2), Utc::now(), "wire-3")
            .await
            .unwrap();
        assert_eq!(case.outstanding_balance, Decimal::ZERO);
        assert_eq!(case.collections, CollectionsStatus::Paid);
        assert_eq!(case.payments.len(), 3);
    }

    #[tokio::test]
    async fn test_balance_invariant_holds() {
        let store = Arc::new(MemoryStore::new());
        let folio = stamped_case(store.clone(), Decimal::new(100000, 2), Decimal::from(16)).await;
        let collections = CollectionsService::new(store);

        // 1160.00 total; a 2000.00 payment floors the balance
        let case = collections
            .apply_payment(&folio, Decimal::new(200000, 2), Utc::now(), "wire-big")
            .await
            .unwrap();
        assert!(case.outstanding_balance >= Decimal::ZERO);
        assert!(case.outstanding_balance <= case.invoice.as_ref().unwrap().total);
        assert_eq!(case.collections, CollectionsStatus::Paid);
    }

    #[tokio::test]
    async fn test_payment_requires_stamped_invoice() {
        let store = Arc::new(MemoryStore::new());
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
        let folio = VtGateService::new(store.clone())
            .submit_vt(request.id)
            .await
            .unwrap()
            .case
            .vt_folio;

        let err = CollectionsService::new(store)
            .apply_payment(&folio, Decimal::new(10000, 2), Utc::now(), "early")
            .await
            .unwrap_err();
        assert!(matches!(err, CoreError::Precondition(_)));
    }

    #[tokio::test]
    async fn test_non_positive_amount_rejected() {
        let store = Arc::new(MemoryStore::new());
        let folio = stamped_case(store.clone(), Decimal::new(100000, 2), Decimal::from(16)).await;
        let collections = CollectionsService::new(store);

        let err = collections
            .apply_payment(&folio, Decimal::ZERO, Utc::now(), "zero")
            .await
            .unwrap_err();
        assert!(matches!(err, CoreError::Validation(_)));
    }

    #[tokio::test]
    async fn test_payment_summary() {
        let store = Arc::new(MemoryStore::new());
        let folio = stamped_case(store.clone(), Decimal::new(86207, 2), Decimal::from(16)).await;
        let collections = CollectionsService::new(store);

        collections
            .apply_payment(&folio, Decimal::new(25000, 2), Utc::now(), "wire-1")
            .await
            .unwrap();

        let summary = collections.payment_summary(&folio).await.unwrap();
        assert_eq!(summary.total, Decimal::new(100000, 2));
        assert_eq!(summary.paid_amount, Decimal::new(25000, 2));
        assert_eq!(summary.outstanding_balance, Decimal::new(75000, 2));
        assert_eq!(summary.payments.len(), 1);
        assert_eq!(summary.invoice_folio, "F-0001");
    }
}

use crate::models::{BillingConfig, InvoiceDraft};
use crate::tax::tax_breakdown;
use admin_service::{AdminCase, AdminCaseRepository, ApprovalStatus, InvoiceRecord, InvoicingStatus};
use chrono::Utc;
use error_common::{CoreError, CoreResult};
use rust_decimal::Decimal;
use std::sync::Arc;
use storage_layer::KeyValueStore;
use uuid::Uuid;

/// Invoicing engine: issues the one active invoice of an admin case
#[derive(Clone)]
pub struct InvoicingService {
    cases: AdminCaseRepository,
    config: BillingConfig,
}

impl InvoicingService {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self::with_config(store, BillingConfig::default())
    }

    pub fn with_config(store: Arc<dyn KeyValueStore>, config: BillingConfig) -> Self {
        Self {
            cases: AdminCaseRepository::new(store),
            config,
        }
    }

    /// Issues and stamps the invoice for a case.
    ///
    /// Requires administrative approval, a pending invoicing track, a
    /// non-empty folio, and a positive pre-tax amount (a non-positive amount
    /// would seed the collections ledger with an uncollectable balance).
    /// On success the pre-tax amount and tax percent are
    /// frozen, the issuance timestamp and authorization token recorded, and
    /// the outstanding balance initialized to the invoice total. Corrections
    /// after stamping go through a credit adjustment, never an edit.
    pub async fn issue_invoice(&self, vt_folio: &str, draft: InvoiceDraft) -> CoreResult<AdminCase> {
        let mut case = self.cases.require(vt_folio).await?;
        if case.approval != ApprovalStatus::Approved {
            return Err(CoreError::precondition(
                "cannot invoice an unapproved case",
            ));
        }
        if case.invoicing != InvoicingStatus::Pending {
            return Err(CoreError::precondition("already issued"));
        }
        if draft.folio.trim().is_empty() {
            return Err(CoreError::validation("Invoice folio is required"));
        }
        if draft.pre_tax_amount <= Decimal::ZERO {
            return Err(CoreError::validation("Pre-tax amount must be positive"));
        }

        let tax_percent = draft
            .tax_percent
            .unwrap_or(self.config.default_tax_percent);
        let breakdown = tax_breakdown(draft.pre_tax_amount, tax_percent);

        let invoice = InvoiceRecord {
            recipient_tax_id: draft.recipient_tax_id,
            legal_name: draft.legal_name,
            postal_code: draft.postal_code,
            invoice_type: draft.invoice_type,
            payment_method_label: draft.payment_method_label,
            tax_regime: draft.tax_regime,
            product_code: draft.product_code,
            concept: draft.concept,
            pre_tax_amount: draft.pre_tax_amount,
            tax_percent,
            tax_amount: breakdown.tax_amount,
            total: breakdown.total,
            folio: draft.folio,
            issued_at: Utc::now(),
            authorization_token: Uuid::new_v4().to_string(),
        };

        case.invoice = Some(invoice);
        case.invoicing = InvoicingStatus::Stamped;
        case.outstanding_balance = breakdown.total;
        self.cases.save(&case).await?;
        tracing::info!(vt_folio = %vt_folio, total = %breakdown.total, "stamped invoice");
        Ok(case)
    }
}

use admin_service::{AdminCase, AdminCaseRepository, InvoiceType};
use chrono::{DateTime, Utc};
use error_common::{CoreError, CoreResult};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use storage_layer::KeyValueStore;

/// Printable invoice data handed to the external document renderer.
///
/// The engine supplies data only; layout and formatting live outside the
/// core.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InvoiceDocument {
    pub vt_folio: String,
    pub patient_name: String,
    pub recipient_tax_id: String,
    pub legal_name: String,
    pub postal_code: String,
    pub invoice_type: InvoiceType,
    pub payment_method_label: String,
    pub tax_regime: String,
    pub product_code: String,
    pub concept: String,
    pub pre_tax_amount: Decimal,
    pub tax_percent: Decimal,
    pub tax_amount: Decimal,
    pub total: Decimal,
    pub folio: String,
    pub issued_at: DateTime<Utc>,
    pub authorization_token: String,
}

impl InvoiceDocument {
    /// Assembles the document from a stamped case
    pub fn from_case(case: &AdminCase) -> CoreResult<Self> {
        let invoice = case
            .invoice
            .as_ref()
            .ok_or_else(|| CoreError::precondition("case has no issued invoice"))?;
        Ok(Self {
            vt_folio: case.vt_folio.clone(),
            patient_name: case.patient.display_name.clone(),
            recipient_tax_id: invoice.recipient_tax_id.clone(),
            legal_name: invoice.legal_name.clone(),
            postal_code: invoice.postal_code.clone(),
            invoice_type: invoice.invoice_type,
            payment_method_label: invoice.payment_method_label.clone(),
            tax_regime: invoice.tax_regime.clone(),
            product_code: invoice.product_code.clone(),
            concept: invoice.concept.clone(),
            pre_tax_amount: invoice.pre_tax_amount,
            tax_percent: invoice.tax_percent,
            tax_amount: invoice.tax_amount,
            total: invoice.total,
            folio: invoice.folio.clone(),
            issued_at: invoice.issued_at,
            authorization_token: invoice.authorization_token.clone(),
        })
    }
}

/// Loads a case and assembles its printable invoice data
pub async fn invoice_document(
    store: Arc<dyn KeyValueStore>,
    vt_folio: &str,
) -> CoreResult<InvoiceDocument> {
    let case = AdminCaseRepository::new(store).require(vt_folio).await?;
    InvoiceDocument::from_case(&case)
}

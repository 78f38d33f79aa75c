use admin_service::PaymentRecord;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Kind of standalone adjustment record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AdjustmentKind {
    CreditNote,
    Discount,
    Commission,
}

/// Standalone credit/debit adjustment (egreso).
///
/// Optionally linked to an invoice by reference only; it never mutates the
/// invoice or its balance. It is a parallel ledger entry for reporting.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreditAdjustment {
    pub id: Uuid,
    pub kind: AdjustmentKind,
    pub recipient_tax_id: String,
    pub legal_name: String,
    pub amount: Decimal,
    pub concept: String,
    pub folio: String,
    /// Token issued by an external authorizer, when one exists
    pub authorization_token: Option<String>,
    /// VT folio of the referenced case, by reference only
    pub linked_case_folio: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Fields to create a credit adjustment
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewCreditAdjustment {
    pub kind: AdjustmentKind,
    pub recipient_tax_id: String,
    pub legal_name: String,
    pub amount: Decimal,
    pub concept: String,
    pub folio: String,
    pub authorization_token: Option<String>,
    pub linked_case_folio: Option<String>,
}

/// Balance view of a stamped case, handed to the external document renderer
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaymentSummary {
    pub vt_folio: String,
    pub invoice_folio: String,
    pub total: Decimal,
    pub paid_amount: Decimal,
    pub outstanding_balance: Decimal,
    pub payments: Vec<PaymentRecord>,
}

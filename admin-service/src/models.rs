use chrono::{DateTime, NaiveDate, Utc};
use intake_service::{Address, Gender, PatientProfile, PaymentMethod, ServiceSelection};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use storage_layer::AttachmentRef;
use uuid::Uuid;

/// Administrative approval of the case
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ApprovalStatus {
    #[default]
    Pending,
    Approved,
    Rejected,
}

/// Purchasing track: ordering the study from the fulfilling laboratory
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PurchasingStatus {
    #[default]
    Pending,
    Ordered,
    Received,
    SentToLab,
}

/// Logistics track: sample collection and shipping
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LogisticsStatus {
    #[default]
    Pending,
    Scheduled,
    EnRoute,
    Collected,
    DeliveredToLab,
}

/// Results track: study execution at the laboratory
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ResultsStatus {
    #[default]
    Pending,
    InProgress,
    Completed,
}

/// Invoicing track
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum InvoicingStatus {
    #[default]
    Pending,
    Invoiced,
    Stamped,
}

/// Collections track
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CollectionsStatus {
    #[default]
    Pending,
    Paid,
}

/// Lab payment status
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LabPaymentStatus {
    #[default]
    Pending,
    InvoiceReceived,
    Paid,
}

/// Invoice from the fulfilling laboratory, owned by exactly one admin case
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LabPayment {
    pub id: Uuid,
    pub provider: String,
    pub invoice_folio: String,
    pub date: NaiveDate,
    pub amount: Decimal,
    pub currency: String,
    pub status: LabPaymentStatus,
    pub document: Option<AttachmentRef>,
}

/// Fields to append a lab payment to a case
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewLabPayment {
    pub provider: String,
    pub invoice_folio: String,
    pub date: NaiveDate,
    pub amount: Decimal,
    pub currency: String,
    pub document: Option<AttachmentRef>,
}

/// Invoice type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum InvoiceType {
    SinglePayment,
    DeferredPayment,
}

/// Issued invoice, embedded in the admin case.
///
/// Once issued the pre-tax amount and tax percent are frozen; corrections go
/// through a credit adjustment, never an edit.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InvoiceRecord {
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

/// Payment applied against the case's invoice
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaymentRecord {
    pub amount: Decimal,
    pub paid_on: DateTime<Utc>,
    pub reference: String,
}

/// Patient data frozen into the admin case at spawn time
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PatientSnapshot {
    pub display_name: String,
    pub first_name: String,
    pub last_name: String,
    pub phone: String,
    pub gender: Gender,
    pub national_id: String,
    pub birth_date: Option<NaiveDate>,
    pub address: Address,
}

impl PatientSnapshot {
    /// Copies the profile by value; later edits to the originating request
    /// never reach the snapshot
    pub fn from_profile(display_name: &str, profile: &PatientProfile) -> Self {
        Self {
            display_name: display_name.to_string(),
            first_name: profile.first_name.clone(),
            last_name: profile.last_name.clone(),
            phone: profile.phone.clone(),
            gender: profile.gender,
            national_id: profile.national_id.clone(),
            birth_date: profile.birth_date,
            address: profile.address.clone(),
        }
    }
}

/// Service data frozen into the admin case at spawn time
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceSnapshot {
    pub service_id: String,
    pub service_name: String,
    pub lab_name: String,
    pub unit_price: Decimal,
    pub quantity: u32,
    pub turnaround: String,
    pub payment_method: PaymentMethod,
}

impl ServiceSnapshot {
    pub fn from_selection(selection: &ServiceSelection) -> Self {
        Self {
            service_id: selection.service_id.clone(),
            service_name: selection.service_name.clone(),
            lab_name: selection.lab_name.clone(),
            unit_price: selection.unit_price,
            quantity: selection.quantity,
            turnaround: selection.turnaround.clone(),
            payment_method: selection.payment_method,
        }
    }
}

/// Insurer data frozen into the admin case at spawn time
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InsurerSnapshot {
    pub id: String,
    pub name: String,
    pub tax_id: String,
}

impl InsurerSnapshot {
    /// Builds the snapshot when the selection carries complete insurer data
    pub fn from_selection(selection: &ServiceSelection) -> Option<Self> {
        match (
            selection.insurer_id.as_ref(),
            selection.insurer_name.as_ref(),
            selection.insurer_tax_id.as_ref(),
        ) {
            (Some(id), Some(name), Some(tax_id)) => Some(Self {
                id: id.clone(),
                name: name.clone(),
                tax_id: tax_id.clone(),
            }),
            _ => None,
        }
    }
}

/// Administrative-side record spawned from a submitted VT request.
///
/// Identity is the VT folio. The snapshot fields are immutable; the six
/// status tracks, the lab payment list, and the monetary fields move
/// independently as the case is worked.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdminCase {
    pub vt_folio: String,
    pub request_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub patient: PatientSnapshot,
    pub service: ServiceSnapshot,
    pub insurer: Option<InsurerSnapshot>,
    /// Effective monetary amount resolved at spawn time
    pub amount: Decimal,
    pub approval: ApprovalStatus,
    pub purchasing: PurchasingStatus,
    pub logistics: LogisticsStatus,
    pub results: ResultsStatus,
    pub invoicing: InvoicingStatus,
    pub collections: CollectionsStatus,
    pub lab_payments: Vec<LabPayment>,
    pub invoice: Option<InvoiceRecord>,
    pub outstanding_balance: Decimal,
    pub payments: Vec<PaymentRecord>,
}

impl AdminCase {
    /// Amount collected so far: invoice total minus the outstanding balance
    pub fn paid_amount(&self) -> Decimal {
        match &self.invoice {
            Some(invoice) => invoice.total - self.outstanding_balance,
            None => Decimal::ZERO,
        }
    }
}

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Service request created by sales
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceRequest {
    pub id: Uuid,
    pub doctor_name: String,
    pub patient_name: String,
    /// Condition/diagnosis label as entered by sales
    pub condition: String,
    pub test_type: String,
    pub contact_phone: String,
    pub specialist_phone: String,
    /// Immutable once set
    pub created_at: DateTime<Utc>,
}

/// Fields required to create a service request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewServiceRequest {
    pub doctor_name: String,
    pub patient_name: String,
    pub condition: String,
    pub test_type: String,
    pub contact_phone: String,
    pub specialist_phone: String,
}

/// Partial edit of a request's display fields
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RequestEdit {
    pub doctor_name: Option<String>,
    pub patient_name: Option<String>,
    pub condition: Option<String>,
    pub test_type: Option<String>,
    pub contact_phone: Option<String>,
    pub specialist_phone: Option<String>,
}

/// Patient gender
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Gender {
    Female,
    Male,
    #[default]
    Unspecified,
}

/// Patient address components
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Address {
    pub street: String,
    pub exterior_number: String,
    pub interior_number: String,
    pub neighborhood: String,
    pub city: String,
    pub state: String,
    pub postal_code: String,
}

/// Patient profile, owned 1:1 by a service request.
///
/// Created at intake pre-seeded from the patient display name and
/// overwritten wholesale on each save; there is no edit history.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PatientProfile {
    pub request_id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub phone: String,
    pub gender: Gender,
    pub national_id: String,
    pub birth_date: Option<NaiveDate>,
    pub address: Address,
}

impl PatientProfile {
    /// Seeds a profile from the sales-entered display name, split on
    /// whitespace: first token becomes the first name, the rest the last name
    pub fn seeded_from_name(request_id: Uuid, display_name: &str) -> Self {
        let mut parts = display_name.split_whitespace();
        let first_name = parts.next().unwrap_or_default().to_string();
        let last_name = parts.collect::<Vec<_>>().join(" ");
        Self {
            request_id,
            first_name,
            last_name,
            phone: String::new(),
            gender: Gender::Unspecified,
            national_id: String::new(),
            birth_date: None,
            address: Address::default(),
        }
    }
}

/// How the request will be paid
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PaymentMethod {
    #[default]
    SelfPay,
    InsurerBilled,
}

/// Catalog service attached to a request, with quantity and payer data.
///
/// Invariant: insurer fields are `None` whenever the payment method is
/// self-pay; switching to self-pay clears them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceSelection {
    pub request_id: Uuid,
    pub service_id: String,
    pub service_name: String,
    pub lab_name: String,
    pub unit_price: Decimal,
    /// Delivery turnaround copied from the catalog
    pub turnaround: String,
    pub quantity: u32,
    pub payment_method: PaymentMethod,
    pub insurer_id: Option<String>,
    pub insurer_name: Option<String>,
    pub insurer_tax_id: Option<String>,
}

impl ServiceSelection {
    /// Empty selection for a request that has not picked a service yet
    pub fn new(request_id: Uuid) -> Self {
        Self {
            request_id,
            service_id: String::new(),
            service_name: String::new(),
            lab_name: String::new(),
            unit_price: Decimal::ZERO,
            turnaround: String::new(),
            quantity: 1,
            payment_method: PaymentMethod::SelfPay,
            insurer_id: None,
            insurer_name: None,
            insurer_tax_id: None,
        }
    }

    /// Derived amount: unit price times quantity
    pub fn amount(&self) -> Decimal {
        self.unit_price * Decimal::from(self.quantity)
    }

    /// Drops all insurer references (self-pay invariant)
    pub fn clear_insurer(&mut self) {
        self.insurer_id = None;
        self.insurer_name = None;
        self.insurer_tax_id = None;
    }
}

/// VT request status
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum VtStatus {
    #[default]
    Pending,
    Submitted,
    Approved,
}

/// Request-scoped VT record: sales-side handoff token to administration.
///
/// The pending → submitted transition happens at most once; the VT folio is
/// assigned at that transition and never changes afterwards.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VtRequest {
    pub request_id: Uuid,
    pub status: VtStatus,
    pub notes: String,
    /// Explicit quoted amount; takes priority over the selection-derived
    /// amount when the admin case is spawned
    pub quoted_amount: Option<Decimal>,
    /// Assigned exactly once, at the pending → submitted transition
    pub vt_folio: Option<String>,
    pub submitted_at: Option<DateTime<Utc>>,
}

impl VtRequest {
    /// Fresh pending VT record for a request
    pub fn new(request_id: Uuid) -> Self {
        Self {
            request_id,
            status: VtStatus::Pending,
            notes: String::new(),
            quoted_amount: None,
            vt_folio: None,
            submitted_at: None,
        }
    }
}

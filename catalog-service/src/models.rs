use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Test service offered by a fulfilling laboratory
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceEntry {
    pub id: String,
    pub name: String,
    pub lab_name: String,
    pub unit_price: Decimal,
    pub unit_cost: Decimal,
    /// Delivery turnaround shown to sales, e.g. "5-7 business days"
    pub turnaround: String,
}

/// Third-party insurer that can be billed for a request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Insurer {
    pub id: String,
    pub name: String,
    pub tax_id: String,
}

/// Referring specialist, looked up by phone number
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Specialist {
    pub id: String,
    pub name: String,
    pub phone: String,
    pub specialty: String,
}

/// Fulfilling laboratory
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Lab {
    pub id: String,
    pub name: String,
}

use admin_service::InvoiceType;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Fields supplied by the caller to issue an invoice
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InvoiceDraft {
    pub recipient_tax_id: String,
    pub legal_name: String,
    pub postal_code: String,
    pub invoice_type: InvoiceType,
    pub payment_method_label: String,
    pub tax_regime: String,
    pub product_code: String,
    pub concept: String,
    pub pre_tax_amount: Decimal,
    /// Tax percentage; falls back to [`BillingConfig::default_tax_percent`]
    pub tax_percent: Option<Decimal>,
    pub folio: String,
}

/// Billing configuration
#[derive(Debug, Clone)]
pub struct BillingConfig {
    /// Tax percentage applied when the draft does not carry one
    pub default_tax_percent: Decimal,
}

impl Default for BillingConfig {
    fn default() -> Self {
        Self {
            default_tax_percent: Decimal::from(16),
        }
    }
}

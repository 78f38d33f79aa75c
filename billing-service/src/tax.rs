use rust_decimal::{Decimal, RoundingStrategy};

/// Tax amount and total for an invoice
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TaxBreakdown {
    pub tax_amount: Decimal,
    pub total: Decimal,
}

fn round2(amount: Decimal) -> Decimal {
    amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// Computes `tax = round2(pre_tax × percent / 100)` and
/// `total = round2(pre_tax + tax)`, both rounded to 2 decimal places
/// half-away-from-zero
pub fn tax_breakdown(pre_tax_amount: Decimal, tax_percent: Decimal) -> TaxBreakdown {
    let tax_amount = round2(pre_tax_amount * tax_percent / Decimal::from(100));
    let total = round2(pre_tax_amount + tax_amount);
    TaxBreakdown { tax_amount, total }
}

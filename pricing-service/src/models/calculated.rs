//! Derived pricing breakdown for a document.

use crate::models::{DocumentKind, TaxMode};
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

/// Currency figures carry two decimal places when rounded.
pub const CURRENCY_SCALE: u32 = 2;

/// Round half away from zero, matching `Number.prototype.toFixed` on printed invoices.
pub fn round_currency(value: Decimal, scale: u32) -> Decimal {
    value.round_dp_with_strategy(scale, RoundingStrategy::MidpointAwayFromZero)
}

/// Intra-state supplies split GST into CGST + SGST; inter-state supplies levy IGST.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SupplyType {
    IntraState,
    InterState,
}

impl SupplyType {
    /// Intra-state when the customer's state is unknown or matches the supplier's.
    pub fn between(supplier_state: &str, customer_state: &str) -> Self {
        let customer = customer_state.trim();
        if customer.is_empty() || supplier_state.trim().eq_ignore_ascii_case(customer) {
            SupplyType::IntraState
        } else {
            SupplyType::InterState
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalculatedLine {
    pub description: String,
    pub quantity: Decimal,
    pub rate: Decimal,
    pub gross_value: Decimal,
    pub line_discount: Decimal,
    pub taxable_before_overall_discount: Decimal,
    pub prorated_discount: Decimal,
    pub taxable_value: Decimal,
    pub tax_rate_percent: Decimal,
    pub cgst: Decimal,
    pub sgst: Decimal,
    pub igst: Decimal,
    pub cess: Decimal,
    pub amount: Decimal,
}

impl CalculatedLine {
    fn rounded(&self, scale: u32) -> Self {
        let r = |v: Decimal| round_currency(v, scale);
        Self {
            description: self.description.clone(),
            quantity: self.quantity,
            rate: self.rate,
            gross_value: r(self.gross_value),
            line_discount: r(self.line_discount),
            taxable_before_overall_discount: r(self.taxable_before_overall_discount),
            prorated_discount: r(self.prorated_discount),
            taxable_value: r(self.taxable_value),
            tax_rate_percent: self.tax_rate_percent,
            cgst: r(self.cgst),
            sgst: r(self.sgst),
            igst: r(self.igst),
            cess: r(self.cess),
            amount: r(self.amount),
        }
    }
}

/// Fully resolved pricing of an invoice or quotation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalculatedDocument {
    pub kind: DocumentKind,
    pub supply_type: SupplyType,
    pub tax_mode: TaxMode,
    pub lines: Vec<CalculatedLine>,
    pub sub_total: Decimal,
    pub total_line_discount: Decimal,
    pub sub_total_after_line_discounts: Decimal,
    pub overall_discount_amount: Decimal,
    pub taxable_amount: Decimal,
    pub total_cgst: Decimal,
    pub total_sgst: Decimal,
    pub total_igst: Decimal,
    pub total_tax: Decimal,
    pub total_cess: Decimal,
    pub total_discount: Decimal,
    pub grand_total: Decimal,
    pub amount_paid: Decimal,
    pub balance_due: Decimal,
}

impl CalculatedDocument {
    /// A display copy with every currency figure rounded to `scale` places.
    pub fn rounded(&self, scale: u32) -> Self {
        let r = |v: Decimal| round_currency(v, scale);
        Self {
            kind: self.kind,
            supply_type: self.supply_type,
            tax_mode: self.tax_mode,
            lines: self.lines.iter().map(|line| line.rounded(scale)).collect(),
            sub_total: r(self.sub_total),
            total_line_discount: r(self.total_line_discount),
            sub_total_after_line_discounts: r(self.sub_total_after_line_discounts),
            overall_discount_amount: r(self.overall_discount_amount),
            taxable_amount: r(self.taxable_amount),
            total_cgst: r(self.total_cgst),
            total_sgst: r(self.total_sgst),
            total_igst: r(self.total_igst),
            total_tax: r(self.total_tax),
            total_cess: r(self.total_cess),
            total_discount: r(self.total_discount),
            grand_total: r(self.grand_total),
            amount_paid: r(self.amount_paid),
            balance_due: r(self.balance_due),
        }
    }
}

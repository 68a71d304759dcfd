//! Request and response bodies for the pricing HTTP API.

use crate::models::{CalculatedDocument, DocumentKind, InputWarning};
use crate::services::{amount_in_words, format_currency, CurrencyFormat};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Figures as the invoice page prints them.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DisplaySummary {
    pub sub_total: String,
    pub total_discount: String,
    pub taxable_amount: String,
    pub total_tax: String,
    pub total_cess: String,
    pub grand_total: String,
    pub amount_paid: String,
    pub balance_due: String,
    pub grand_total_in_words: String,
}

impl DisplaySummary {
    pub fn from_totals(totals: &CalculatedDocument, format: &CurrencyFormat) -> Self {
        let money = |value| format_currency(value, format);
        Self {
            sub_total: money(totals.sub_total),
            total_discount: money(totals.total_discount),
            taxable_amount: money(totals.taxable_amount),
            total_tax: money(totals.total_tax),
            total_cess: money(totals.total_cess),
            grand_total: money(totals.grand_total),
            amount_paid: money(totals.amount_paid),
            balance_due: money(totals.balance_due),
            grand_total_in_words: amount_in_words(totals.grand_total, format),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct TotalsResponse {
    pub totals: CalculatedDocument,
    pub display: DisplaySummary,
    pub warnings: Vec<InputWarning>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct NumberPreviewRequest {
    #[serde(default)]
    pub kind: DocumentKind,
    #[validate(range(min = 1))]
    pub counter: u64,
    /// Defaults to today.
    pub date: Option<NaiveDate>,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NumberPreviewResponse {
    pub number: String,
    pub next_counter: u64,
}

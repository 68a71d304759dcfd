//! Currency display formatting.

use crate::models::round_currency;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use validator::Validate;

/// How digits are grouped and how large numbers are named.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NumberingSystem {
    /// 12,34,567: lakh and crore.
    #[default]
    Indian,
    /// 1,234,567: thousand, million and so on.
    International,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct CurrencyFormat {
    #[serde(default = "default_symbol")]
    pub symbol: String,
    #[validate(range(max = 4))]
    #[serde(default = "default_decimal_places")]
    pub decimal_places: u32,
    #[serde(default)]
    pub numbering_system: NumberingSystem,
    /// Name of the currency in printed amounts, e.g. "Rupees".
    #[serde(default = "default_major_unit")]
    pub major_unit: String,
    /// Name of the hundredth unit, e.g. "Paise".
    #[serde(default = "default_minor_unit")]
    pub minor_unit: String,
}

fn default_symbol() -> String {
    "₹".to_string()
}

fn default_decimal_places() -> u32 {
    2
}

fn default_major_unit() -> String {
    "Rupees".to_string()
}

fn default_minor_unit() -> String {
    "Paise".to_string()
}

impl Default for CurrencyFormat {
    fn default() -> Self {
        Self {
            symbol: default_symbol(),
            decimal_places: default_decimal_places(),
            numbering_system: NumberingSystem::default(),
            major_unit: default_major_unit(),
            minor_unit: default_minor_unit(),
        }
    }
}

fn group_digits(digits: &str, system: NumberingSystem) -> String {
    if digits.len() <= 3 {
        return digits.to_string();
    }

    let (head, last_three) = digits.split_at(digits.len() - 3);
    let group = match system {
        NumberingSystem::Indian => 2,
        NumberingSystem::International => 3,
    };

    let mut groups: Vec<&str> = Vec::new();
    let mut end = head.len();
    while end > 0 {
        let start = end.saturating_sub(group);
        groups.push(&head[start..end]);
        end = start;
    }
    groups.reverse();
    groups.push(last_three);
    groups.join(",")
}

/// Format `amount` for display, e.g. `₹12,34,567.89`.
pub fn format_currency(amount: Decimal, format: &CurrencyFormat) -> String {
    let rounded = round_currency(amount, format.decimal_places);
    let negative = rounded.is_sign_negative() && !rounded.is_zero();

    let mut fixed = rounded.abs();
    fixed.rescale(format.decimal_places);
    let text = fixed.to_string();

    let (int_part, frac_part) = match text.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (text.as_str(), None),
    };

    let mut out = String::new();
    if negative {
        out.push('-');
    }
    out.push_str(&format.symbol);
    out.push_str(&group_digits(int_part, format.numbering_system));
    if let Some(frac) = frac_part {
        out.push('.');
        out.push_str(frac);
    }
    out
}

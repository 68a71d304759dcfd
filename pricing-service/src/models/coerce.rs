//! Permissive coercion of loosely-typed form values into decimals.
//!
//! Browser forms post numbers as JSON numbers, numeric strings, empty strings
//! or not at all. Coercion never fails: anything unusable becomes zero and is
//! reported through an [`InputWarning`].

use crate::models::Discount;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Largest accepted magnitude for any amount or quantity (1e9).
pub const MAX_AMOUNT: Decimal = Decimal::from_parts(1_000_000_000, 0, 0, false, 0);

const MAX_PERCENT: Decimal = Decimal::ONE_HUNDRED;

/// `value`, or zero when its magnitude exceeds [`MAX_AMOUNT`].
pub fn bound_amount(value: Decimal) -> Decimal {
    if value.abs() > MAX_AMOUNT {
        Decimal::ZERO
    } else {
        value
    }
}

/// `value` clamped to 0..=100.
pub fn clamp_percent(value: Decimal) -> Decimal {
    value.clamp(Decimal::ZERO, MAX_PERCENT)
}

/// A numeric form value as it arrives on the wire.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawNumber {
    #[default]
    Missing,
    Number(serde_json::Number),
    Text(String),
    /// Booleans, arrays and objects: never numeric, coerced to 0.
    Other(serde_json::Value),
}

impl RawNumber {
    fn describe(&self) -> String {
        match self {
            RawNumber::Missing => String::new(),
            RawNumber::Number(n) => n.to_string(),
            RawNumber::Text(s) => s.clone(),
            RawNumber::Other(v) => v.to_string(),
        }
    }
}

impl From<i64> for RawNumber {
    fn from(value: i64) -> Self {
        RawNumber::Number(value.into())
    }
}

/// A value that was coerced rather than taken verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InputWarning {
    /// Zero-based line item index, `None` for document-level fields.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line: Option<usize>,
    pub field: &'static str,
    pub value: String,
    pub message: String,
}

#[derive(Debug, PartialEq)]
enum Parsed {
    Blank,
    Exact(Decimal),
    /// A valid leading number followed by ignored characters.
    Prefix(Decimal),
    Invalid,
}

/// Parse the longest leading decimal of `text`, the way `parseFloat` does.
fn parse_leading(text: &str) -> Parsed {
    let s = text.trim();
    if s.is_empty() {
        return Parsed::Blank;
    }

    let bytes = s.as_bytes();
    let mut end = 0;
    let negative = bytes.first() == Some(&b'-');
    if matches!(bytes.first(), Some(b'+') | Some(b'-')) {
        end += 1;
    }
    let int_start = end;
    while end < bytes.len() && bytes[end].is_ascii_digit() {
        end += 1;
    }
    let int_part = &s[int_start..end];
    let mut frac_part = "";
    if end < bytes.len() && bytes[end] == b'.' {
        let frac_start = end + 1;
        let mut frac_end = frac_start;
        while frac_end < bytes.len() && bytes[frac_end].is_ascii_digit() {
            frac_end += 1;
        }
        frac_part = &s[frac_start..frac_end];
        end = frac_end;
    }
    if int_part.is_empty() && frac_part.is_empty() {
        return Parsed::Invalid;
    }

    let mut exponent = "";
    if end < bytes.len() && matches!(bytes[end], b'e' | b'E') {
        let mut exp_end = end + 1;
        if exp_end < bytes.len() && matches!(bytes[exp_end], b'+' | b'-') {
            exp_end += 1;
        }
        let exp_digits_start = exp_end;
        while exp_end < bytes.len() && bytes[exp_end].is_ascii_digit() {
            exp_end += 1;
        }
        if exp_end > exp_digits_start {
            exponent = &s[end + 1..exp_end];
            end = exp_end;
        }
    }

    // Rebuild in a form rust_decimal accepts: "-0.5" rather than "-.5", "7" rather than "7.".
    let mut number = String::with_capacity(end + 2);
    if negative {
        number.push('-');
    }
    number.push_str(if int_part.is_empty() { "0" } else { int_part });
    if !frac_part.is_empty() {
        number.push('.');
        number.push_str(frac_part);
    }
    let value = if exponent.is_empty() {
        Decimal::from_str(&number)
    } else {
        number.push('e');
        number.push_str(exponent);
        Decimal::from_scientific(&number)
    };

    match value {
        Ok(v) if end == s.len() => Parsed::Exact(v),
        Ok(v) => Parsed::Prefix(v),
        Err(_) => Parsed::Invalid,
    }
}

/// Collects warnings while turning raw form values into decimals.
#[derive(Debug, Default)]
pub struct Coercer {
    line: Option<usize>,
    warnings: Vec<InputWarning>,
}

impl Coercer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Attribute subsequent warnings to a line item (or the document with `None`).
    pub fn at_line(&mut self, line: Option<usize>) {
        self.line = line;
    }

    fn warn(&mut self, field: &'static str, value: String, message: impl Into<String>) {
        self.warnings.push(InputWarning {
            line: self.line,
            field,
            value,
            message: message.into(),
        });
    }

    fn resolve(&mut self, field: &'static str, shown: String, parsed: Parsed) -> Decimal {
        match parsed {
            Parsed::Blank => Decimal::ZERO,
            Parsed::Exact(v) => v,
            Parsed::Prefix(v) => {
                self.warn(field, shown, "trailing characters ignored");
                v
            }
            Parsed::Invalid => {
                self.warn(field, shown, "not a number, treated as 0");
                Decimal::ZERO
            }
        }
    }

    fn parse(&mut self, field: &'static str, raw: &RawNumber) -> Decimal {
        let parsed = match raw {
            RawNumber::Missing => Parsed::Blank,
            RawNumber::Number(n) => match parse_leading(&n.to_string()) {
                Parsed::Prefix(_) => Parsed::Invalid,
                other => other,
            },
            RawNumber::Text(s) => parse_leading(s),
            RawNumber::Other(_) => Parsed::Invalid,
        };
        self.resolve(field, raw.describe(), parsed)
    }

    fn bounded(&mut self, field: &'static str, raw: &RawNumber, value: Decimal) -> Decimal {
        let bounded = bound_amount(value);
        if bounded != value {
            self.warn(field, raw.describe(), "out of range, treated as 0");
        }
        bounded
    }

    fn clamped(&mut self, field: &'static str, raw: &RawNumber, value: Decimal) -> Decimal {
        let clamped = clamp_percent(value);
        if clamped < value {
            self.warn(field, raw.describe(), "percentage clamped to 100");
        } else if clamped > value {
            self.warn(field, raw.describe(), "negative percentage clamped to 0");
        }
        clamped
    }

    /// Quantities, rates and fixed amounts.
    pub fn amount(&mut self, field: &'static str, raw: &RawNumber) -> Decimal {
        let value = self.parse(field, raw);
        self.bounded(field, raw, value)
    }

    /// Tax and cess rates, clamped to 0..=100.
    pub fn percent(&mut self, field: &'static str, raw: &RawNumber) -> Decimal {
        let value = self.parse(field, raw);
        self.clamped(field, raw, value)
    }

    /// A discount in wire encoding: a number or `"100"` is fixed, `"5%"` a percentage.
    pub fn discount(&mut self, field: &'static str, raw: &RawNumber) -> Discount {
        let text = match raw {
            RawNumber::Text(s) if s.contains('%') => s.as_str(),
            _ => return Discount::Fixed(self.amount(field, raw)),
        };

        let (head, tail) = text.split_once('%').unwrap_or((text, ""));
        let parsed = match parse_leading(head) {
            Parsed::Blank => Parsed::Invalid,
            Parsed::Exact(v) if !tail.trim().is_empty() => Parsed::Prefix(v),
            other => other,
        };
        let value = self.resolve(field, raw.describe(), parsed);
        Discount::Percentage(self.clamped(field, raw, value))
    }

    pub fn into_warnings(self) -> Vec<InputWarning> {
        self.warnings
    }
}

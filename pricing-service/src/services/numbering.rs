//! Document numbering: prefix + zero-padded counter + suffix.
//!
//! Prefix and suffix may contain date tokens resolved against the document
//! date: `{YYYY}`, `{YY}`, `{MM}` and `{FY}` (financial year starting in
//! April, e.g. `24-25`). Unknown tokens are left as written.

use crate::error::PricingError;
use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use validator::Validate;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct NumberingSettings {
    #[validate(length(max = 32))]
    #[serde(default)]
    pub prefix: String,
    #[validate(length(max = 32))]
    #[serde(default)]
    pub suffix: String,
    #[validate(range(max = 12))]
    #[serde(default = "default_padding")]
    pub padding: usize,
}

fn default_padding() -> usize {
    4
}

impl NumberingSettings {
    pub fn new(prefix: impl Into<String>, suffix: impl Into<String>, padding: usize) -> Self {
        Self {
            prefix: prefix.into(),
            suffix: suffix.into(),
            padding,
        }
    }
}

/// Indian financial year label for `date`: April 2024 to March 2025 is `24-25`.
fn financial_year(date: NaiveDate) -> String {
    let start = if date.month() >= 4 {
        date.year()
    } else {
        date.year() - 1
    };
    format!(
        "{:02}-{:02}",
        start.rem_euclid(100),
        (start + 1).rem_euclid(100)
    )
}

fn expand_tokens(template: &str, date: NaiveDate) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(open) = rest.find('{') {
        out.push_str(&rest[..open]);
        let after = &rest[open..];
        let Some(close) = after.find('}') else {
            out.push_str(after);
            return out;
        };
        let token = &after[1..close];
        match token {
            "YYYY" => out.push_str(&format!("{:04}", date.year())),
            "YY" => out.push_str(&format!("{:02}", date.year().rem_euclid(100))),
            "MM" => out.push_str(&format!("{:02}", date.month())),
            "FY" => out.push_str(&financial_year(date)),
            _ => out.push_str(&after[..=close]),
        }
        rest = &after[close + 1..];
    }

    out.push_str(rest);
    out
}

/// Render the document number for `counter` on `date`.
pub fn format_document_number(
    settings: &NumberingSettings,
    counter: u64,
    date: NaiveDate,
) -> Result<String, PricingError> {
    settings
        .validate()
        .map_err(|e| PricingError::InvalidNumbering(e.to_string()))?;

    Ok(format!(
        "{}{:0width$}{}",
        expand_tokens(&settings.prefix, date),
        counter,
        expand_tokens(&settings.suffix, date),
        width = settings.padding
    ))
}

/// Counter to use for the next document.
pub fn next_counter(counter: u64) -> u64 {
    counter.saturating_add(1)
}

//! Amounts in words for printed invoices:
//! "Rupees One Lakh Twenty Thousand and Fifty Paise Only".

use crate::models::round_currency;
use crate::services::currency::{CurrencyFormat, NumberingSystem};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;

const ONES: [&str; 20] = [
    "Zero",
    "One",
    "Two",
    "Three",
    "Four",
    "Five",
    "Six",
    "Seven",
    "Eight",
    "Nine",
    "Ten",
    "Eleven",
    "Twelve",
    "Thirteen",
    "Fourteen",
    "Fifteen",
    "Sixteen",
    "Seventeen",
    "Eighteen",
    "Nineteen",
];

const TENS: [&str; 10] = [
    "", "", "Twenty", "Thirty", "Forty", "Fifty", "Sixty", "Seventy", "Eighty", "Ninety",
];

const INTERNATIONAL_SCALES: [&str; 10] = [
    "",
    "Thousand",
    "Million",
    "Billion",
    "Trillion",
    "Quadrillion",
    "Quintillion",
    "Sextillion",
    "Septillion",
    "Octillion",
];

const CRORE: u128 = 10_000_000;
const LAKH: u128 = 100_000;

fn below_thousand(n: u128, out: &mut Vec<&'static str>) {
    let hundreds = (n / 100) as usize;
    let rest = (n % 100) as usize;
    if hundreds > 0 {
        out.push(ONES[hundreds]);
        out.push("Hundred");
    }
    if rest >= 20 {
        out.push(TENS[rest / 10]);
        if rest % 10 > 0 {
            out.push(ONES[rest % 10]);
        }
    } else if rest > 0 {
        out.push(ONES[rest]);
    }
}

fn indian(n: u128, out: &mut Vec<&'static str>) {
    if n >= CRORE {
        indian(n / CRORE, out);
        out.push("Crore");
        indian(n % CRORE, out);
        return;
    }
    if n >= LAKH {
        below_thousand(n / LAKH, out);
        out.push("Lakh");
    }
    let n = n % LAKH;
    if n >= 1000 {
        below_thousand(n / 1000, out);
        out.push("Thousand");
    }
    below_thousand(n % 1000, out);
}

fn international(n: u128, out: &mut Vec<&'static str>) {
    let mut groups = Vec::new();
    let mut rest = n;
    while rest > 0 {
        groups.push(rest % 1000);
        rest /= 1000;
    }
    for (scale, group) in groups.iter().enumerate().rev() {
        if *group == 0 {
            continue;
        }
        below_thousand(*group, out);
        if let Some(name) = INTERNATIONAL_SCALES.get(scale).filter(|s| !s.is_empty()) {
            out.push(*name);
        }
    }
}

/// Spell out a whole number, e.g. `1_20_000` → "One Lakh Twenty Thousand".
pub fn number_in_words(n: u128, system: NumberingSystem) -> String {
    if n == 0 {
        return ONES[0].to_string();
    }
    let mut words = Vec::new();
    match system {
        NumberingSystem::Indian => indian(n, &mut words),
        NumberingSystem::International => international(n, &mut words),
    }
    words.join(" ")
}

/// Spell out a currency amount, rounded to hundredths.
pub fn amount_in_words(amount: Decimal, format: &CurrencyFormat) -> String {
    let rounded = round_currency(amount, 2);
    let magnitude = rounded.abs();
    let whole = magnitude.trunc();
    let units = whole.to_u128().unwrap_or_default();
    let hundredths = ((magnitude - whole) * Decimal::ONE_HUNDRED)
        .to_u128()
        .unwrap_or_default();

    let mut out = String::new();
    if rounded.is_sign_negative() && !rounded.is_zero() {
        out.push_str("Minus ");
    }

    if units > 0 || hundredths == 0 {
        out.push_str(&format.major_unit);
        out.push(' ');
        out.push_str(&number_in_words(units, format.numbering_system));
        if hundredths > 0 {
            out.push_str(" and ");
        }
    }
    if hundredths > 0 {
        out.push_str(&number_in_words(hundredths, format.numbering_system));
        out.push(' ');
        out.push_str(&format.minor_unit);
    }
    out.push_str(" Only");
    out
}

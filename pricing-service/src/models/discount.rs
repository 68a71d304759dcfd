//! Discount model for pricing-service.

use crate::models::coerce::{bound_amount, clamp_percent};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

const HUNDRED: Decimal = Decimal::ONE_HUNDRED;

/// A discount expressed either as a percentage of a base or as a fixed amount.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum Discount {
    Percentage(Decimal),
    Fixed(Decimal),
}

impl Discount {
    /// No discount.
    pub fn none() -> Self {
        Discount::Fixed(Decimal::ZERO)
    }

    /// Resolve the discount against `base`.
    pub fn amount_on(&self, base: Decimal) -> Decimal {
        match self {
            Discount::Percentage(pct) => base * *pct / HUNDRED,
            Discount::Fixed(amount) => *amount,
        }
    }

    /// Percentages clamped to 0..=100, fixed amounts beyond `MAX_AMOUNT` zeroed.
    pub fn bounded(self) -> Self {
        match self {
            Discount::Percentage(pct) => Discount::Percentage(clamp_percent(pct)),
            Discount::Fixed(amount) => Discount::Fixed(bound_amount(amount)),
        }
    }
}

impl Default for Discount {
    fn default() -> Self {
        Discount::none()
    }
}

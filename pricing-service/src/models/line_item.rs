//! Line item model for pricing-service.

use crate::models::coerce::{bound_amount, clamp_percent, Coercer, RawNumber};
use crate::models::Discount;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Line item on an invoice or quotation, as consumed by the totals engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineItem {
    pub description: String,
    pub quantity: Decimal,
    /// Unit price.
    pub rate: Decimal,
    pub discount: Discount,
    pub tax_rate_percent: Decimal,
    /// Ad valorem cess, applied to the taxable value after all discounts.
    pub cess_rate_percent: Decimal,
    /// Specific cess per unit.
    pub cess_fixed_per_unit: Decimal,
}

impl LineItem {
    /// A plain item: no discount, no tax, no cess.
    pub fn new(description: impl Into<String>, quantity: Decimal, rate: Decimal) -> Self {
        Self {
            description: description.into(),
            quantity,
            rate,
            discount: Discount::none(),
            tax_rate_percent: Decimal::ZERO,
            cess_rate_percent: Decimal::ZERO,
            cess_fixed_per_unit: Decimal::ZERO,
        }
    }

    pub fn with_discount(mut self, discount: Discount) -> Self {
        self.discount = discount;
        self
    }

    pub fn with_tax_rate(mut self, percent: Decimal) -> Self {
        self.tax_rate_percent = percent;
        self
    }

    pub fn with_cess(mut self, rate_percent: Decimal, fixed_per_unit: Decimal) -> Self {
        self.cess_rate_percent = rate_percent;
        self.cess_fixed_per_unit = fixed_per_unit;
        self
    }

    /// The same limits coercion applies to posted lines, for items built in code.
    pub fn bounded(&self) -> Self {
        Self {
            description: self.description.clone(),
            quantity: bound_amount(self.quantity),
            rate: bound_amount(self.rate),
            discount: self.discount.bounded(),
            tax_rate_percent: clamp_percent(self.tax_rate_percent),
            cess_rate_percent: clamp_percent(self.cess_rate_percent),
            cess_fixed_per_unit: bound_amount(self.cess_fixed_per_unit),
        }
    }

    /// Quantity times rate, before any discount.
    pub fn gross_value(&self) -> Decimal {
        self.quantity * self.rate
    }
}

/// Line item as posted by the invoice and quotation pages.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LineItemInput {
    #[serde(alias = "itemName", alias = "name")]
    pub description: Option<String>,
    pub quantity: RawNumber,
    pub rate: RawNumber,
    pub discount_per_item: RawNumber,
    #[serde(alias = "taxRate")]
    pub tax_rate_percent: RawNumber,
    #[serde(alias = "cessRate")]
    pub cess_rate_percent: RawNumber,
    #[serde(alias = "cessFixed")]
    pub cess_fixed_per_unit: RawNumber,
}

impl LineItemInput {
    /// Coerce into a typed [`LineItem`], recording warnings on `coercer`.
    pub fn coerce(&self, coercer: &mut Coercer) -> LineItem {
        LineItem {
            description: self.description.clone().unwrap_or_default(),
            quantity: coercer.amount("quantity", &self.quantity),
            rate: coercer.amount("rate", &self.rate),
            discount: coercer.discount("discountPerItem", &self.discount_per_item),
            tax_rate_percent: coercer.percent("taxRatePercent", &self.tax_rate_percent),
            cess_rate_percent: coercer.percent("cessRatePercent", &self.cess_rate_percent),
            cess_fixed_per_unit: coercer.amount("cessFixedPerUnit", &self.cess_fixed_per_unit),
        }
    }

    /// Whether a tax rate was supplied at all.
    pub fn has_tax_rate(&self) -> bool {
        match &self.tax_rate_percent {
            RawNumber::Missing => false,
            RawNumber::Text(s) => !s.trim().is_empty(),
            RawNumber::Number(_) | RawNumber::Other(_) => true,
        }
    }
}

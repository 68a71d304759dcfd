//! GST rate catalog entry, as served by `GET /api/gst-rates`.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GstRate {
    #[serde(rename = "_id")]
    pub id: String,
    pub tax_name: String,
    pub tax_rate: Decimal,
    #[serde(default)]
    pub is_default_line_item_tax: bool,
}

/// Rate applied to new line items: the first catalog entry flagged as default.
pub fn default_line_item_rate(rates: &[GstRate]) -> Option<Decimal> {
    rates
        .iter()
        .find(|rate| rate.is_default_line_item_tax)
        .map(|rate| rate.tax_rate)
}

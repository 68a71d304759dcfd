//! Domain models for pricing-service.

mod calculated;
pub mod coerce;
mod discount;
mod document;
mod line_item;
mod tax_rate;

pub use calculated::{
    round_currency, CalculatedDocument, CalculatedLine, SupplyType, CURRENCY_SCALE,
};
pub use coerce::{InputWarning, RawNumber};
pub use discount::Discount;
pub use document::{Document, DocumentInput, DocumentKind, RoundingPolicy, TaxMode};
pub use line_item::{LineItem, LineItemInput};
pub use tax_rate::{default_line_item_rate, GstRate};

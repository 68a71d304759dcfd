//! Services module for pricing-service.

pub mod currency;
pub mod metrics;
pub mod numbering;
pub mod reducer;
pub mod totals;
pub mod words;

pub use currency::{format_currency, CurrencyFormat, NumberingSystem};
pub use metrics::{get_metrics, init_metrics};
pub use numbering::{format_document_number, next_counter, NumberingSettings};
pub use reducer::{reduce, reduce_all, DocumentAction, LineItemDraft};
pub use totals::compute_totals;
pub use words::{amount_in_words, number_in_words};

//! pricing-service: GST totals, document numbering and amount formatting for
//! invoices and quotations.

pub mod config;
pub mod dtos;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod services;
pub mod startup;

pub use startup::{AppState, Application};

//! Domain errors for pricing-service.

use service_core::error::AppError;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum PricingError {
    #[error("line item {index} does not exist (document has {len})")]
    LineIndexOutOfRange { index: usize, len: usize },

    #[error("invalid numbering settings: {0}")]
    InvalidNumbering(String),
}

impl From<PricingError> for AppError {
    fn from(err: PricingError) -> Self {
        AppError::BadRequest(anyhow::Error::new(err))
    }
}

use crate::models::RoundingPolicy;
use crate::services::{CurrencyFormat, NumberingSettings};
use serde::Deserialize;
use service_core::config::{self as core_config, ServerConfig};
use service_core::error::AppError;
use validator::Validate;

#[derive(Debug, Clone, Deserialize)]
pub struct PricingConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub pricing: PricingSettings,
    #[serde(default)]
    pub currency: CurrencyFormat,
    #[serde(default = "default_invoice_numbering")]
    pub invoice_numbering: NumberingSettings,
    #[serde(default = "default_quotation_numbering")]
    pub quotation_numbering: NumberingSettings,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct PricingSettings {
    /// Applied when a request does not choose a rounding policy.
    #[serde(default)]
    pub rounding: RoundingPolicy,
    /// The company's own state, used when a request omits `supplierState`.
    #[serde(default)]
    pub default_supplier_state: Option<String>,
}

fn default_invoice_numbering() -> NumberingSettings {
    NumberingSettings::new("INV-", "", 4)
}

fn default_quotation_numbering() -> NumberingSettings {
    NumberingSettings::new("QT-", "", 4)
}

impl Default for PricingConfig {
    fn default() -> Self {
        Self {
            server: ServerConfig::default(),
            pricing: PricingSettings::default(),
            currency: CurrencyFormat::default(),
            invoice_numbering: default_invoice_numbering(),
            quotation_numbering: default_quotation_numbering(),
        }
    }
}

impl PricingConfig {
    /// Load from `configuration.*` and `APP__` environment variables.
    pub fn load() -> Result<Self, AppError> {
        let config: PricingConfig = core_config::load()?;
        config.validate()?;
        Ok(config)
    }

    /// Reject numbering and currency settings that could never render.
    pub fn validate(&self) -> Result<(), AppError> {
        self.currency.validate()?;
        self.invoice_numbering.validate()?;
        self.quotation_numbering.validate()?;
        Ok(())
    }
}

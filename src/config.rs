//! Checkout configuration

use clap::Parser;
use rusty_money::iso::{self, Currency};
use thiserror::Error;

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Command line or environment could not be parsed.
    #[error(transparent)]
    Cli(#[from] clap::Error),

    /// Unknown currency code
    #[error("Unknown currency code: {0}")]
    UnknownCurrency(String),
}

/// Checkout calculator configuration
#[derive(Debug, Parser)]
#[command(name = "checkout", about = "Interactive checkout pricing calculator", long_about = None)]
pub struct CheckoutConfig {
    /// Currency used to display checkout totals (GBP, USD or EUR)
    #[arg(short, long, env = "CHECKOUT_CURRENCY", default_value = "GBP")]
    pub currency: String,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, env = "RUST_LOG", default_value = "warn")]
    pub log_level: String,
}

impl CheckoutConfig {
    /// Load configuration from `.env`, the environment and CLI arguments.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be parsed.
    pub fn load() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore if missing)
        _ = dotenvy::dotenv();

        Ok(Self::try_parse()?)
    }

    /// Resolve the configured currency code.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::UnknownCurrency`] for codes other than GBP, USD or EUR.
    pub fn currency(&self) -> Result<&'static Currency, ConfigError> {
        match self.currency.trim().to_ascii_uppercase().as_str() {
            "GBP" => Ok(iso::GBP),
            "USD" => Ok(iso::USD),
            "EUR" => Ok(iso::EUR),
            _ => Err(ConfigError::UnknownCurrency(self.currency.clone())),
        }
    }
}

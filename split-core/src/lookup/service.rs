use async_trait::async_trait;
use rust_decimal::Decimal;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum LookupError {
    #[error("network error: {0}")]
    Network(String),

    #[error("lookup service returned status {0}")]
    Status(u16),

    #[error("malformed lookup response: {0}")]
    Malformed(String),

    #[error("lookup configuration error: {0}")]
    Configuration(String),
}

impl LookupError {
    /// The one alert shown to the user, whatever went wrong.
    pub const USER_MESSAGE: &'static str = "Failed to retrieve sales tax.";

    pub fn user_message(&self) -> &'static str {
        Self::USER_MESSAGE
    }
}

/// Resolves a city name to its sales-tax percentage.
///
/// A single best-effort attempt: implementations do not retry.
#[async_trait]
pub trait TaxLookupService: Send + Sync {
    /// Returns the sales tax for `city` as a percentage (`8.5` means 8.5%).
    async fn sales_tax_rate(&self, city: &str) -> Result<Decimal, LookupError>;
}

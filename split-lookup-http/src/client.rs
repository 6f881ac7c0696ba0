use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, ClientBuilder};
use rust_decimal::Decimal;
use serde::Deserialize;
use tracing::debug;

use split_core::{LookupConfig, LookupError, TaxLookupService};

/// Wire shape of a lookup response. Extra fields are ignored.
#[derive(Debug, Deserialize)]
struct SalesTaxResponse {
    #[serde(rename = "salesTax")]
    sales_tax: Decimal,
}

/// Sales-tax lookup over HTTP.
#[derive(Debug, Clone)]
pub struct HttpTaxLookup {
    endpoint: String,
    client: Client,
}

impl HttpTaxLookup {
    /// Creates a lookup that uses `client` as-is.
    pub fn new(
        endpoint: impl Into<String>,
        client: Client,
    ) -> Self {
        Self {
            endpoint: endpoint.into(),
            client,
        }
    }

    /// Builds a client from `config`. No timeout is applied unless
    /// `timeout_secs` is set.
    ///
    /// # Errors
    /// * [`LookupError::Configuration`] if the endpoint is blank or the
    ///   HTTP client cannot be built.
    pub fn from_config(config: &LookupConfig) -> Result<Self, LookupError> {
        let endpoint = config.endpoint.trim();
        if endpoint.is_empty() {
            return Err(LookupError::Configuration(
                "lookup endpoint is empty".to_string(),
            ));
        }

        let mut builder = ClientBuilder::new();
        if let Some(secs) = config.timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        let client = builder
            .build()
            .map_err(|e| LookupError::Configuration(e.to_string()))?;

        Ok(Self::new(endpoint, client))
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl TaxLookupService for HttpTaxLookup {
    async fn sales_tax_rate(
        &self,
        city: &str,
    ) -> Result<Decimal, LookupError> {
        debug!(endpoint = %self.endpoint, city, "requesting sales tax");

        let resp = self
            .client
            .get(&self.endpoint)
            .query(&[("city", city)])
            .send()
            .await
            .map_err(|e| LookupError::Network(e.to_string()))?;

        let status = resp.status();
        if !status.is_success() {
            return Err(LookupError::Status(status.as_u16()));
        }

        let body = resp
            .json::<SalesTaxResponse>()
            .await
            .map_err(|e| LookupError::Malformed(e.to_string()))?;

        debug!(city, rate = %body.sales_tax, "sales tax received");
        Ok(body.sales_tax)
    }
}

use serde::{Deserialize, Serialize};

/// Where and how to reach the sales-tax lookup service.
///
/// | field          | default                            |
/// |----------------|------------------------------------|
/// | `endpoint`     | `http://localhost:3000/sales-tax`  |
/// | `timeout_secs` | none (wait as long as it takes)    |
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LookupConfig {
    /// Full URL of the lookup endpoint; the city goes in the `city` query
    /// parameter.
    pub endpoint: String,
    /// Optional request timeout in seconds.
    pub timeout_secs: Option<u64>,
}

impl LookupConfig {
    pub const DEFAULT_ENDPOINT: &'static str = "http://localhost:3000/sales-tax";
}

impl Default for LookupConfig {
    fn default() -> Self {
        Self {
            endpoint: Self::DEFAULT_ENDPOINT.to_string(),
            timeout_secs: None,
        }
    }
}

pub mod config;
pub mod service;

pub use config::LookupConfig;
pub use service::{LookupError, TaxLookupService};

//! HTTP implementation of [`split_core::TaxLookupService`].
//!
//! The service answers `GET <endpoint>?city=<name>` with a JSON body
//! containing a numeric `salesTax` percentage:
//!
//! ```json
//! { "salesTax": 9.5 }
//! ```

mod client;

pub use client::HttpTaxLookup;

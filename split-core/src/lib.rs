pub mod calculations;
pub mod calculator;
pub mod lookup;
pub mod models;
pub mod parse;

pub use calculator::SplitCalculator;
pub use lookup::{LookupConfig, LookupError, TaxLookupService};
pub use models::*;
pub use parse::ParseDecimalError;

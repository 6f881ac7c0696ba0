//! Bill arithmetic.
//!
//! Everything in here is a pure function over [`rust_decimal::Decimal`]
//! values; the aggregate in [`crate::models::BillState`] calls into it to
//! derive its totals.

pub mod bill;
pub mod common;

pub use bill::{split_amount, subtotal, tip_from_percentage, total_after_tax};
pub use common::{format_amount, round_half_up};

mod bill_state;
mod item;
mod split_result;

pub use bill_state::{BillState, SplitPhase};
pub use item::{Item, ItemId};
pub use split_result::SplitResult;

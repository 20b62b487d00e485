mod display;
mod ledger;
mod money;
mod transaction;

pub use display::*;
pub use ledger::*;
pub use money::*;
pub use transaction::*;

// Application layer - the ledger store and its error taxonomy.
// Any presentation layer (CLI, TUI, ...) drives the ledger through `LedgerStore`.

pub mod error;
pub mod store;

pub use error::*;
pub use store::*;

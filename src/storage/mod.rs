use anyhow::Result;

mod file;
mod memory;

pub use file::*;
pub use memory::*;

/// Name of the persistence slot holding the serialized ledger.
pub const SLOT_KEY: &str = "transactions";

/// A single key-value slot the ledger is mirrored into.
///
/// `read` returns `None` when nothing has been written yet. Each `write`
/// replaces the whole blob.
pub trait Storage {
    fn read(&self) -> Result<Option<String>>;
    fn write(&mut self, blob: &str) -> Result<()>;
}

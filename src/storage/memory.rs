use anyhow::{Result, bail};

use super::Storage;

/// In-process slot, useful for tests and for running without a disk.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    blob: Option<String>,
    writes: usize,
    read_only: bool,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Slot pre-filled with an existing blob.
    pub fn with_blob(blob: impl Into<String>) -> Self {
        Self {
            blob: Some(blob.into()),
            ..Self::default()
        }
    }

    /// Reject every write, as a full or locked store would.
    pub fn read_only(mut self) -> Self {
        self.read_only = true;
        self
    }

    pub fn blob(&self) -> Option<&str> {
        self.blob.as_deref()
    }

    /// Number of successful writes so far.
    pub fn writes(&self) -> usize {
        self.writes
    }
}

impl Storage for MemoryStorage {
    fn read(&self) -> Result<Option<String>> {
        Ok(self.blob.clone())
    }

    fn write(&mut self, blob: &str) -> Result<()> {
        if self.read_only {
            bail!("storage slot is read-only");
        }
        self.blob = Some(blob.to_string());
        self.writes += 1;
        Ok(())
    }
}

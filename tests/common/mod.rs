// Allow dead_code because these helpers are used across different test files
// which are compiled separately
#![allow(dead_code)]

use anyhow::Result;
use chrono::{DateTime, NaiveDate, Utc};
use tally::application::LedgerStore;
use tally::domain::{Category, Cents, TransactionDraft, TransactionType};
use tally::storage::FileStorage;
use tempfile::TempDir;

/// Helper to create a store backed by a file in a temporary directory
pub fn test_store() -> Result<(LedgerStore<FileStorage>, TempDir)> {
    let temp_dir = TempDir::new()?;
    let store = LedgerStore::load(FileStorage::in_dir(temp_dir.path()));
    Ok((store, temp_dir))
}

/// Reopen the ledger file in the given directory, as a fresh process would
pub fn reopen(temp_dir: &TempDir) -> LedgerStore<FileStorage> {
    LedgerStore::load(FileStorage::in_dir(temp_dir.path()))
}

/// Helper to parse a date string into DateTime<Utc>
pub fn parse_date(date_str: &str) -> DateTime<Utc> {
    NaiveDate::parse_from_str(date_str, "%Y-%m-%d")
        .unwrap()
        .and_hms_opt(0, 0, 0)
        .unwrap()
        .and_utc()
}

pub fn income(description: &str, amount: Cents, category: Category) -> TransactionDraft {
    TransactionDraft::new(description, amount, category, TransactionType::Income)
}

pub fn expense(description: &str, amount: Cents, category: Category) -> TransactionDraft {
    TransactionDraft::new(description, amount, category, TransactionType::Expense)
}

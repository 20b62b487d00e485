mod common;

use std::fs;

use anyhow::Result;
use common::{expense, income, parse_date, reopen, test_store};
use tally::application::{AppError, LedgerStore};
use tally::domain::{
    Category, MAX_AMOUNT_CENTS, TransactionDraft, TransactionType, ValidationError,
};
use tally::storage::{FileStorage, MemoryStorage, Storage};
use tempfile::TempDir;

#[test]
fn test_roundtrip_preserves_ids_fields_and_order() -> Result<()> {
    let (mut store, temp) = test_store()?;
    store.add_at(income("Salary", 100000, Category::Salary), parse_date("2024-01-01"))?;
    store.add_at(expense("Lunch", 1299, Category::Food), parse_date("2024-01-02"))?;
    store.add_at(expense("Train", 4510, Category::Transport), parse_date("2024-01-03"))?;

    let reopened = reopen(&temp);
    assert_eq!(reopened.list(), store.list());
    assert_eq!(reopened.list()[0].description, "Train");
    assert_eq!(reopened.list()[2].kind, TransactionType::Income);
    assert!(reopened.persistence_error().is_none());

    Ok(())
}

#[test]
fn test_missing_slot_starts_empty() -> Result<()> {
    let (store, temp) = test_store()?;
    assert!(store.is_empty());
    assert!(store.persistence_error().is_none());
    // Nothing is written until the first mutation
    assert!(!FileStorage::in_dir(temp.path()).path().exists());
    Ok(())
}

#[test]
fn test_reads_ledger_written_by_browser_app() -> Result<()> {
    let temp = TempDir::new()?;
    let storage = FileStorage::in_dir(temp.path());
    fs::write(
        storage.path(),
        r#"[{"id":1718000000000,"description":"Groceries","amount":250,"category":"food","type":"expense","date":"2024-06-10T06:13:20.000Z"},
            {"id":1717000000000,"description":"Salary","amount":1000.5,"category":"salary","type":"income","date":"2024-05-29T16:26:40.000Z"}]"#,
    )?;

    let store = LedgerStore::load(storage);
    assert_eq!(store.len(), 2);
    assert_eq!(store.list()[0].id, 1718000000000);
    assert_eq!(store.list()[0].amount_cents, 25000);
    assert_eq!(store.list()[1].amount_cents, 100050);

    let summary = store.summary();
    assert_eq!(summary.balance, 75050);

    Ok(())
}

#[test]
fn test_malformed_slot_is_discarded_and_reported() -> Result<()> {
    let temp = TempDir::new()?;
    let storage = FileStorage::in_dir(temp.path());
    fs::write(storage.path(), "{not json")?;

    let mut store = LedgerStore::load(storage);
    assert!(store.is_empty());
    let error = store.persistence_error().expect("malformed data is reported");
    assert!(error.contains("Malformed ledger data"));

    // The next successful write replaces the bad blob and clears the report
    store.add(expense("Snack", 300, Category::Food))?;
    assert!(store.persistence_error().is_none());
    assert_eq!(reopen(&temp).len(), 1);

    Ok(())
}

#[test]
fn test_unknown_category_in_slot_is_malformed() {
    let blob = r#"[{"id":1,"description":"x","amount":1,"category":"travel","type":"expense","date":"2024-01-01T00:00:00Z"}]"#;
    let store = LedgerStore::load(MemoryStorage::with_blob(blob));
    assert!(store.is_empty());
    assert!(store.persistence_error().is_some());
}

#[test]
fn test_unreadable_slot_is_reported() -> Result<()> {
    let temp = TempDir::new()?;
    // A directory where the ledger file should be cannot be read as a file
    let store = LedgerStore::load(FileStorage::new(temp.path()));
    assert!(store.is_empty());
    assert!(store.persistence_error().is_some());
    Ok(())
}

#[test]
fn test_write_failure_keeps_memory_authoritative() -> Result<()> {
    let mut store = LedgerStore::load(MemoryStorage::new().read_only());

    let id = store.add(income("Pay", 100000, Category::Salary))?.id;
    assert_eq!(store.len(), 1);
    assert!(store.get(id).is_some());
    let error = store.persistence_error().expect("write failure is reported");
    assert!(error.contains("read-only"));

    store.add(expense("Rent", 40000, Category::Bills))?;
    assert_eq!(store.summary().balance, 60000);

    assert!(matches!(store.persist(), Err(AppError::Persistence(_))));
    assert_eq!(store.storage().blob(), None);

    Ok(())
}

#[test]
fn test_every_mutation_writes_the_slot() -> Result<()> {
    let mut store = LedgerStore::load(MemoryStorage::new());

    let id = store.add(expense("Coffee", 350, Category::Food))?.id;
    assert_eq!(store.storage().writes(), 1);

    store.remove(id);
    assert_eq!(store.storage().writes(), 2);
    assert_eq!(store.storage().blob(), Some("[]"));

    store.add(expense("Tea", 200, Category::Food))?;
    store.clear();
    assert_eq!(store.storage().writes(), 4);
    assert_eq!(store.into_storage().read()?.as_deref(), Some("[]"));

    Ok(())
}

#[test]
fn test_largest_amount_survives_reload() -> Result<()> {
    let (mut store, temp) = test_store()?;
    store.add(income("Jackpot", MAX_AMOUNT_CENTS, Category::Other))?;
    store.add(income("Jackpot again", MAX_AMOUNT_CENTS - 1, Category::Other))?;
    store.add(expense("Odd cents", 999_999_999_999_993, Category::Bills))?;

    let reopened = reopen(&temp);
    assert!(reopened.persistence_error().is_none());
    assert_eq!(reopened.list(), store.list());
    assert_eq!(reopened.list()[1].amount_cents, MAX_AMOUNT_CENTS - 1);
    assert_eq!(reopened.list()[2].amount_cents, MAX_AMOUNT_CENTS);
    assert_eq!(reopened.summary().income, 2 * MAX_AMOUNT_CENTS - 1);

    let over = TransactionDraft::parse("Too much", "10000000000000.01", "other", "income");
    assert_eq!(over, Err(ValidationError::AmountTooLarge(MAX_AMOUNT_CENTS + 1)));

    let result = store.add(income("Too much", MAX_AMOUNT_CENTS + 1, Category::Other));
    assert!(matches!(
        result,
        Err(AppError::Validation(ValidationError::AmountTooLarge(_)))
    ));
    assert_eq!(reopen(&temp).len(), 3);

    Ok(())
}

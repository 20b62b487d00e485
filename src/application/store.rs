use anyhow::Context;
use chrono::{DateTime, Utc};
use log::{debug, warn};

use crate::domain::{
    Category, Summary, Transaction, TransactionDraft, TransactionId, TransactionType, summarize,
};
use crate::storage::Storage;

use super::AppError;

/// Filter for querying the ledger
#[derive(Debug, Clone, Default)]
pub struct TransactionFilter {
    pub kind: Option<TransactionType>,
    pub category: Option<Category>,
    pub limit: Option<usize>,
}

/// Authoritative in-memory ledger, mirrored into a [`Storage`] slot after
/// every mutation.
///
/// Transactions are kept newest first. Storage failures never abort an
/// operation: they are logged, remembered in [`persistence_error`], and the
/// in-memory ledger stays the source of truth.
///
/// [`persistence_error`]: LedgerStore::persistence_error
pub struct LedgerStore<S: Storage> {
    storage: S,
    transactions: Vec<Transaction>,
    last_id: TransactionId,
    persistence_error: Option<String>,
}

impl<S: Storage> LedgerStore<S> {
    /// Load the ledger from the slot. A missing slot gives an empty ledger;
    /// an unreadable or malformed one is reported and also gives an empty ledger.
    pub fn load(storage: S) -> Self {
        let mut store = Self {
            storage,
            transactions: Vec::new(),
            last_id: 0,
            persistence_error: None,
        };

        match store.read_slot() {
            Ok(transactions) => {
                debug!("Loaded {} transaction(s)", transactions.len());
                store.transactions = transactions;
            }
            Err(e) => {
                warn!("Discarding persisted ledger: {e:#}");
                store.persistence_error = Some(format!("{e:#}"));
            }
        }

        store.last_id = store.transactions.iter().map(|t| t.id).max().unwrap_or(0);
        store
    }

    fn read_slot(&self) -> anyhow::Result<Vec<Transaction>> {
        let Some(blob) = self.storage.read()? else {
            return Ok(Vec::new());
        };
        let transactions: Option<Vec<Transaction>> =
            serde_json::from_str(&blob).context("Malformed ledger data")?;
        Ok(transactions.unwrap_or_default())
    }

    // ========================
    // Commands
    // ========================

    /// Record a new transaction created now.
    pub fn add(&mut self, draft: TransactionDraft) -> Result<&Transaction, AppError> {
        self.add_at(draft, Utc::now())
    }

    /// Record a new transaction with an explicit creation time.
    /// Nothing is changed when the draft is invalid.
    pub fn add_at(
        &mut self,
        draft: TransactionDraft,
        at: DateTime<Utc>,
    ) -> Result<&Transaction, AppError> {
        draft.validate()?;

        let id = self.next_id(at);
        let transaction = draft.into_transaction(id, at);
        debug!(
            "Adding {} {} ({} cents, {})",
            transaction.kind, transaction.id, transaction.amount_cents, transaction.category
        );

        self.transactions.insert(0, transaction);
        self.save();
        Ok(&self.transactions[0])
    }

    /// Remove the transaction with the given id. Absent ids are a no-op.
    pub fn remove(&mut self, id: TransactionId) -> Option<Transaction> {
        let removed = self
            .transactions
            .iter()
            .position(|t| t.id == id)
            .map(|index| self.transactions.remove(index));

        match &removed {
            Some(_) => debug!("Removed transaction {id}"),
            None => debug!("Transaction {id} not found, nothing removed"),
        }

        self.save();
        removed
    }

    /// Remove every transaction, returning how many were dropped.
    /// Callers are expected to have confirmed this with the user.
    pub fn clear(&mut self) -> usize {
        let count = self.transactions.len();
        self.transactions.clear();
        debug!("Cleared {count} transaction(s)");
        self.save();
        count
    }

    /// Write the current ledger to the slot, surfacing any failure.
    pub fn persist(&mut self) -> Result<(), AppError> {
        let blob =
            serde_json::to_string(&self.transactions).context("Failed to serialize ledger")?;
        self.storage.write(&blob)?;
        self.persistence_error = None;
        Ok(())
    }

    fn save(&mut self) {
        if let Err(e) = self.persist() {
            warn!("Ledger changes kept in memory only: {e}");
            self.persistence_error = Some(e.to_string());
        }
    }

    fn next_id(&mut self, at: DateTime<Utc>) -> TransactionId {
        let id = at.timestamp_millis().max(self.last_id.saturating_add(1));
        self.last_id = id;
        id
    }

    // ========================
    // Queries
    // ========================

    /// All transactions, newest first.
    pub fn list(&self) -> &[Transaction] {
        &self.transactions
    }

    pub fn get(&self, id: TransactionId) -> Option<&Transaction> {
        self.transactions.iter().find(|t| t.id == id)
    }

    pub fn len(&self) -> usize {
        self.transactions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transactions.is_empty()
    }

    pub fn filter(&self, filter: &TransactionFilter) -> Vec<&Transaction> {
        self.transactions
            .iter()
            .filter(|t| filter.kind.is_none_or(|kind| t.kind == kind))
            .filter(|t| filter.category.is_none_or(|category| t.category == category))
            .take(filter.limit.unwrap_or(usize::MAX))
            .collect()
    }

    pub fn summary(&self) -> Summary {
        summarize(&self.transactions)
    }

    /// Message of the most recent storage failure, cleared by the next
    /// successful write.
    pub fn persistence_error(&self) -> Option<&str> {
        self.persistence_error.as_deref()
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    pub fn into_storage(self) -> S {
        self.storage
    }
}

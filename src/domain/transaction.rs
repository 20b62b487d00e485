use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::{Cents, major_units, parse_cents};

/// Milliseconds since the Unix epoch at creation time.
pub type TransactionId = i64;

/// Largest accepted amount (10 trillion units). Amounts are persisted as JSON
/// numbers in major units; below 2^50 cents that conversion reads back exactly.
pub const MAX_AMOUNT_CENTS: Cents = 1_000_000_000_000_000;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionType {
    Income,
    Expense,
}

impl TransactionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionType::Income => "income",
            TransactionType::Expense => "expense",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "income" => Some(TransactionType::Income),
            "expense" => Some(TransactionType::Expense),
            _ => None,
        }
    }
}

impl std::fmt::Display for TransactionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Food,
    Transport,
    Entertainment,
    Shopping,
    Bills,
    Health,
    Salary,
    Other,
}

impl Category {
    pub const ALL: [Category; 8] = [
        Category::Food,
        Category::Transport,
        Category::Entertainment,
        Category::Shopping,
        Category::Bills,
        Category::Health,
        Category::Salary,
        Category::Other,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Food => "food",
            Category::Transport => "transport",
            Category::Entertainment => "entertainment",
            Category::Shopping => "shopping",
            Category::Bills => "bills",
            Category::Health => "health",
            Category::Salary => "salary",
            Category::Other => "other",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        let wanted = s.trim().to_lowercase();
        Self::ALL.into_iter().find(|c| c.as_str() == wanted)
    }

    /// Capitalised name for display, e.g. "Food".
    pub fn label(&self) -> String {
        let name = self.as_str();
        let mut chars = name.chars();
        match chars.next() {
            Some(first) => first.to_uppercase().chain(chars).collect(),
            None => String::new(),
        }
    }

    /// Glyph shown in front of list rows.
    pub fn emoji(&self) -> &'static str {
        match self {
            Category::Food => "🍔",
            Category::Transport => "🚗",
            Category::Entertainment => "🎮",
            Category::Shopping => "🛍️",
            Category::Bills => "💳",
            Category::Health => "⚕️",
            Category::Salary => "💼",
            Category::Other => "📦",
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A single recorded income or expense event. Immutable once stored.
///
/// Serialized as `{id, description, amount, category, type, date}` with
/// `amount` in major units.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    pub id: TransactionId,
    pub description: String,
    /// Always positive; the sign is carried by `kind`
    #[serde(rename = "amount", with = "major_units")]
    pub amount_cents: Cents,
    pub category: Category,
    #[serde(rename = "type")]
    pub kind: TransactionType,
    pub date: DateTime<Utc>,
}

impl Transaction {
    pub fn is_income(&self) -> bool {
        self.kind == TransactionType::Income
    }

    pub fn is_expense(&self) -> bool {
        self.kind == TransactionType::Expense
    }

    /// Amount with the sign implied by the transaction type.
    pub fn signed_amount(&self) -> Cents {
        match self.kind {
            TransactionType::Income => self.amount_cents,
            TransactionType::Expense => self.amount_cents.saturating_neg(),
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Description must not be empty")]
    EmptyDescription,

    #[error("Amount must be positive, got {0} cents")]
    NonPositiveAmount(Cents),

    #[error("Amount too large: {0} cents exceeds {max}", max = MAX_AMOUNT_CENTS)]
    AmountTooLarge(Cents),

    #[error("Invalid amount: {0}")]
    InvalidAmount(String),

    #[error("Unknown category: {0}")]
    UnknownCategory(String),

    #[error("Unknown transaction type: {0}")]
    UnknownType(String),
}

/// User input for a new transaction, before an id and date are assigned.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransactionDraft {
    pub description: String,
    pub amount_cents: Cents,
    pub category: Category,
    pub kind: TransactionType,
}

impl TransactionDraft {
    pub fn new(
        description: impl Into<String>,
        amount_cents: Cents,
        category: Category,
        kind: TransactionType,
    ) -> Self {
        Self {
            description: description.into(),
            amount_cents,
            category,
            kind,
        }
    }

    /// Build a draft from raw form fields, reporting the first invalid one.
    pub fn parse(
        description: &str,
        amount: &str,
        category: &str,
        kind: &str,
    ) -> Result<Self, ValidationError> {
        let amount_cents =
            parse_cents(amount).map_err(|e| ValidationError::InvalidAmount(e.to_string()))?;
        let category = Category::from_str(category)
            .ok_or_else(|| ValidationError::UnknownCategory(category.to_string()))?;
        let kind = TransactionType::from_str(kind)
            .ok_or_else(|| ValidationError::UnknownType(kind.to_string()))?;

        let draft = Self::new(description.trim(), amount_cents, category, kind);
        draft.validate()?;
        Ok(draft)
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.description.trim().is_empty() {
            return Err(ValidationError::EmptyDescription);
        }
        if self.amount_cents <= 0 {
            return Err(ValidationError::NonPositiveAmount(self.amount_cents));
        }
        if self.amount_cents > MAX_AMOUNT_CENTS {
            return Err(ValidationError::AmountTooLarge(self.amount_cents));
        }
        Ok(())
    }

    pub fn into_transaction(self, id: TransactionId, date: DateTime<Utc>) -> Transaction {
        Transaction {
            id,
            description: self.description.trim().to_string(),
            amount_cents: self.amount_cents,
            category: self.category,
            kind: self.kind,
            date,
        }
    }
}

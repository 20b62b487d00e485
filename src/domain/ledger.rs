use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use super::{Category, Cents, Transaction, TransactionType};

/// Totals derived from a set of transactions.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Summary {
    pub income: Cents,
    pub expense: Cents,
    /// income - expense
    pub balance: Cents,
}

impl Summary {
    pub fn is_negative(&self) -> bool {
        self.balance < 0
    }
}

/// Compute income, expense and balance for a list of transactions.
/// Order-independent; an empty list yields all zeros. Totals saturate at the
/// bounds of `Cents` instead of overflowing.
pub fn summarize(transactions: &[Transaction]) -> Summary {
    let (income, expense) =
        transactions
            .iter()
            .fold((0 as Cents, 0 as Cents), |(income, expense), tx| match tx.kind {
                TransactionType::Income => (income.saturating_add(tx.amount_cents), expense),
                TransactionType::Expense => (income, expense.saturating_add(tx.amount_cents)),
            });

    Summary {
        income,
        expense,
        balance: income.saturating_sub(expense),
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryTotal {
    pub category: Category,
    pub total: Cents,
    pub count: usize,
    /// Share of the total for this transaction type, 0-100
    pub percentage: f64,
}

/// Break down the transactions of one type by category, largest total first.
pub fn summarize_by_category(
    transactions: &[Transaction],
    kind: TransactionType,
) -> Vec<CategoryTotal> {
    let mut totals: HashMap<Category, (Cents, usize)> = HashMap::new();

    for tx in transactions.iter().filter(|t| t.kind == kind) {
        let entry = totals.entry(tx.category).or_insert((0, 0));
        entry.0 = entry.0.saturating_add(tx.amount_cents);
        entry.1 += 1;
    }

    let grand_total = totals
        .values()
        .fold(0 as Cents, |sum, (total, _)| sum.saturating_add(*total));

    let mut breakdown: Vec<CategoryTotal> = totals
        .into_iter()
        .map(|(category, (total, count))| CategoryTotal {
            category,
            total,
            count,
            percentage: if grand_total > 0 {
                total as f64 / grand_total as f64 * 100.0
            } else {
                0.0
            },
        })
        .collect();

    breakdown.sort_by(|a, b| b.total.cmp(&a.total).then(a.category.cmp(&b.category)));
    breakdown
}

//! Totals and per-category sums over a set of transactions.
//!
//! Amounts are summed at full precision. Rounding is left to the views.

use std::collections::HashMap;

use crate::transaction::core::{Transaction, TransactionType};

/// Income, expense and their difference.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Totals {
    pub income: f64,
    pub expense: f64,
    /// `income - expense`.
    pub balance: f64,
}

/// Sums the income and expense amounts in `transactions`.
///
/// # Returns
/// All zeros for an empty slice.
pub fn compute_totals(transactions: &[Transaction]) -> Totals {
    let (income, expense) =
        transactions
            .iter()
            .fold((0.0, 0.0), |(income, expense), transaction| {
                match transaction.type_ {
                    TransactionType::Income => (income + transaction.amount, expense),
                    TransactionType::Expense => (income, expense + transaction.amount),
                }
            });

    Totals {
        income,
        expense,
        balance: income - expense,
    }
}

/// Summed expense amounts keyed by category name.
///
/// Entries are kept in the order each category first appeared.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CategoryBreakdown {
    entries: Vec<(String, f64)>,
}

impl CategoryBreakdown {
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// The summed expense for `category`, if it has any.
    pub fn get(&self, category: &str) -> Option<f64> {
        self.entries
            .iter()
            .find(|(name, _)| name == category)
            .map(|(_, amount)| *amount)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.entries
            .iter()
            .map(|(name, amount)| (name.as_str(), *amount))
    }

    /// The sum of every entry.
    pub fn total(&self) -> f64 {
        self.entries.iter().map(|(_, amount)| amount).sum()
    }
}

/// Groups the expenses in `transactions` by category and sums each group.
///
/// Income transactions are ignored and categories whose expenses sum to zero
/// are left out.
///
/// # Returns
/// An empty breakdown for an empty slice.
pub fn compute_category_breakdown(transactions: &[Transaction]) -> CategoryBreakdown {
    let mut positions: HashMap<&str, usize> = HashMap::new();
    let mut entries: Vec<(String, f64)> = Vec::new();

    for transaction in transactions
        .iter()
        .filter(|transaction| transaction.type_ == TransactionType::Expense)
    {
        match positions.get(transaction.category.as_str()) {
            Some(&position) => entries[position].1 += transaction.amount,
            None => {
                positions.insert(&transaction.category, entries.len());
                entries.push((transaction.category.clone(), transaction.amount));
            }
        }
    }

    entries.retain(|(_, amount)| *amount != 0.0);

    CategoryBreakdown { entries }
}

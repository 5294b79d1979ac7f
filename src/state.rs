//! The state behind a rendered ledger view and the events that change it.
//!
//! A [ViewState] is a plain value. Each event produces a new state from the
//! old one, which keeps request handlers free of shared mutable state.

use time::Date;

use crate::{
    category::CategorySet,
    transaction::{
        CategoryBreakdown, FilterSpec, Totals, Transaction, WeekStart, compute_category_breakdown,
        compute_totals, filter_transactions, sort_for_display,
    },
};

/// Everything needed to render the transactions a user is looking at.
#[derive(Debug, Clone, PartialEq)]
pub struct ViewState {
    pub transactions: Vec<Transaction>,
    pub categories: CategorySet,
    pub filter: FilterSpec,
    pub today: Date,
    pub week_start: WeekStart,
}

/// Something that happened which changes what the user sees.
#[derive(Debug, Clone, PartialEq)]
pub enum ViewEvent {
    /// A fresh copy of the user's data arrived from the finance API.
    DataLoaded {
        transactions: Vec<Transaction>,
        categories: CategorySet,
    },
    /// The user changed a filter control.
    FilterChanged(FilterSpec),
}

/// What a [ViewState] shows: the visible transactions and their aggregates.
#[derive(Debug, Clone, PartialEq)]
pub struct ViewSummary {
    pub transactions: Vec<Transaction>,
    pub totals: Totals,
    pub breakdown: CategoryBreakdown,
}

impl ViewState {
    /// An empty view with the default filter.
    pub fn new(today: Date, week_start: WeekStart) -> Self {
        Self {
            transactions: Vec::new(),
            categories: CategorySet::default(),
            filter: FilterSpec::default(),
            today,
            week_start,
        }
    }

    /// Produce the state that follows `event`.
    pub fn apply(self, event: ViewEvent) -> Self {
        match event {
            ViewEvent::DataLoaded {
                transactions,
                categories,
            } => Self {
                transactions,
                categories,
                ..self
            },
            ViewEvent::FilterChanged(filter) => Self { filter, ..self },
        }
    }

    /// The transactions that pass the current filter, newest first.
    pub fn visible_transactions(&self) -> Vec<Transaction> {
        sort_for_display(filter_transactions(
            &self.transactions,
            &self.filter,
            self.today,
            self.week_start,
        ))
    }

    /// Totals over the visible transactions.
    pub fn totals(&self) -> Totals {
        compute_totals(&self.visible_transactions())
    }

    /// Expense breakdown over the visible transactions.
    pub fn breakdown(&self) -> CategoryBreakdown {
        compute_category_breakdown(&self.visible_transactions())
    }

    /// The visible transactions together with their totals and breakdown,
    /// filtering the transactions once.
    pub fn summary(&self) -> ViewSummary {
        let transactions = self.visible_transactions();

        ViewSummary {
            totals: compute_totals(&transactions),
            breakdown: compute_category_breakdown(&transactions),
            transactions,
        }
    }

    pub fn has_data(&self) -> bool {
        !self.transactions.is_empty()
    }
}

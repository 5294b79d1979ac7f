//! Transactions: the record type, the filter and aggregation over a list of
//! them, and the pages and endpoints for managing them through the finance API.

mod aggregation;
mod core;
mod create_endpoint;
mod delete_endpoint;
mod edit_endpoint;
mod export;
mod filter;
mod form;
mod pages;
mod period;

pub use aggregation::{CategoryBreakdown, Totals, compute_category_breakdown, compute_totals};
pub use core::{NewTransaction, Transaction, TransactionId, TransactionType, decode_transactions};
pub use create_endpoint::create_transaction_endpoint;
pub use delete_endpoint::{TRANSACTIONS_CHANGED_EVENT, delete_transaction_endpoint};
pub use edit_endpoint::edit_transaction_endpoint;
pub use export::export_transactions_endpoint;
pub use filter::{
    ALL_CATEGORIES, CategoryFilter, FilterQuery, FilterSpec, filter_transactions,
    sort_for_display,
};
pub use form::type_radio;
pub use pages::{get_copy_transaction_page, get_edit_transaction_page, get_new_transaction_page};
pub use period::{Period, WeekStart};

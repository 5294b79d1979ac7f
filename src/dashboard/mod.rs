//! The dashboard: totals, an expense chart and the transaction list for the current filter.

mod cards;
mod charts;
mod filter_form;
mod handlers;
mod tables;

pub use handlers::get_dashboard_page;

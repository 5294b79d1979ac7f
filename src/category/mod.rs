//! Categories group transactions by what they were for, separately for expenses and income.

mod create;
mod delete;
mod domain;
mod list;

pub use create::create_category_endpoint;
pub use delete::delete_category_endpoint;
pub use domain::{CategoryName, CategorySet, FALLBACK_CATEGORY};
pub use list::get_categories_page;

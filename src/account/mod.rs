//! The user's account: backups and deletion.

mod backup;
mod delete;
mod page;

pub use backup::{export_account_data, import_account_data};
pub use delete::delete_account_endpoint;
pub use page::get_account_page;

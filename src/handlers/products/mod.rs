pub mod delete;
pub mod manage;
pub mod query;

pub use delete::{delete_product, hard_delete_product};
pub use manage::{create_product, update_product};
pub use query::{get_product, get_products_by_category, list_products};

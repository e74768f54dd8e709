//! Category commands

mod add;
mod delete;
mod get;
mod list;
mod reorder;
mod set_default;
mod update;

pub use add::AddCategory;
pub use delete::DeleteCategory;
pub use get::{default_category, GetCategory};
pub use list::ListCategories;
pub use reorder::ReorderCategories;
pub use set_default::SetDefaultCategory;
pub use update::UpdateCategory;

/// Gap between consecutive category `sort_order` values on creation
pub const SORT_ORDER_STEP: i64 = 10;

//! Custom field commands

mod add;
mod delete;
mod list;
mod reorder;
mod toggle;
mod update;

pub use add::AddField;
pub use delete::DeleteField;
pub use list::{notification_fields, ListFields};
pub use reorder::ReorderFields;
pub use toggle::ToggleFieldVisibility;
pub use update::{ConsistencyWarning, FieldUpdate, UpdateField};

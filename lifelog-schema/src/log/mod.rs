//! Log entry commands

mod add;
mod capture;
mod delete;
mod list;
mod update;

pub use add::AddLog;
pub use capture::capture_custom_data;
pub use delete::{DeleteLog, DeleteLogs, DeleteOutcome};
pub use list::ListLogs;
pub use update::UpdateLog;

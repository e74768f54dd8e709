//! Core types for the schema engine

mod category;
mod field;
mod ids;
mod log;
mod order;
mod standard;

pub use category::{ensure_date, Category, CategorySettings, TransactionType};
pub use field::{FieldDefinition, FieldRecord, FieldType};
pub use ids::{CategoryId, FieldId, LogId};
pub use log::{Log, LogStatus};
pub use order::{ReorderOutcome, SortItem};
pub use standard::{Locale, StandardField};

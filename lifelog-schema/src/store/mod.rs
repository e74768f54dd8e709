//! Tenant-scoped storage for categories, custom fields and logs.
//!
//! A [`SchemaStore`] is already bound to one tenant when it reaches the
//! schema engine; tenant isolation is the caller's concern. Every method is a
//! single atomic write or read. Multi-step operations (such as setting the
//! default category) are composed from these primitives by the operations.

mod memory;
mod yaml;

pub use memory::MemoryStore;
pub use yaml::YamlStore;

use crate::error::StoreResult;
use crate::types::{Category, CategoryId, FieldId, FieldRecord, Log, LogId};
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Serialize;

/// A record kind the generic table backends know how to key.
pub trait Record: Clone + Serialize + DeserializeOwned + Send + Sync + 'static {
    /// Kind name used in errors, logs and directory names
    const KIND: &'static str;

    fn key(&self) -> &str;
}

impl Record for Category {
    const KIND: &'static str = "category";

    fn key(&self) -> &str {
        self.id.as_str()
    }
}

impl Record for FieldRecord {
    const KIND: &'static str = "field";

    fn key(&self) -> &str {
        self.id.as_str()
    }
}

impl Record for Log {
    const KIND: &'static str = "log";

    fn key(&self) -> &str {
        self.id.as_str()
    }
}

/// Storage collaborator consumed by every schema operation.
#[async_trait]
pub trait SchemaStore: Send + Sync {
    // --- Categories ---

    /// All categories ordered by `sort_order`
    async fn list_categories(&self) -> StoreResult<Vec<Category>>;
    async fn get_category(&self, id: &CategoryId) -> StoreResult<Option<Category>>;
    async fn insert_category(&self, category: &Category) -> StoreResult<()>;
    /// Replace a stored category; `NotFound` if it does not exist
    async fn update_category(&self, category: &Category) -> StoreResult<()>;
    /// Returns whether a record was removed
    async fn delete_category(&self, id: &CategoryId) -> StoreResult<bool>;

    // --- Custom fields ---

    /// All field records ordered by `sort_order`
    async fn list_fields(&self) -> StoreResult<Vec<FieldRecord>>;
    async fn get_field(&self, id: &FieldId) -> StoreResult<Option<FieldRecord>>;
    async fn insert_field(&self, field: &FieldRecord) -> StoreResult<()>;
    async fn update_field(&self, field: &FieldRecord) -> StoreResult<()>;
    async fn delete_field(&self, id: &FieldId) -> StoreResult<bool>;

    // --- Logs ---

    /// All logs, newest `date` first, then newest `created_at` first
    async fn list_logs(&self) -> StoreResult<Vec<Log>>;
    async fn get_log(&self, id: &LogId) -> StoreResult<Option<Log>>;
    async fn insert_log(&self, log: &Log) -> StoreResult<()>;
    async fn update_log(&self, log: &Log) -> StoreResult<()>;
    async fn delete_log(&self, id: &LogId) -> StoreResult<bool>;
}

/// Stable sort by `sort_order`; ties keep key order.
pub(crate) fn order_categories(categories: &mut [Category]) {
    categories.sort_by_key(|c| c.sort_order);
}

pub(crate) fn order_fields(fields: &mut [FieldRecord]) {
    fields.sort_by_key(|f| f.sort_order);
}

pub(crate) fn order_logs(logs: &mut [Log]) {
    logs.sort_by(|a, b| {
        b.date
            .cmp(&a.date)
            .then_with(|| b.created_at.cmp(&a.created_at))
    });
}

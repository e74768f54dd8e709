//! In-memory store, one instance per tenant.

use super::{order_categories, order_fields, order_logs, Record, SchemaStore};
use crate::error::{StoreError, StoreResult};
use crate::types::{Category, CategoryId, FieldId, FieldRecord, Log, LogId};
use async_trait::async_trait;
use std::collections::BTreeMap;
use tokio::sync::RwLock;

/// A keyed table of one record kind.
struct MemoryTable<T> {
    rows: RwLock<BTreeMap<String, T>>,
}

impl<T: Record> MemoryTable<T> {
    fn new() -> Self {
        Self {
            rows: RwLock::new(BTreeMap::new()),
        }
    }

    async fn list(&self) -> Vec<T> {
        self.rows.read().await.values().cloned().collect()
    }

    async fn get(&self, key: &str) -> Option<T> {
        self.rows.read().await.get(key).cloned()
    }

    async fn insert(&self, record: &T) -> StoreResult<()> {
        let mut rows = self.rows.write().await;
        if rows.contains_key(record.key()) {
            return Err(StoreError::AlreadyExists {
                kind: T::KIND,
                id: record.key().to_string(),
            });
        }
        rows.insert(record.key().to_string(), record.clone());
        Ok(())
    }

    async fn update(&self, record: &T) -> StoreResult<()> {
        let mut rows = self.rows.write().await;
        match rows.get_mut(record.key()) {
            Some(slot) => {
                *slot = record.clone();
                Ok(())
            }
            None => Err(StoreError::NotFound {
                kind: T::KIND,
                id: record.key().to_string(),
            }),
        }
    }

    async fn delete(&self, key: &str) -> bool {
        self.rows.write().await.remove(key).is_some()
    }
}

/// Store that keeps every record in process memory.
///
/// Useful for tests and for embedding the engine in front of a remote
/// backend that is synchronized elsewhere.
pub struct MemoryStore {
    categories: MemoryTable<Category>,
    fields: MemoryTable<FieldRecord>,
    logs: MemoryTable<Log>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self {
            categories: MemoryTable::new(),
            fields: MemoryTable::new(),
            logs: MemoryTable::new(),
        }
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SchemaStore for MemoryStore {
    async fn list_categories(&self) -> StoreResult<Vec<Category>> {
        let mut categories = self.categories.list().await;
        order_categories(&mut categories);
        Ok(categories)
    }

    async fn get_category(&self, id: &CategoryId) -> StoreResult<Option<Category>> {
        Ok(self.categories.get(id.as_str()).await)
    }

    async fn insert_category(&self, category: &Category) -> StoreResult<()> {
        self.categories.insert(category).await
    }

    async fn update_category(&self, category: &Category) -> StoreResult<()> {
        self.categories.update(category).await
    }

    async fn delete_category(&self, id: &CategoryId) -> StoreResult<bool> {
        Ok(self.categories.delete(id.as_str()).await)
    }

    async fn list_fields(&self) -> StoreResult<Vec<FieldRecord>> {
        let mut fields = self.fields.list().await;
        order_fields(&mut fields);
        Ok(fields)
    }

    async fn get_field(&self, id: &FieldId) -> StoreResult<Option<FieldRecord>> {
        Ok(self.fields.get(id.as_str()).await)
    }

    async fn insert_field(&self, field: &FieldRecord) -> StoreResult<()> {
        self.fields.insert(field).await
    }

    async fn update_field(&self, field: &FieldRecord) -> StoreResult<()> {
        self.fields.update(field).await
    }

    async fn delete_field(&self, id: &FieldId) -> StoreResult<bool> {
        Ok(self.fields.delete(id.as_str()).await)
    }

    async fn list_logs(&self) -> StoreResult<Vec<Log>> {
        let mut logs = self.logs.list().await;
        order_logs(&mut logs);
        Ok(logs)
    }

    async fn get_log(&self, id: &LogId) -> StoreResult<Option<Log>> {
        Ok(self.logs.get(id.as_str()).await)
    }

    async fn insert_log(&self, log: &Log) -> StoreResult<()> {
        self.logs.insert(log).await
    }

    async fn update_log(&self, log: &Log) -> StoreResult<()> {
        self.logs.update(log).await
    }

    async fn delete_log(&self, id: &LogId) -> StoreResult<bool> {
        Ok(self.logs.delete(id.as_str()).await)
    }
}

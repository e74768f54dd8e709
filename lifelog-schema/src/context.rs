//! SchemaContext: the tenant-scoped handle every operation runs against.
//!
//! The context only carries the store and the display locale. Business logic
//! lives in the command implementations.

use crate::config::{SchemaConfig, StorageBackend};
use crate::error::{ConfigError, Result};
use crate::store::{MemoryStore, SchemaStore, YamlStore};
use crate::types::{Category, FieldDefinition, Locale};
use std::sync::Arc;
use tracing::debug;

/// Context for schema operations
#[derive(Clone)]
pub struct SchemaContext {
    store: Arc<dyn SchemaStore>,
    locale: Locale,
}

impl SchemaContext {
    /// Create a context over an already tenant-scoped store
    pub fn new(store: Arc<dyn SchemaStore>) -> Self {
        Self {
            store,
            locale: Locale::default(),
        }
    }

    /// A context backed by a fresh [`MemoryStore`]
    pub fn in_memory() -> Self {
        Self::new(Arc::new(MemoryStore::new()))
    }

    /// Open the store described by `config`
    pub async fn from_config(config: &SchemaConfig) -> Result<Self> {
        let store: Arc<dyn SchemaStore> = match config.storage.backend {
            StorageBackend::Memory => Arc::new(MemoryStore::new()),
            StorageBackend::Yaml => {
                let root = config.storage.root.as_ref().ok_or_else(|| {
                    ConfigError::MissingStorageRoot {
                        backend: config.storage.backend.as_str().to_string(),
                    }
                })?;
                Arc::new(YamlStore::open(root, &config.tenant).await?)
            }
        };

        debug!(
            tenant = %config.tenant,
            backend = config.storage.backend.as_str(),
            "schema context opened"
        );
        Ok(Self::new(store).with_locale(config.locale))
    }

    /// Set the locale used for standard field labels
    pub fn with_locale(mut self, locale: Locale) -> Self {
        self.locale = locale;
        self
    }

    pub fn store(&self) -> &dyn SchemaStore {
        self.store.as_ref()
    }

    pub fn locale(&self) -> Locale {
        self.locale
    }

    // =========================================================================
    // Shared reads
    // =========================================================================

    /// All field definitions, sentinel stripped, ordered by `sort_order`
    pub async fn field_definitions(&self) -> Result<Vec<FieldDefinition>> {
        let records = self.store.list_fields().await?;
        Ok(records.iter().map(FieldDefinition::from).collect())
    }

    /// All categories ordered by `sort_order`
    pub async fn categories(&self) -> Result<Vec<Category>> {
        Ok(self.store.list_categories().await?)
    }
}

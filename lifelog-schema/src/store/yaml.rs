//! YAML-on-disk store.
//!
//! Owns one directory per tenant with the structure:
//! ```text
//! <root>/<tenant>/
//!   categories/   ← one .yaml per category
//!   fields/       ← one .yaml per custom field record
//!   logs/         ← one .yaml per log entry
//! ```
//! Each record write goes through a temp file and a rename, so a single
//! write is atomic. Nothing is cached; every call reads the directory.

use super::{order_categories, order_fields, order_logs, Record, SchemaStore};
use crate::error::{StoreError, StoreResult};
use crate::types::{Category, CategoryId, FieldId, FieldRecord, Log, LogId};
use async_trait::async_trait;
use std::marker::PhantomData;
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::{debug, warn};
use ulid::Ulid;

/// A directory of YAML files holding one record kind.
struct YamlTable<T> {
    dir: PathBuf,
    _kind: PhantomData<fn() -> T>,
}

impl<T: Record> YamlTable<T> {
    fn new(dir: PathBuf) -> Self {
        Self {
            dir,
            _kind: PhantomData,
        }
    }

    /// File for `key`, or `None` when the key would leave the table directory
    fn path(&self, key: &str) -> Option<PathBuf> {
        is_path_segment(key).then(|| self.dir.join(format!("{key}.yaml")))
    }

    fn checked_path(&self, key: &str) -> StoreResult<PathBuf> {
        self.path(key)
            .ok_or_else(|| StoreError::backend(format!("invalid {} id: {key:?}", T::KIND)))
    }

    async fn list(&self) -> StoreResult<Vec<T>> {
        let mut records = Vec::new();
        let mut entries = fs::read_dir(&self.dir).await?;
        while let Some(entry) = entries.next_entry().await? {
            let path = entry.path();
            if path.extension().and_then(|e| e.to_str()) != Some("yaml") {
                continue;
            }
            let content = fs::read_to_string(&path).await?;
            match serde_yaml_ng::from_str::<T>(&content) {
                Ok(record) => records.push(record),
                Err(e) => {
                    warn!(?path, %e, kind = T::KIND, "skipping invalid record");
                }
            }
        }
        Ok(records)
    }

    async fn get(&self, key: &str) -> StoreResult<Option<T>> {
        let Some(path) = self.path(key) else {
            return Ok(None);
        };
        match fs::read_to_string(&path).await {
            Ok(content) => Ok(Some(serde_yaml_ng::from_str(&content)?)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    async fn insert(&self, record: &T) -> StoreResult<()> {
        let path = self.checked_path(record.key())?;
        if fs::try_exists(&path).await? {
            return Err(StoreError::AlreadyExists {
                kind: T::KIND,
                id: record.key().to_string(),
            });
        }
        self.write(&path, record).await
    }

    async fn update(&self, record: &T) -> StoreResult<()> {
        let path = self.checked_path(record.key())?;
        if !fs::try_exists(&path).await? {
            return Err(StoreError::NotFound {
                kind: T::KIND,
                id: record.key().to_string(),
            });
        }
        self.write(&path, record).await
    }

    async fn delete(&self, key: &str) -> StoreResult<bool> {
        let Some(path) = self.path(key) else {
            return Ok(false);
        };
        match fs::remove_file(path).await {
            Ok(()) => Ok(true),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(false),
            Err(e) => Err(e.into()),
        }
    }

    async fn write(&self, path: &Path, record: &T) -> StoreResult<()> {
        let yaml = serde_yaml_ng::to_string(record)?;
        atomic_write(path, yaml.as_bytes()).await
    }
}

/// True when `name` can be used as a single directory entry under a parent.
fn is_path_segment(name: &str) -> bool {
    !name.is_empty() && name != "." && name != ".." && !name.contains(['/', '\\', '\0'])
}

/// Store that persists each record as a YAML file under a tenant directory.
pub struct YamlStore {
    root: PathBuf,
    categories: YamlTable<Category>,
    fields: YamlTable<FieldRecord>,
    logs: YamlTable<Log>,
}

impl YamlStore {
    /// Open (or create) the tenant directory under `root`.
    pub async fn open(root: impl Into<PathBuf>, tenant: &str) -> StoreResult<Self> {
        if !is_path_segment(tenant) {
            return Err(StoreError::backend(format!("invalid tenant id: {tenant:?}")));
        }

        let root = root.into().join(tenant);
        let categories = root.join("categories");
        let fields = root.join("fields");
        let logs = root.join("logs");
        fs::create_dir_all(&categories).await?;
        fs::create_dir_all(&fields).await?;
        fs::create_dir_all(&logs).await?;

        debug!(root = %root.display(), "yaml store opened");

        Ok(Self {
            root,
            categories: YamlTable::new(categories),
            fields: YamlTable::new(fields),
            logs: YamlTable::new(logs),
        })
    }

    /// The tenant directory
    pub fn root(&self) -> &Path {
        &self.root
    }
}

#[async_trait]
impl SchemaStore for YamlStore {
    async fn list_categories(&self) -> StoreResult<Vec<Category>> {
        let mut categories = self.categories.list().await?;
        categories.sort_by(|a, b| a.id.cmp(&b.id));
        order_categories(&mut categories);
        Ok(categories)
    }

    async fn get_category(&self, id: &CategoryId) -> StoreResult<Option<Category>> {
        self.categories.get(id.as_str()).await
    }

    async fn insert_category(&self, category: &Category) -> StoreResult<()> {
        self.categories.insert(category).await
    }

    async fn update_category(&self, category: &Category) -> StoreResult<()> {
        self.categories.update(category).await
    }

    async fn delete_category(&self, id: &CategoryId) -> StoreResult<bool> {
        self.categories.delete(id.as_str()).await
    }

    async fn list_fields(&self) -> StoreResult<Vec<FieldRecord>> {
        let mut fields = self.fields.list().await?;
        fields.sort_by(|a, b| a.id.cmp(&b.id));
        order_fields(&mut fields);
        Ok(fields)
    }

    async fn get_field(&self, id: &FieldId) -> StoreResult<Option<FieldRecord>> {
        self.fields.get(id.as_str()).await
    }

    async fn insert_field(&self, field: &FieldRecord) -> StoreResult<()> {
        self.fields.insert(field).await
    }

    async fn update_field(&self, field: &FieldRecord) -> StoreResult<()> {
        self.fields.update(field).await
    }

    async fn delete_field(&self, id: &FieldId) -> StoreResult<bool> {
        self.fields.delete(id.as_str()).await
    }

    async fn list_logs(&self) -> StoreResult<Vec<Log>> {
        let mut logs = self.logs.list().await?;
        order_logs(&mut logs);
        Ok(logs)
    }

    async fn get_log(&self, id: &LogId) -> StoreResult<Option<Log>> {
        self.logs.get(id.as_str()).await
    }

    async fn insert_log(&self, log: &Log) -> StoreResult<()> {
        self.logs.insert(log).await
    }

    async fn update_log(&self, log: &Log) -> StoreResult<()> {
        self.logs.update(log).await
    }

    async fn delete_log(&self, id: &LogId) -> StoreResult<bool> {
        self.logs.delete(id.as_str()).await
    }
}

/// Write to a temp file then rename for atomic persistence.
async fn atomic_write(path: &Path, data: &[u8]) -> StoreResult<()> {
    let dir = path
        .parent()
        .ok_or_else(|| std::io::Error::new(std::io::ErrorKind::InvalidInput, "no parent dir"))?;
    let tmp = dir.join(format!(".tmp_{}", Ulid::new()));
    fs::write(&tmp, data).await?;
    fs::rename(&tmp, path).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::FieldType;
    use tempfile::TempDir;

    fn field(key_name: &str, sort_order: i64) -> FieldRecord {
        FieldRecord {
            id: FieldId::new(),
            label: key_name.to_string(),
            key_name: key_name.to_string(),
            field_type: FieldType::Text,
            options: Vec::new(),
            sort_order,
            is_active: true,
        }
    }

    #[tokio::test]
    async fn open_creates_tenant_directories() {
        let tmp = TempDir::new().unwrap();
        let store = YamlStore::open(tmp.path(), "alice").await.unwrap();
        assert!(store.root().join("categories").is_dir());
        assert!(store.root().join("fields").is_dir());
        assert!(store.root().join("logs").is_dir());
    }

    #[tokio::test]
    async fn open_rejects_path_like_tenant() {
        let tmp = TempDir::new().unwrap();
        assert!(YamlStore::open(tmp.path(), "../escape").await.is_err());
        assert!(YamlStore::open(tmp.path(), "").await.is_err());
    }

    #[tokio::test]
    async fn records_persist_across_reopen() {
        let tmp = TempDir::new().unwrap();
        {
            let store = YamlStore::open(tmp.path(), "alice").await.unwrap();
            store.insert_field(&field("mood", 2)).await.unwrap();
            store.insert_field(&field("distance", 1)).await.unwrap();
        }

        let store = YamlStore::open(tmp.path(), "alice").await.unwrap();
        let fields = store.list_fields().await.unwrap();
        let names: Vec<_> = fields.iter().map(|f| f.key_name.as_str()).collect();
        assert_eq!(names, vec!["distance", "mood"]);
    }

    #[tokio::test]
    async fn tenants_are_isolated() {
        let tmp = TempDir::new().unwrap();
        let alice = YamlStore::open(tmp.path(), "alice").await.unwrap();
        let bob = YamlStore::open(tmp.path(), "bob").await.unwrap();
        alice.insert_category(&Category::new("Food", 10)).await.unwrap();
        assert_eq!(alice.list_categories().await.unwrap().len(), 1);
        assert!(bob.list_categories().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn ids_cannot_reach_other_tenants() {
        let tmp = TempDir::new().unwrap();
        let alice = YamlStore::open(tmp.path(), "alice").await.unwrap();
        let bob = YamlStore::open(tmp.path(), "bob").await.unwrap();
        let food = Category::new("Food", 10);
        bob.insert_category(&food).await.unwrap();

        let escaped = CategoryId::from_string(format!("../../bob/categories/{}", food.id));
        assert!(alice.get_category(&escaped).await.unwrap().is_none());
        assert!(!alice.delete_category(&escaped).await.unwrap());

        let mut forged = food.clone();
        forged.id = escaped;
        forged.name = "Hijacked".into();
        assert!(matches!(
            alice.update_category(&forged).await,
            Err(StoreError::Backend(_))
        ));
        assert!(matches!(
            alice.insert_category(&forged).await,
            Err(StoreError::Backend(_))
        ));

        let dotdot = CategoryId::from_string("..");
        assert!(!alice.delete_category(&dotdot).await.unwrap());

        let remaining = bob.list_categories().await.unwrap();
        assert_eq!(remaining.len(), 1);
        assert_eq!(remaining[0].name, "Food");
    }

    #[tokio::test]
    async fn invalid_files_are_skipped() {
        let tmp = TempDir::new().unwrap();
        let store = YamlStore::open(tmp.path(), "alice").await.unwrap();
        store.insert_category(&Category::new("Food", 10)).await.unwrap();
        std::fs::write(store.root().join("categories/broken.yaml"), "name: [").unwrap();
        std::fs::write(store.root().join("categories/notes.txt"), "ignored").unwrap();
        assert_eq!(store.list_categories().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn field_with_null_options_is_listed() {
        let tmp = TempDir::new().unwrap();
        let store = YamlStore::open(tmp.path(), "alice").await.unwrap();
        std::fs::write(
            store.root().join("fields/f1.yaml"),
            "id: f1\nlabel: Mood\nkey_name: mood\ntype: rating\noptions: null\nsort_order: 1\n",
        )
        .unwrap();
        let fields = store.list_fields().await.unwrap();
        assert_eq!(fields.len(), 1);
        assert!(fields[0].options.is_empty());
    }

    #[tokio::test]
    async fn update_and_delete_missing_records() {
        let tmp = TempDir::new().unwrap();
        let store = YamlStore::open(tmp.path(), "alice").await.unwrap();
        let category = Category::new("Ghost", 10);
        assert!(matches!(
            store.update_category(&category).await,
            Err(StoreError::NotFound { .. })
        ));
        assert!(!store.delete_category(&category.id).await.unwrap());
        assert!(store.get_category(&category.id).await.unwrap().is_none());
    }
}

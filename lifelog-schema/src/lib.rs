//! Dynamic category and custom field schema engine for Lifelog
//!
//! Each tenant defines categories, and each category declares an ordered list
//! of visible fields that mixes built-in standard fields (`date`, `amount`,
//! `memo`, ...) with tenant-defined custom fields. This crate stores those
//! definitions and resolves a category's layout into concrete fields.
//!
//! ## Overview
//!
//! - **Commands** - Every mutation is a command struct run through [`Execute`]
//!   against a tenant-scoped [`SchemaContext`]
//! - **Pluggable storage** - [`store::SchemaStore`] with in-memory and
//!   YAML-file backends
//! - **Pure resolution** - [`resolver`] merges references and definitions with
//!   no I/O; dangling references are dropped silently
//! - **No migrations** - the per-field notification flag rides inside the
//!   `options` list as a sentinel token (see [`codec`])
//!
//! ## Basic Usage
//!
//! ```rust,no_run
//! use lifelog_schema::{
//!     category::AddCategory, field::AddField, resolve_visible_fields, Execute, FieldType,
//!     SchemaContext,
//! };
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let ctx = SchemaContext::in_memory();
//!
//! let mood = AddField::new("Mood", FieldType::Rating)
//!     .execute(&ctx)
//!     .await
//!     .into_result()?;
//!
//! let journal = AddCategory::new("Journal")
//!     .with_visible_fields(["memo", mood.id.as_str()])
//!     .execute(&ctx)
//!     .await
//!     .into_result()?;
//!
//! let fields = ctx.field_definitions().await?;
//! for field in resolve_visible_fields(&journal, &fields) {
//!     println!("{} ({})", field.label(), field.field_type());
//! }
//! # Ok(())
//! # }
//! ```
//!
//! ## Storage Structure (YAML backend)
//!
//! ```text
//! <root>/
//! └── <tenant>/
//!     ├── categories/{id}.yaml
//!     ├── fields/{id}.yaml     # options may carry ENABLE_NOTIFICATION
//!     └── logs/{id}.yaml
//! ```

pub mod codec;
pub mod config;
mod context;
mod error;
pub mod operation;
pub mod resolver;
pub mod slug;
pub mod store;
pub mod types;

pub mod category;
pub mod field;
pub mod log;

pub use config::{SchemaConfig, StorageBackend, StorageConfig};
pub use context::SchemaContext;
pub use error::{ConfigError, Result, SchemaError, StoreError, StoreResult};
pub use operation::{Execute, ExecutionResult, LogEntry, Operation};
pub use resolver::{
    effective_visible_fields, resolve_active_fields, resolve_visible_fields, FieldRef,
    FieldResolver, MatchedBy, ResolvedField,
};
pub use store::{MemoryStore, SchemaStore, YamlStore};
pub use types::{
    Category, CategoryId, CategorySettings, FieldDefinition, FieldId, FieldRecord, FieldType,
    Locale, Log, LogId, LogStatus, ReorderOutcome, SortItem, StandardField, TransactionType,
};

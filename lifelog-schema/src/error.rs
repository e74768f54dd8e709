//! Error types for the schema engine

use std::path::PathBuf;
use thiserror::Error;

/// Result type for schema operations
pub type Result<T> = std::result::Result<T, SchemaError>;

/// Result type for store primitives
pub type StoreResult<T> = std::result::Result<T, StoreError>;

/// Errors raised by a [`crate::store::SchemaStore`] implementation.
///
/// A single store call is atomic: when one of these is returned, the call
/// itself wrote nothing.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Record not found for an update
    #[error("{kind} not found in store: {id}")]
    NotFound { kind: &'static str, id: String },

    /// Record already exists for an insert
    #[error("{kind} already exists in store: {id}")]
    AlreadyExists { kind: &'static str, id: String },

    /// Backend-specific failure (connection loss, constraint violation, ...)
    #[error("storage backend error: {0}")]
    Backend(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// YAML serialization error
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml_ng::Error),
}

impl StoreError {
    /// Create a backend error
    pub fn backend(message: impl Into<String>) -> Self {
        Self::Backend(message.into())
    }
}

/// Configuration loading errors
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Configuration could not be extracted from its sources
    #[error("failed to load configuration: {source}")]
    Load {
        #[source]
        source: Box<figment::Error>,
    },

    /// Storage root is required for the chosen backend
    #[error("storage root is required for the {backend} backend")]
    MissingStorageRoot { backend: String },

    /// Configuration directory does not exist
    #[error("configuration directory not found: {path}")]
    DirectoryNotFound { path: PathBuf },
}

impl From<figment::Error> for ConfigError {
    fn from(error: figment::Error) -> Self {
        ConfigError::Load {
            source: Box::new(error),
        }
    }
}

/// Errors that can occur in schema operations
#[derive(Debug, Error)]
pub enum SchemaError {
    /// Required attribute missing or blank; rejected before any store call
    #[error("missing required field: {field}")]
    MissingField { field: String },

    /// Invalid attribute value; rejected before any store call
    #[error("invalid value for {field}: {message}")]
    InvalidValue { field: String, message: String },

    /// Category not found
    #[error("category not found: {id}")]
    CategoryNotFound { id: String },

    /// Custom field not found
    #[error("field not found: {id}")]
    FieldNotFound { id: String },

    /// Log entry not found
    #[error("log not found: {id}")]
    LogNotFound { id: String },

    /// The store rejected the operation's only write (or a read)
    #[error("store error: {0}")]
    Store(#[from] StoreError),

    /// A multi-write operation failed after some writes were committed
    #[error("{operation} partially applied after {applied} committed writes: {source}")]
    PartiallyApplied {
        operation: String,
        applied: usize,
        #[source]
        source: StoreError,
    },

    /// Configuration error
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),
}

impl SchemaError {
    /// Create a missing field error
    pub fn missing_field(field: impl Into<String>) -> Self {
        Self::MissingField {
            field: field.into(),
        }
    }

    /// Create an invalid value error
    pub fn invalid_value(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidValue {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Wrap a store failure that happened after `applied` committed writes.
    ///
    /// With nothing committed yet the failure is reported as a plain
    /// [`SchemaError::Store`].
    pub fn after_writes(operation: impl Into<String>, applied: usize, source: StoreError) -> Self {
        if applied == 0 {
            Self::Store(source)
        } else {
            Self::PartiallyApplied {
                operation: operation.into(),
                applied,
                source,
            }
        }
    }

    /// Check if this is a validation error
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::MissingField { .. } | Self::InvalidValue { .. })
    }

    /// Check if the failed operation may have left some writes behind
    pub fn may_have_partially_applied(&self) -> bool {
        matches!(self, Self::PartiallyApplied { .. })
    }

    /// Check if the failed operation wrote nothing
    pub fn wrote_nothing(&self) -> bool {
        !self.may_have_partially_applied()
    }
}

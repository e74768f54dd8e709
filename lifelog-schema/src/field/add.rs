//! AddField command

use crate::codec;
use crate::context::SchemaContext;
use crate::error::{Result, SchemaError};
use crate::operation::{impl_operation, logged, Execute, ExecutionResult};
use crate::slug;
use crate::types::{FieldDefinition, FieldId, FieldRecord, FieldType};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Define a new custom field.
///
/// The key name is derived from the label and is unique among all of the
/// tenant's fields, active or not.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AddField {
    /// Display label; must not be blank
    pub label: String,
    #[serde(rename = "type")]
    pub field_type: FieldType,
    /// User choices for select-like types
    #[serde(default)]
    pub options: Vec<String>,
    #[serde(default)]
    pub enable_notification: bool,
}

impl_operation!(
    AddField,
    verb = "add",
    noun = "field",
    description = "Define a new custom field"
);

impl AddField {
    pub fn new(label: impl Into<String>, field_type: FieldType) -> Self {
        Self {
            label: label.into(),
            field_type,
            options: Vec::new(),
            enable_notification: false,
        }
    }

    pub fn with_options<I, S>(mut self, options: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.options = options.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_notification(mut self, enabled: bool) -> Self {
        self.enable_notification = enabled;
        self
    }

    async fn apply(&self, ctx: &SchemaContext) -> Result<FieldDefinition> {
        let label = self.label.trim();
        if label.is_empty() {
            return Err(SchemaError::missing_field("label"));
        }

        let existing = ctx.store().list_fields().await?;
        let key_name = slug::unique_key_name(label, existing.iter().map(|f| f.key_name.as_str()));
        let sort_order = existing.iter().map(|f| f.sort_order).max().unwrap_or(0) + 1;

        let definition = FieldDefinition {
            id: FieldId::new(),
            label: label.to_string(),
            key_name,
            field_type: self.field_type,
            options: codec::strip(&self.options),
            sort_order,
            is_active: true,
            enable_notification: self.enable_notification,
        };

        ctx.store()
            .insert_field(&FieldRecord::from(&definition))
            .await?;
        debug!(
            id = %definition.id,
            key_name = %definition.key_name,
            field_type = %definition.field_type,
            "field added"
        );
        Ok(definition)
    }
}

#[async_trait]
impl Execute<SchemaContext, SchemaError> for AddField {
    type Output = FieldDefinition;

    async fn execute(&self, ctx: &SchemaContext) -> ExecutionResult<FieldDefinition, SchemaError> {
        logged(self, self.apply(ctx)).await
    }
}

//! UpdateField command

use crate::codec::{self, OptionsUpdate};
use crate::context::SchemaContext;
use crate::error::{Result, SchemaError};
use crate::operation::{impl_operation, logged, Execute, ExecutionResult};
use crate::types::{FieldDefinition, FieldId, FieldType};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// Advisory notice returned with a successful field update.
///
/// Historical logs are never rewritten; a warning only tells the caller
/// that stored values may no longer match the field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ConsistencyWarning {
    /// The type changed while logs already hold values for the field
    TypeChanged {
        field_id: FieldId,
        key_name: String,
        from: FieldType,
        to: FieldType,
        affected_logs: usize,
    },
}

/// The updated field plus any consistency warnings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldUpdate {
    pub field: FieldDefinition,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<ConsistencyWarning>,
}

/// Update a custom field.
///
/// The key name never changes, so logs keep resolving their values after a
/// relabel.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct UpdateField {
    pub id: FieldId,
    pub label: Option<String>,
    #[serde(rename = "type")]
    pub field_type: Option<FieldType>,
    #[serde(flatten)]
    pub options: OptionsUpdate,
}

impl_operation!(
    UpdateField,
    verb = "update",
    noun = "field",
    description = "Update a custom field"
);

impl UpdateField {
    pub fn new(id: impl Into<FieldId>) -> Self {
        Self {
            id: id.into(),
            label: None,
            field_type: None,
            options: OptionsUpdate::default(),
        }
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn with_type(mut self, field_type: FieldType) -> Self {
        self.field_type = Some(field_type);
        self
    }

    pub fn with_options<I, S>(mut self, options: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.options.options = Some(options.into_iter().map(Into::into).collect());
        self
    }

    pub fn with_notification(mut self, enabled: bool) -> Self {
        self.options.enable_notification = Some(enabled);
        self
    }

    async fn apply(&self, ctx: &SchemaContext) -> Result<FieldUpdate> {
        let mut record = ctx
            .store()
            .get_field(&self.id)
            .await?
            .ok_or_else(|| SchemaError::FieldNotFound {
                id: self.id.to_string(),
            })?;
        let previous_type = record.field_type;

        if !self.options.is_empty() {
            record.options = codec::merge_update(&record.options, &self.options);
        }
        if let Some(label) = &self.label {
            record.label = label.clone();
        }
        if let Some(field_type) = self.field_type {
            record.field_type = field_type;
        }

        ctx.store().update_field(&record).await?;
        debug!(id = %record.id, key_name = %record.key_name, "field updated");

        let mut warnings = Vec::new();
        if record.field_type != previous_type {
            match ctx.store().list_logs().await {
                Ok(logs) => {
                    let affected_logs = logs
                        .iter()
                        .filter(|log| log.has_custom_value(&record.key_name))
                        .count();
                    if affected_logs > 0 {
                        warn!(
                            key_name = %record.key_name,
                            from = %previous_type,
                            to = %record.field_type,
                            affected_logs,
                            "field type changed with existing log values"
                        );
                        warnings.push(ConsistencyWarning::TypeChanged {
                            field_id: record.id.clone(),
                            key_name: record.key_name.clone(),
                            from: previous_type,
                            to: record.field_type,
                            affected_logs,
                        });
                    }
                }
                Err(e) => {
                    warn!(%e, id = %record.id, "could not scan logs after type change");
                }
            }
        }

        Ok(FieldUpdate {
            field: FieldDefinition::from(record),
            warnings,
        })
    }
}

#[async_trait]
impl Execute<SchemaContext, SchemaError> for UpdateField {
    type Output = FieldUpdate;

    async fn execute(&self, ctx: &SchemaContext) -> ExecutionResult<FieldUpdate, SchemaError> {
        logged(self, self.apply(ctx)).await
    }
}

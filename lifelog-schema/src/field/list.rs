//! ListFields command and notification field selection

use crate::context::SchemaContext;
use crate::error::{Result, SchemaError};
use crate::operation::{impl_operation, unlogged, Execute, ExecutionResult};
use crate::types::FieldDefinition;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// List custom field definitions ordered by `sort_order`.
///
/// Each element has the notification sentinel stripped from `options` and
/// `enable_notification` derived from it.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct ListFields {
    /// Skip inactive fields
    #[serde(default)]
    pub active_only: bool,
}

impl_operation!(
    ListFields,
    verb = "list",
    noun = "fields",
    description = "List custom field definitions"
);

impl ListFields {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn active_only(mut self) -> Self {
        self.active_only = true;
        self
    }

    async fn apply(&self, ctx: &SchemaContext) -> Result<Vec<FieldDefinition>> {
        let mut fields = ctx.field_definitions().await?;
        if self.active_only {
            fields.retain(|f| f.is_active);
        }
        Ok(fields)
    }
}

#[async_trait]
impl Execute<SchemaContext, SchemaError> for ListFields {
    type Output = Vec<FieldDefinition>;

    async fn execute(
        &self,
        ctx: &SchemaContext,
    ) -> ExecutionResult<Vec<FieldDefinition>, SchemaError> {
        unlogged(self.apply(ctx)).await
    }
}

/// Fields a reminder scheduler should watch: notifications enabled and a
/// `time` or `date` type.
pub async fn notification_fields(ctx: &SchemaContext) -> Result<Vec<FieldDefinition>> {
    let mut fields = ctx.field_definitions().await?;
    fields.retain(FieldDefinition::notifies);
    Ok(fields)
}

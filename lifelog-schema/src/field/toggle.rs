//! ToggleFieldVisibility command

use crate::context::SchemaContext;
use crate::error::{Result, SchemaError};
use crate::operation::{impl_operation, logged, Execute, ExecutionResult};
use crate::types::{FieldDefinition, FieldId};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Activate or deactivate a custom field.
///
/// Inactive fields keep their key name and their place in category layouts.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ToggleFieldVisibility {
    pub id: FieldId,
    pub is_active: bool,
}

impl_operation!(
    ToggleFieldVisibility,
    verb = "toggle",
    noun = "field",
    description = "Activate or deactivate a custom field"
);

impl ToggleFieldVisibility {
    pub fn new(id: impl Into<FieldId>, is_active: bool) -> Self {
        Self {
            id: id.into(),
            is_active,
        }
    }

    async fn apply(&self, ctx: &SchemaContext) -> Result<FieldDefinition> {
        let mut record = ctx
            .store()
            .get_field(&self.id)
            .await?
            .ok_or_else(|| SchemaError::FieldNotFound {
                id: self.id.to_string(),
            })?;

        record.is_active = self.is_active;
        ctx.store().update_field(&record).await?;
        debug!(id = %record.id, is_active = record.is_active, "field visibility changed");
        Ok(FieldDefinition::from(record))
    }
}

#[async_trait]
impl Execute<SchemaContext, SchemaError> for ToggleFieldVisibility {
    type Output = FieldDefinition;

    async fn execute(&self, ctx: &SchemaContext) -> ExecutionResult<FieldDefinition, SchemaError> {
        logged(self, self.apply(ctx)).await
    }
}

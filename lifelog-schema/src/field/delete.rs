//! DeleteField command

use crate::context::SchemaContext;
use crate::error::{Result, SchemaError};
use crate::operation::{impl_operation, logged, Execute, ExecutionResult};
use crate::types::FieldId;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Delete a custom field.
///
/// Category layouts that reference it are left as they are; the resolver
/// drops the dangling reference. Log values stay in `custom_data`.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DeleteField {
    pub id: FieldId,
}

impl_operation!(
    DeleteField,
    verb = "delete",
    noun = "field",
    description = "Delete a custom field"
);

impl DeleteField {
    pub fn new(id: impl Into<FieldId>) -> Self {
        Self { id: id.into() }
    }

    async fn apply(&self, ctx: &SchemaContext) -> Result<FieldId> {
        if !ctx.store().delete_field(&self.id).await? {
            return Err(SchemaError::FieldNotFound {
                id: self.id.to_string(),
            });
        }
        debug!(id = %self.id, "field deleted");
        Ok(self.id.clone())
    }
}

#[async_trait]
impl Execute<SchemaContext, SchemaError> for DeleteField {
    type Output = FieldId;

    async fn execute(&self, ctx: &SchemaContext) -> ExecutionResult<FieldId, SchemaError> {
        logged(self, self.apply(ctx)).await
    }
}

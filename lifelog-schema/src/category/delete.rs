//! DeleteCategory command

use crate::context::SchemaContext;
use crate::error::{Result, SchemaError};
use crate::operation::{impl_operation, logged, Execute, ExecutionResult};
use crate::types::CategoryId;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Delete a category.
///
/// Logs keep their category name; nothing cascades.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DeleteCategory {
    pub id: CategoryId,
}

impl_operation!(
    DeleteCategory,
    verb = "delete",
    noun = "category",
    description = "Delete a category"
);

impl DeleteCategory {
    pub fn new(id: impl Into<CategoryId>) -> Self {
        Self { id: id.into() }
    }

    async fn apply(&self, ctx: &SchemaContext) -> Result<CategoryId> {
        if !ctx.store().delete_category(&self.id).await? {
            return Err(SchemaError::CategoryNotFound {
                id: self.id.to_string(),
            });
        }
        debug!(id = %self.id, "category deleted");
        Ok(self.id.clone())
    }
}

#[async_trait]
impl Execute<SchemaContext, SchemaError> for DeleteCategory {
    type Output = CategoryId;

    async fn execute(&self, ctx: &SchemaContext) -> ExecutionResult<CategoryId, SchemaError> {
        logged(self, self.apply(ctx)).await
    }
}

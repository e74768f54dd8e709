//! GetCategory command and default category lookup

use crate::context::SchemaContext;
use crate::error::{Result, SchemaError};
use crate::operation::{impl_operation, unlogged, Execute, ExecutionResult};
use crate::types::{Category, CategoryId};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Get a category by ID
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct GetCategory {
    pub id: CategoryId,
}

impl_operation!(
    GetCategory,
    verb = "get",
    noun = "category",
    description = "Get a category by ID"
);

impl GetCategory {
    pub fn new(id: impl Into<CategoryId>) -> Self {
        Self { id: id.into() }
    }

    async fn apply(&self, ctx: &SchemaContext) -> Result<Category> {
        ctx.store()
            .get_category(&self.id)
            .await?
            .ok_or_else(|| SchemaError::CategoryNotFound {
                id: self.id.to_string(),
            })
    }
}

#[async_trait]
impl Execute<SchemaContext, SchemaError> for GetCategory {
    type Output = Category;

    async fn execute(&self, ctx: &SchemaContext) -> ExecutionResult<Category, SchemaError> {
        unlogged(self.apply(ctx)).await
    }
}

/// The category new logs should pre-select, if one is marked default.
pub async fn default_category(ctx: &SchemaContext) -> Result<Option<Category>> {
    let categories = ctx.store().list_categories().await?;
    Ok(categories.into_iter().find(|c| c.is_default))
}

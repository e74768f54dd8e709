//! ListCategories command

use crate::context::SchemaContext;
use crate::error::{Result, SchemaError};
use crate::operation::{impl_operation, unlogged, Execute, ExecutionResult};
use crate::types::Category;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// List categories ordered by `sort_order`
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct ListCategories {
    /// Skip inactive categories
    #[serde(default)]
    pub active_only: bool,
}

impl_operation!(
    ListCategories,
    verb = "list",
    noun = "categories",
    description = "List categories ordered by sort order"
);

impl ListCategories {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn active_only(mut self) -> Self {
        self.active_only = true;
        self
    }

    async fn apply(&self, ctx: &SchemaContext) -> Result<Vec<Category>> {
        let mut categories = ctx.store().list_categories().await?;
        if self.active_only {
            categories.retain(|c| c.is_active);
        }
        Ok(categories)
    }
}

#[async_trait]
impl Execute<SchemaContext, SchemaError> for ListCategories {
    type Output = Vec<Category>;

    async fn execute(&self, ctx: &SchemaContext) -> ExecutionResult<Vec<Category>, SchemaError> {
        unlogged(self.apply(ctx)).await
    }
}

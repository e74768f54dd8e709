//! SetDefaultCategory command

use crate::context::SchemaContext;
use crate::error::{Result, SchemaError};
use crate::operation::{impl_operation, logged, Execute, ExecutionResult};
use crate::types::{Category, CategoryId};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::info;

/// Make one category the tenant's default.
///
/// Runs in two phases: every other default is cleared, then the target is
/// set. The phases are separate store writes. A failure after the first
/// committed write surfaces as [`SchemaError::PartiallyApplied`].
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SetDefaultCategory {
    pub id: CategoryId,
}

impl_operation!(
    SetDefaultCategory,
    verb = "set_default",
    noun = "category",
    description = "Make a category the default for new logs"
);

impl SetDefaultCategory {
    pub fn new(id: impl Into<CategoryId>) -> Self {
        Self { id: id.into() }
    }

    async fn apply(&self, ctx: &SchemaContext) -> Result<Category> {
        const OPERATION: &str = "set default category";
        let store = ctx.store();

        let mut target = store
            .get_category(&self.id)
            .await?
            .ok_or_else(|| SchemaError::CategoryNotFound {
                id: self.id.to_string(),
            })?;

        let mut applied = 0;
        let others = store
            .list_categories()
            .await?
            .into_iter()
            .filter(|c| c.id != self.id && c.is_default);
        for mut other in others {
            other.is_default = false;
            store
                .update_category(&other)
                .await
                .map_err(|e| SchemaError::after_writes(OPERATION, applied, e))?;
            applied += 1;
        }

        target.is_default = true;
        store
            .update_category(&target)
            .await
            .map_err(|e| SchemaError::after_writes(OPERATION, applied, e))?;

        info!(id = %target.id, name = %target.name, cleared = applied, "default category set");
        Ok(target)
    }
}

#[async_trait]
impl Execute<SchemaContext, SchemaError> for SetDefaultCategory {
    type Output = Category;

    async fn execute(&self, ctx: &SchemaContext) -> ExecutionResult<Category, SchemaError> {
        logged(self, self.apply(ctx)).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::category::AddCategory;

    async fn setup(names: &[&str]) -> (SchemaContext, Vec<Category>) {
        let ctx = SchemaContext::in_memory();
        let mut categories = Vec::new();
        for name in names {
            categories.push(
                AddCategory::new(*name)
                    .execute(&ctx)
                    .await
                    .into_result()
                    .unwrap(),
            );
        }
        (ctx, categories)
    }

    fn defaults(categories: &[Category]) -> Vec<&CategoryId> {
        categories
            .iter()
            .filter(|c| c.is_default)
            .map(|c| &c.id)
            .collect()
    }

    #[tokio::test]
    async fn test_set_default_is_exclusive() {
        let (ctx, categories) = setup(&["Food", "Transport", "Health"]).await;

        for target in &categories {
            SetDefaultCategory::new(target.id.clone())
                .execute(&ctx)
                .await
                .into_result()
                .unwrap();
            let all = ctx.categories().await.unwrap();
            assert_eq!(defaults(&all), vec![&target.id]);
        }
    }

    #[tokio::test]
    async fn test_set_default_is_idempotent() {
        let (ctx, categories) = setup(&["Food", "Transport"]).await;
        for _ in 0..2 {
            SetDefaultCategory::new(categories[1].id.clone())
                .execute(&ctx)
                .await
                .into_result()
                .unwrap();
        }
        let all = ctx.categories().await.unwrap();
        assert_eq!(defaults(&all), vec![&categories[1].id]);
    }

    #[tokio::test]
    async fn test_set_default_unknown_writes_nothing() {
        let (ctx, categories) = setup(&["Food", "Transport"]).await;
        SetDefaultCategory::new(categories[0].id.clone())
            .execute(&ctx)
            .await
            .into_result()
            .unwrap();

        let err = SetDefaultCategory::new("missing")
            .execute(&ctx)
            .await
            .into_result()
            .unwrap_err();
        assert!(matches!(err, SchemaError::CategoryNotFound { .. }));
        assert!(err.wrote_nothing());

        let all = ctx.categories().await.unwrap();
        assert_eq!(defaults(&all), vec![&categories[0].id]);
    }
}

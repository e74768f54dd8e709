//! ReorderCategories command

use crate::context::SchemaContext;
use crate::error::{Result, SchemaError};
use crate::operation::{impl_operation, logged, Execute, ExecutionResult};
use crate::types::{CategoryId, ReorderOutcome, SortItem};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// Apply new `sort_order` values to categories.
///
/// Values are written verbatim, one store write per item. Ids that match no
/// category are skipped and listed in the outcome.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct ReorderCategories {
    pub items: Vec<SortItem<CategoryId>>,
}

impl_operation!(
    ReorderCategories,
    verb = "reorder",
    noun = "categories",
    description = "Set the sort order of categories"
);

impl ReorderCategories {
    pub fn new(items: Vec<SortItem<CategoryId>>) -> Self {
        Self { items }
    }

    /// Order `ids` as listed, using the category gap numbering
    pub fn from_ids<I, T>(ids: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<CategoryId>,
    {
        let items = ids
            .into_iter()
            .zip(1..)
            .map(|(id, n)| SortItem::new(id, n * super::SORT_ORDER_STEP))
            .collect();
        Self { items }
    }

    async fn apply(&self, ctx: &SchemaContext) -> Result<ReorderOutcome<CategoryId>> {
        const OPERATION: &str = "reorder categories";
        let store = ctx.store();
        let mut outcome = ReorderOutcome::default();

        for item in &self.items {
            let existing = store
                .get_category(&item.id)
                .await
                .map_err(|e| SchemaError::after_writes(OPERATION, outcome.applied, e))?;
            let Some(mut category) = existing else {
                outcome.skipped.push(item.id.clone());
                continue;
            };

            category.sort_order = item.sort_order;
            store
                .update_category(&category)
                .await
                .map_err(|e| SchemaError::after_writes(OPERATION, outcome.applied, e))?;
            outcome.applied += 1;
        }

        if !outcome.skipped.is_empty() {
            warn!(skipped = ?outcome.skipped, "reorder skipped unknown categories");
        }
        debug!(applied = outcome.applied, "categories reordered");
        Ok(outcome)
    }
}

#[async_trait]
impl Execute<SchemaContext, SchemaError> for ReorderCategories {
    type Output = ReorderOutcome<CategoryId>;

    async fn execute(
        &self,
        ctx: &SchemaContext,
    ) -> ExecutionResult<ReorderOutcome<CategoryId>, SchemaError> {
        logged(self, self.apply(ctx)).await
    }
}

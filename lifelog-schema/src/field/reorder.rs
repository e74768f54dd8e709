//! ReorderFields command

use crate::context::SchemaContext;
use crate::error::{Result, SchemaError};
use crate::operation::{impl_operation, logged, Execute, ExecutionResult};
use crate::types::{FieldId, ReorderOutcome, SortItem};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// Apply new `sort_order` values to custom fields.
///
/// The item list need not cover every field. Unknown ids are skipped and
/// listed in the outcome.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct ReorderFields {
    pub items: Vec<SortItem<FieldId>>,
}

impl_operation!(
    ReorderFields,
    verb = "reorder",
    noun = "fields",
    description = "Set the sort order of custom fields"
);

impl ReorderFields {
    pub fn new(items: Vec<SortItem<FieldId>>) -> Self {
        Self { items }
    }

    /// Order `ids` as listed, numbering from 1
    pub fn from_ids<I, T>(ids: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<FieldId>,
    {
        let items = ids
            .into_iter()
            .zip(1..)
            .map(|(id, n)| SortItem::new(id, n))
            .collect();
        Self { items }
    }

    async fn apply(&self, ctx: &SchemaContext) -> Result<ReorderOutcome<FieldId>> {
        const OPERATION: &str = "reorder fields";
        let store = ctx.store();
        let mut outcome = ReorderOutcome::default();

        for item in &self.items {
            let existing = store
                .get_field(&item.id)
                .await
                .map_err(|e| SchemaError::after_writes(OPERATION, outcome.applied, e))?;
            let Some(mut record) = existing else {
                outcome.skipped.push(item.id.clone());
                continue;
            };

            record.sort_order = item.sort_order;
            store
                .update_field(&record)
                .await
                .map_err(|e| SchemaError::after_writes(OPERATION, outcome.applied, e))?;
            outcome.applied += 1;
        }

        if !outcome.skipped.is_empty() {
            warn!(skipped = ?outcome.skipped, "reorder skipped unknown fields");
        }
        debug!(applied = outcome.applied, "fields reordered");
        Ok(outcome)
    }
}

#[async_trait]
impl Execute<SchemaContext, SchemaError> for ReorderFields {
    type Output = ReorderOutcome<FieldId>;

    async fn execute(
        &self,
        ctx: &SchemaContext,
    ) -> ExecutionResult<ReorderOutcome<FieldId>, SchemaError> {
        logged(self, self.apply(ctx)).await
    }
}

//! DeleteLog and DeleteLogs commands

use crate::context::SchemaContext;
use crate::error::{Result, SchemaError};
use crate::operation::{impl_operation, logged, Execute, ExecutionResult};
use crate::types::LogId;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// Delete a single log entry
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DeleteLog {
    pub id: LogId,
}

impl_operation!(
    DeleteLog,
    verb = "delete",
    noun = "log",
    description = "Delete a log entry"
);

impl DeleteLog {
    pub fn new(id: impl Into<LogId>) -> Self {
        Self { id: id.into() }
    }

    async fn apply(&self, ctx: &SchemaContext) -> Result<LogId> {
        if !ctx.store().delete_log(&self.id).await? {
            return Err(SchemaError::LogNotFound {
                id: self.id.to_string(),
            });
        }
        debug!(id = %self.id, "log deleted");
        Ok(self.id.clone())
    }
}

#[async_trait]
impl Execute<SchemaContext, SchemaError> for DeleteLog {
    type Output = LogId;

    async fn execute(&self, ctx: &SchemaContext) -> ExecutionResult<LogId, SchemaError> {
        logged(self, self.apply(ctx)).await
    }
}

/// Result of a bulk delete
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeleteOutcome {
    pub deleted: usize,
    /// Ids that matched no log
    pub missing: Vec<LogId>,
}

/// Delete several log entries, one store write each.
///
/// Unknown ids are reported, not treated as errors. A store failure after
/// some deletions surfaces as [`SchemaError::PartiallyApplied`].
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct DeleteLogs {
    pub ids: Vec<LogId>,
}

impl_operation!(
    DeleteLogs,
    verb = "delete",
    noun = "logs",
    description = "Delete several log entries"
);

impl DeleteLogs {
    pub fn new<I, T>(ids: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<LogId>,
    {
        Self {
            ids: ids.into_iter().map(Into::into).collect(),
        }
    }

    async fn apply(&self, ctx: &SchemaContext) -> Result<DeleteOutcome> {
        const OPERATION: &str = "delete logs";
        let mut outcome = DeleteOutcome::default();

        for id in &self.ids {
            let removed = ctx
                .store()
                .delete_log(id)
                .await
                .map_err(|e| SchemaError::after_writes(OPERATION, outcome.deleted, e))?;
            if removed {
                outcome.deleted += 1;
            } else {
                outcome.missing.push(id.clone());
            }
        }

        if !outcome.missing.is_empty() {
            warn!(missing = ?outcome.missing, "bulk delete skipped unknown logs");
        }
        debug!(deleted = outcome.deleted, "logs deleted");
        Ok(outcome)
    }
}

#[async_trait]
impl Execute<SchemaContext, SchemaError> for DeleteLogs {
    type Output = DeleteOutcome;

    async fn execute(&self, ctx: &SchemaContext) -> ExecutionResult<DeleteOutcome, SchemaError> {
        logged(self, self.apply(ctx)).await
    }
}

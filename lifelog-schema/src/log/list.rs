//! ListLogs command

use crate::context::SchemaContext;
use crate::error::{Result, SchemaError};
use crate::operation::{impl_operation, unlogged, Execute, ExecutionResult};
use crate::types::Log;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// List logs, newest date first and newest entry first within a date
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct ListLogs {
    /// Only logs whose category name matches exactly
    pub category: Option<String>,
}

impl_operation!(
    ListLogs,
    verb = "list",
    noun = "logs",
    description = "List log entries"
);

impl ListLogs {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn for_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    async fn apply(&self, ctx: &SchemaContext) -> Result<Vec<Log>> {
        let mut logs = ctx.store().list_logs().await?;
        if let Some(category) = &self.category {
            logs.retain(|log| &log.category == category);
        }
        Ok(logs)
    }
}

#[async_trait]
impl Execute<SchemaContext, SchemaError> for ListLogs {
    type Output = Vec<Log>;

    async fn execute(&self, ctx: &SchemaContext) -> ExecutionResult<Vec<Log>, SchemaError> {
        unlogged(self.apply(ctx)).await
    }
}

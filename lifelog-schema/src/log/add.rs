//! AddLog command

use crate::context::SchemaContext;
use crate::error::{Result, SchemaError};
use crate::operation::{impl_operation, logged, Execute, ExecutionResult};
use crate::types::{Log, LogStatus};
use async_trait::async_trait;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use tracing::debug;

/// Record a new log entry
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AddLog {
    pub date: NaiveDate,
    pub end_date: Option<NaiveDate>,
    /// Must not be blank
    pub title: String,
    /// Category name; must not be blank
    pub category: String,
    pub amount: Option<f64>,
    pub memo: Option<String>,
    pub status: Option<LogStatus>,
    pub image_url: Option<String>,
    pub emoji: Option<String>,
    pub start_time: Option<String>,
    pub end_time: Option<String>,
    /// Custom field values keyed by key_name
    #[serde(default)]
    pub custom_data: BTreeMap<String, Value>,
}

impl_operation!(
    AddLog,
    verb = "add",
    noun = "log",
    description = "Record a new log entry"
);

impl AddLog {
    pub fn new(date: NaiveDate, title: impl Into<String>, category: impl Into<String>) -> Self {
        Self {
            date,
            end_date: None,
            title: title.into(),
            category: category.into(),
            amount: None,
            memo: None,
            status: None,
            image_url: None,
            emoji: None,
            start_time: None,
            end_time: None,
            custom_data: BTreeMap::new(),
        }
    }

    pub fn with_end_date(mut self, end_date: NaiveDate) -> Self {
        self.end_date = Some(end_date);
        self
    }

    pub fn with_amount(mut self, amount: f64) -> Self {
        self.amount = Some(amount);
        self
    }

    pub fn with_memo(mut self, memo: impl Into<String>) -> Self {
        self.memo = Some(memo.into());
        self
    }

    pub fn with_status(mut self, status: LogStatus) -> Self {
        self.status = Some(status);
        self
    }

    pub fn with_emoji(mut self, emoji: impl Into<String>) -> Self {
        self.emoji = Some(emoji.into());
        self
    }

    pub fn with_times(
        mut self,
        start_time: impl Into<String>,
        end_time: impl Into<String>,
    ) -> Self {
        self.start_time = Some(start_time.into());
        self.end_time = Some(end_time.into());
        self
    }

    pub fn with_custom_value(mut self, key_name: impl Into<String>, value: Value) -> Self {
        self.custom_data.insert(key_name.into(), value);
        self
    }

    /// Replace all custom values, typically with
    /// [`super::capture_custom_data`] output
    pub fn with_custom_data(mut self, custom_data: BTreeMap<String, Value>) -> Self {
        self.custom_data = custom_data;
        self
    }

    async fn apply(&self, ctx: &SchemaContext) -> Result<Log> {
        let title = self.title.trim();
        if title.is_empty() {
            return Err(SchemaError::missing_field("title"));
        }
        let category = self.category.trim();
        if category.is_empty() {
            return Err(SchemaError::missing_field("category"));
        }

        let mut log = Log::new(self.date, title, category);
        log.end_date = self.end_date;
        log.amount = self.amount;
        log.memo = self.memo.clone();
        log.status = self.status;
        log.image_url = self.image_url.clone();
        log.emoji = self.emoji.clone();
        log.start_time = self.start_time.clone();
        log.end_time = self.end_time.clone();
        log.custom_data = self.custom_data.clone();

        ctx.store().insert_log(&log).await?;
        debug!(id = %log.id, date = %log.date, category = %log.category, "log added");
        Ok(log)
    }
}

#[async_trait]
impl Execute<SchemaContext, SchemaError> for AddLog {
    type Output = Log;

    async fn execute(&self, ctx: &SchemaContext) -> ExecutionResult<Log, SchemaError> {
        logged(self, self.apply(ctx)).await
    }
}

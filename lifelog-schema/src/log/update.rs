//! UpdateLog command

use crate::context::SchemaContext;
use crate::error::{Result, SchemaError};
use crate::operation::{impl_operation, logged, Execute, ExecutionResult};
use crate::types::{Log, LogId, LogStatus};
use async_trait::async_trait;
use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use tracing::debug;

/// Update a log entry. Only supplied attributes change.
///
/// Optional attributes take `Some(Some(v))` to set, `Some(None)` to clear
/// and `None` to leave unchanged. In JSON an explicit `null` clears.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct UpdateLog {
    pub id: LogId,
    pub date: Option<NaiveDate>,
    pub title: Option<String>,
    pub category: Option<String>,
    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub end_date: Option<Option<NaiveDate>>,
    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub amount: Option<Option<f64>>,
    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub memo: Option<Option<String>>,
    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub status: Option<Option<LogStatus>>,
    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub image_url: Option<Option<String>>,
    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub emoji: Option<Option<String>>,
    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub start_time: Option<Option<String>>,
    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub end_time: Option<Option<String>>,
    /// Replaces the stored custom values as a whole
    pub custom_data: Option<BTreeMap<String, Value>>,
}

/// A key that is present deserializes to `Some`, even when its value is null.
fn present<'de, D, T>(deserializer: D) -> std::result::Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

impl_operation!(
    UpdateLog,
    verb = "update",
    noun = "log",
    description = "Update a log entry"
);

impl UpdateLog {
    pub fn new(id: impl Into<LogId>) -> Self {
        Self {
            id: id.into(),
            date: None,
            title: None,
            category: None,
            end_date: None,
            amount: None,
            memo: None,
            status: None,
            image_url: None,
            emoji: None,
            start_time: None,
            end_time: None,
            custom_data: None,
        }
    }

    pub fn with_date(mut self, date: NaiveDate) -> Self {
        self.date = Some(date);
        self
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    pub fn with_end_date(mut self, end_date: NaiveDate) -> Self {
        self.end_date = Some(Some(end_date));
        self
    }

    pub fn with_amount(mut self, amount: f64) -> Self {
        self.amount = Some(Some(amount));
        self
    }

    pub fn with_memo(mut self, memo: impl Into<String>) -> Self {
        self.memo = Some(Some(memo.into()));
        self
    }

    pub fn with_status(mut self, status: LogStatus) -> Self {
        self.status = Some(Some(status));
        self
    }

    pub fn with_image_url(mut self, image_url: impl Into<String>) -> Self {
        self.image_url = Some(Some(image_url.into()));
        self
    }

    pub fn with_emoji(mut self, emoji: impl Into<String>) -> Self {
        self.emoji = Some(Some(emoji.into()));
        self
    }

    pub fn with_times(
        mut self,
        start_time: impl Into<String>,
        end_time: impl Into<String>,
    ) -> Self {
        self.start_time = Some(Some(start_time.into()));
        self.end_time = Some(Some(end_time.into()));
        self
    }

    pub fn clear_end_date(mut self) -> Self {
        self.end_date = Some(None);
        self
    }

    pub fn clear_amount(mut self) -> Self {
        self.amount = Some(None);
        self
    }

    pub fn clear_memo(mut self) -> Self {
        self.memo = Some(None);
        self
    }

    pub fn clear_status(mut self) -> Self {
        self.status = Some(None);
        self
    }

    pub fn clear_image_url(mut self) -> Self {
        self.image_url = Some(None);
        self
    }

    pub fn clear_emoji(mut self) -> Self {
        self.emoji = Some(None);
        self
    }

    pub fn clear_times(mut self) -> Self {
        self.start_time = Some(None);
        self.end_time = Some(None);
        self
    }

    pub fn with_custom_data(mut self, custom_data: BTreeMap<String, Value>) -> Self {
        self.custom_data = Some(custom_data);
        self
    }

    async fn apply(&self, ctx: &SchemaContext) -> Result<Log> {
        let title = non_blank("title", self.title.as_deref())?;
        let category = non_blank("category", self.category.as_deref())?;

        let mut log = ctx
            .store()
            .get_log(&self.id)
            .await?
            .ok_or_else(|| SchemaError::LogNotFound {
                id: self.id.to_string(),
            })?;

        if let Some(date) = self.date {
            log.date = date;
        }
        if let Some(title) = title {
            log.title = title;
        }
        if let Some(category) = category {
            log.category = category;
        }
        if let Some(end_date) = self.end_date {
            log.end_date = end_date;
        }
        if let Some(amount) = self.amount {
            log.amount = amount;
        }
        if let Some(memo) = &self.memo {
            log.memo = memo.clone();
        }
        if let Some(status) = self.status {
            log.status = status;
        }
        if let Some(image_url) = &self.image_url {
            log.image_url = image_url.clone();
        }
        if let Some(emoji) = &self.emoji {
            log.emoji = emoji.clone();
        }
        if let Some(start_time) = &self.start_time {
            log.start_time = start_time.clone();
        }
        if let Some(end_time) = &self.end_time {
            log.end_time = end_time.clone();
        }
        if let Some(custom_data) = &self.custom_data {
            log.custom_data = custom_data.clone();
        }

        ctx.store().update_log(&log).await?;
        debug!(id = %log.id, "log updated");
        Ok(log)
    }
}

/// Trimmed copy of a supplied value, rejecting blanks
fn non_blank(field: &str, value: Option<&str>) -> Result<Option<String>> {
    match value.map(str::trim) {
        Some("") => Err(SchemaError::invalid_value(field, "cannot be blank")),
        Some(v) => Ok(Some(v.to_string())),
        None => Ok(None),
    }
}

#[async_trait]
impl Execute<SchemaContext, SchemaError> for UpdateLog {
    type Output = Log;

    async fn execute(&self, ctx: &SchemaContext) -> ExecutionResult<Log, SchemaError> {
        logged(self, self.apply(ctx)).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::log::AddLog;
    use serde_json::json;

    async fn setup() -> (SchemaContext, Log) {
        let ctx = SchemaContext::in_memory();
        let date = NaiveDate::from_ymd_opt(2024, 8, 1).unwrap();
        let log = AddLog::new(date, "Coffee", "Food")
            .with_amount(4.0)
            .with_custom_value("size", json!("large"))
            .execute(&ctx)
            .await
            .into_result()
            .unwrap();
        (ctx, log)
    }

    #[tokio::test]
    async fn test_update_log_partial() {
        let (ctx, log) = setup().await;
        let updated = UpdateLog::new(log.id.clone())
            .with_title("Espresso")
            .with_status(LogStatus::Completed)
            .execute(&ctx)
            .await
            .into_result()
            .unwrap();

        assert_eq!(updated.title, "Espresso");
        assert_eq!(updated.status, Some(LogStatus::Completed));
        assert_eq!(updated.amount, Some(4.0));
        assert_eq!(updated.category, "Food");
        assert_eq!(updated.created_at, log.created_at);
        assert_eq!(updated.custom_data["size"], json!("large"));
    }

    #[tokio::test]
    async fn test_update_log_replaces_custom_data() {
        let (ctx, log) = setup().await;
        let updated = UpdateLog::new(log.id.clone())
            .with_custom_data(BTreeMap::from([("milk".to_string(), json!("oat"))]))
            .execute(&ctx)
            .await
            .into_result()
            .unwrap();
        assert_eq!(updated.custom_data.len(), 1);
        assert_eq!(updated.custom_data["milk"], json!("oat"));
    }

    #[tokio::test]
    async fn test_update_log_clears_optional_attributes() {
        let (ctx, log) = setup().await;
        let with_memo = UpdateLog::new(log.id.clone())
            .with_memo("double shot")
            .with_status(LogStatus::Completed)
            .execute(&ctx)
            .await
            .into_result()
            .unwrap();
        assert_eq!(with_memo.memo.as_deref(), Some("double shot"));

        let cleared = UpdateLog::new(log.id.clone())
            .clear_amount()
            .clear_memo()
            .execute(&ctx)
            .await
            .into_result()
            .unwrap();
        assert_eq!(cleared.amount, None);
        assert_eq!(cleared.memo, None);
        assert_eq!(cleared.status, Some(LogStatus::Completed));
    }

    #[tokio::test]
    async fn test_update_log_null_clears_and_missing_keeps() {
        let (ctx, log) = setup().await;
        let cmd: UpdateLog = serde_json::from_value(json!({
            "id": log.id.as_str(),
            "amount": null,
        }))
        .unwrap();
        assert_eq!(cmd.amount, Some(None));
        assert_eq!(cmd.memo, None);

        let updated = cmd.execute(&ctx).await.into_result().unwrap();
        assert_eq!(updated.amount, None);
        assert_eq!(updated.title, "Coffee");
    }

    #[tokio::test]
    async fn test_update_log_rejects_blank_title() {
        let (ctx, log) = setup().await;
        let result = UpdateLog::new(log.id.clone())
            .with_title("  ")
            .execute(&ctx)
            .await
            .into_result();
        assert!(matches!(result, Err(SchemaError::InvalidValue { .. })));
    }

    #[tokio::test]
    async fn test_update_log_not_found() {
        let ctx = SchemaContext::in_memory();
        let result = UpdateLog::new("missing")
            .with_memo("x")
            .execute(&ctx)
            .await
            .into_result();
        assert!(matches!(result, Err(SchemaError::LogNotFound { .. })));
    }
}

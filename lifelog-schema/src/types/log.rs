//! Log entry type

use super::ids::LogId;
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// Progress state of a planned log entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LogStatus {
    Pending,
    Planned,
    Completed,
}

/// A single life-log entry.
///
/// `category` holds the category *name*, not its id; renaming or deleting a
/// category leaves existing entries pointing at the old name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Log {
    pub id: LogId,
    pub created_at: DateTime<Utc>,
    pub date: NaiveDate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_date: Option<NaiveDate>,
    pub title: String,
    pub category: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub amount: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub memo: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<LogStatus>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub emoji: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_time: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_time: Option<String>,
    /// Custom field values keyed by key_name at save time
    #[serde(default)]
    pub custom_data: BTreeMap<String, Value>,
}

impl Log {
    pub fn new(date: NaiveDate, title: impl Into<String>, category: impl Into<String>) -> Self {
        Self {
            id: LogId::new(),
            created_at: Utc::now(),
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

    /// True when `custom_data` holds a non-null value under `key_name`.
    pub fn has_custom_value(&self, key_name: &str) -> bool {
        self.custom_data
            .get(key_name)
            .is_some_and(|v| !v.is_null())
    }
}

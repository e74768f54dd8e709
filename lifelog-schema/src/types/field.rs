//! Custom field types: FieldType, FieldRecord, FieldDefinition

use super::ids::FieldId;
use crate::codec;
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;

/// The type of a field; determines what shape its value takes in a log.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldType {
    Text,
    Number,
    Select,
    Multiselect,
    Time,
    Date,
    Boolean,
    Url,
    Email,
    Phone,
    Percent,
    Currency,
    Duration,
    Rating,
    Barcode,
    User,
    Attachment,
}

impl FieldType {
    pub const ALL: [FieldType; 17] = [
        FieldType::Text,
        FieldType::Number,
        FieldType::Select,
        FieldType::Multiselect,
        FieldType::Time,
        FieldType::Date,
        FieldType::Boolean,
        FieldType::Url,
        FieldType::Email,
        FieldType::Phone,
        FieldType::Percent,
        FieldType::Currency,
        FieldType::Duration,
        FieldType::Rating,
        FieldType::Barcode,
        FieldType::User,
        FieldType::Attachment,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            FieldType::Text => "text",
            FieldType::Number => "number",
            FieldType::Select => "select",
            FieldType::Multiselect => "multiselect",
            FieldType::Time => "time",
            FieldType::Date => "date",
            FieldType::Boolean => "boolean",
            FieldType::Url => "url",
            FieldType::Email => "email",
            FieldType::Phone => "phone",
            FieldType::Percent => "percent",
            FieldType::Currency => "currency",
            FieldType::Duration => "duration",
            FieldType::Rating => "rating",
            FieldType::Barcode => "barcode",
            FieldType::User => "user",
            FieldType::Attachment => "attachment",
        }
    }

    /// Whether a reminder can be scheduled from a value of this type.
    pub fn supports_notification(&self) -> bool {
        matches!(self, FieldType::Time | FieldType::Date)
    }
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FieldType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        FieldType::ALL
            .iter()
            .copied()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| format!("unknown field type: {s}"))
    }
}

/// Storage shape of a custom field.
///
/// `options` is the raw column and may carry the notification sentinel.
/// Only the store and the codec should look at it; everything else works
/// with [`FieldDefinition`].
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FieldRecord {
    pub id: FieldId,
    pub label: String,
    pub key_name: String,
    #[serde(rename = "type")]
    pub field_type: FieldType,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub options: Vec<String>,
    pub sort_order: i64,
    #[serde(default = "default_true")]
    pub is_active: bool,
}

fn default_true() -> bool {
    true
}

/// Older records store `options: null` for fields without choices.
fn null_as_empty<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Vec<String>>::deserialize(deserializer)?.unwrap_or_default())
}

/// A custom field definition with the notification flag as a typed attribute.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FieldDefinition {
    pub id: FieldId,
    pub label: String,
    pub key_name: String,
    #[serde(rename = "type")]
    pub field_type: FieldType,
    /// User choices; never contains the notification sentinel
    #[serde(default, deserialize_with = "null_as_empty")]
    pub options: Vec<String>,
    pub sort_order: i64,
    pub is_active: bool,
    #[serde(default)]
    pub enable_notification: bool,
}

impl FieldDefinition {
    /// True when reminders should be scheduled from this field's values.
    pub fn notifies(&self) -> bool {
        self.enable_notification && self.field_type.supports_notification()
    }
}

impl From<&FieldRecord> for FieldDefinition {
    fn from(record: &FieldRecord) -> Self {
        Self {
            id: record.id.clone(),
            label: record.label.clone(),
            key_name: record.key_name.clone(),
            field_type: record.field_type,
            options: codec::strip(&record.options),
            sort_order: record.sort_order,
            is_active: record.is_active,
            enable_notification: codec::has_flag(&record.options),
        }
    }
}

impl From<FieldRecord> for FieldDefinition {
    fn from(record: FieldRecord) -> Self {
        FieldDefinition::from(&record)
    }
}

impl From<&FieldDefinition> for FieldRecord {
    fn from(def: &FieldDefinition) -> Self {
        Self {
            id: def.id.clone(),
            label: def.label.clone(),
            key_name: def.key_name.clone(),
            field_type: def.field_type,
            options: codec::encode(&def.options, def.enable_notification),
            sort_order: def.sort_order,
            is_active: def.is_active,
        }
    }
}

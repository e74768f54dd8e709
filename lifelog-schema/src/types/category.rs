//! Category types: Category, CategorySettings, TransactionType

use super::ids::CategoryId;
use super::standard::StandardField;
use serde::{Deserialize, Serialize};

/// Whether amounts logged under a category count as spending or income.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionType {
    Expense,
    Income,
    None,
}

/// Per-category layout settings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CategorySettings {
    /// Ordered field references: standard identifiers, custom field ids, or
    /// (legacy) custom field key names.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub visible_fields: Option<Vec<String>>,
}

impl CategorySettings {
    pub fn with_visible_fields<I, S>(fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            visible_fields: Some(fields.into_iter().map(Into::into).collect()),
        }
    }

    /// Reinsert `date` at the front of the visible list when it is missing.
    pub fn ensure_date(&mut self) {
        if let Some(fields) = self.visible_fields.as_mut() {
            ensure_date(fields);
        }
    }
}

/// Reinsert `date` at the front of a reference list when it is missing.
pub fn ensure_date(fields: &mut Vec<String>) {
    let date = StandardField::Date.as_str();
    if !fields.iter().any(|f| f == date) {
        fields.insert(0, date.to_string());
    }
}

/// A tenant-defined grouping of logs with its own field layout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Category {
    pub id: CategoryId,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    pub sort_order: i64,
    #[serde(default = "default_true")]
    pub is_active: bool,
    #[serde(default)]
    pub is_default: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_transaction_type: Option<TransactionType>,
    /// Absent on categories created before field layouts existed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub settings: Option<CategorySettings>,
}

fn default_true() -> bool {
    true
}

impl Category {
    /// Create a new active, non-default category
    pub fn new(name: impl Into<String>, sort_order: i64) -> Self {
        Self {
            id: CategoryId::new(),
            name: name.into(),
            color: None,
            icon: None,
            sort_order,
            is_active: true,
            is_default: false,
            default_transaction_type: None,
            settings: None,
        }
    }

    /// The stored visible-field references, if the category has any.
    pub fn visible_fields(&self) -> Option<&[String]> {
        self.settings
            .as_ref()
            .and_then(|s| s.visible_fields.as_deref())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ensure_date_prepends_when_missing() {
        let mut settings = CategorySettings::with_visible_fields(["amount", "memo"]);
        settings.ensure_date();
        assert_eq!(
            settings.visible_fields.unwrap(),
            vec!["date".to_string(), "amount".into(), "memo".into()]
        );
    }

    #[test]
    fn ensure_date_keeps_existing_position() {
        let mut settings = CategorySettings::with_visible_fields(["amount", "date"]);
        settings.ensure_date();
        assert_eq!(
            settings.visible_fields.unwrap(),
            vec!["amount".to_string(), "date".into()]
        );
    }

    #[test]
    fn legacy_category_without_settings_deserializes() {
        let yaml = r#"
id: 01HZX
name: Food
sort_order: 10
"#;
        let category: Category = serde_yaml_ng::from_str(yaml).unwrap();
        assert!(category.is_active);
        assert!(!category.is_default);
        assert!(category.visible_fields().is_none());
    }

    #[test]
    fn transaction_type_serializes_lowercase() {
        let json = serde_json::to_string(&TransactionType::Income).unwrap();
        assert_eq!(json, "\"income\"");
    }
}

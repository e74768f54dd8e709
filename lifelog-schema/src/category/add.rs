//! AddCategory command

use super::SORT_ORDER_STEP;
use crate::context::SchemaContext;
use crate::error::{Result, SchemaError};
use crate::operation::{impl_operation, logged, Execute, ExecutionResult};
use crate::types::{Category, CategorySettings, TransactionType};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Create a new category at the end of the list
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct AddCategory {
    /// Display name; must not be blank
    pub name: String,
    pub color: Option<String>,
    pub icon: Option<String>,
    pub default_transaction_type: Option<TransactionType>,
    /// Field layout; `date` is added at the front when missing
    pub settings: Option<CategorySettings>,
}

impl_operation!(
    AddCategory,
    verb = "add",
    noun = "category",
    description = "Create a new category"
);

impl AddCategory {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = Some(color.into());
        self
    }

    pub fn with_icon(mut self, icon: impl Into<String>) -> Self {
        self.icon = Some(icon.into());
        self
    }

    pub fn with_transaction_type(mut self, transaction_type: TransactionType) -> Self {
        self.default_transaction_type = Some(transaction_type);
        self
    }

    /// Set the ordered visible field references
    pub fn with_visible_fields<I, S>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.settings = Some(CategorySettings::with_visible_fields(fields));
        self
    }
}

impl AddCategory {
    async fn apply(&self, ctx: &SchemaContext) -> Result<Category> {
        let name = self.name.trim();
        if name.is_empty() {
            return Err(SchemaError::missing_field("name"));
        }

        let existing = ctx.store().list_categories().await?;
        let max = existing.iter().map(|c| c.sort_order).max().unwrap_or(0);

        let mut category = Category::new(name, max + SORT_ORDER_STEP);
        category.color = self.color.clone();
        category.icon = self.icon.clone();
        category.default_transaction_type = self.default_transaction_type;
        category.settings = self.settings.clone().map(|mut settings| {
            settings.ensure_date();
            settings
        });

        ctx.store().insert_category(&category).await?;
        debug!(
            id = %category.id,
            name = %category.name,
            sort_order = category.sort_order,
            "category added"
        );
        Ok(category)
    }
}

#[async_trait]
impl Execute<SchemaContext, SchemaError> for AddCategory {
    type Output = Category;

    async fn execute(&self, ctx: &SchemaContext) -> ExecutionResult<Category, SchemaError> {
        logged(self, self.apply(ctx)).await
    }
}

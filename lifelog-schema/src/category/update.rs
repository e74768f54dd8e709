//! UpdateCategory command

use crate::context::SchemaContext;
use crate::error::{Result, SchemaError};
use crate::operation::{impl_operation, logged, Execute, ExecutionResult};
use crate::types::{Category, CategoryId, CategorySettings, TransactionType};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Update a category's properties.
///
/// Only supplied attributes change. `is_default` is not touched here; use
/// [`super::SetDefaultCategory`].
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct UpdateCategory {
    pub id: CategoryId,
    pub name: Option<String>,
    pub color: Option<String>,
    pub icon: Option<String>,
    pub is_active: Option<bool>,
    pub default_transaction_type: Option<TransactionType>,
    pub settings: Option<CategorySettings>,
    pub sort_order: Option<i64>,
}

impl_operation!(
    UpdateCategory,
    verb = "update",
    noun = "category",
    description = "Update a category's properties"
);

impl UpdateCategory {
    pub fn new(id: impl Into<CategoryId>) -> Self {
        Self {
            id: id.into(),
            name: None,
            color: None,
            icon: None,
            is_active: None,
            default_transaction_type: None,
            settings: None,
            sort_order: None,
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = Some(color.into());
        self
    }

    pub fn with_icon(mut self, icon: impl Into<String>) -> Self {
        self.icon = Some(icon.into());
        self
    }

    pub fn with_active(mut self, is_active: bool) -> Self {
        self.is_active = Some(is_active);
        self
    }

    pub fn with_transaction_type(mut self, transaction_type: TransactionType) -> Self {
        self.default_transaction_type = Some(transaction_type);
        self
    }

    pub fn with_visible_fields<I, S>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.settings = Some(CategorySettings::with_visible_fields(fields));
        self
    }

    pub fn with_sort_order(mut self, sort_order: i64) -> Self {
        self.sort_order = Some(sort_order);
        self
    }

    async fn apply(&self, ctx: &SchemaContext) -> Result<Category> {
        let name = match &self.name {
            Some(name) if name.trim().is_empty() => {
                return Err(SchemaError::invalid_value("name", "cannot be blank"));
            }
            Some(name) => Some(name.trim().to_string()),
            None => None,
        };

        let mut category = ctx
            .store()
            .get_category(&self.id)
            .await?
            .ok_or_else(|| SchemaError::CategoryNotFound {
                id: self.id.to_string(),
            })?;

        if let Some(name) = name {
            category.name = name;
        }
        if let Some(color) = &self.color {
            category.color = Some(color.clone());
        }
        if let Some(icon) = &self.icon {
            category.icon = Some(icon.clone());
        }
        if let Some(is_active) = self.is_active {
            category.is_active = is_active;
        }
        if let Some(transaction_type) = self.default_transaction_type {
            category.default_transaction_type = Some(transaction_type);
        }
        if let Some(settings) = &self.settings {
            let mut settings = settings.clone();
            settings.ensure_date();
            category.settings = Some(settings);
        }
        if let Some(sort_order) = self.sort_order {
            category.sort_order = sort_order;
        }

        ctx.store().update_category(&category).await?;
        debug!(id = %category.id, "category updated");
        Ok(category)
    }
}

#[async_trait]
impl Execute<SchemaContext, SchemaError> for UpdateCategory {
    type Output = Category;

    async fn execute(&self, ctx: &SchemaContext) -> ExecutionResult<Category, SchemaError> {
        logged(self, self.apply(ctx)).await
    }
}

//! Field resolution: merge a category's field references with the tenant's
//! custom field definitions into the concrete, ordered list of fields a log
//! of that category carries.
//!
//! Resolution is pure. It performs no I/O and can run concurrently on
//! shared inputs. References that match nothing (a deleted custom field, a
//! typo) are dropped silently.

use crate::types::{
    ensure_date, Category, FieldDefinition, FieldId, FieldType, Locale, StandardField,
};
use serde::Serialize;
use std::collections::HashMap;

/// A parsed entry of `visible_fields`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldRef {
    Standard(StandardField),
    /// A custom field id, or a legacy key_name
    Custom(String),
}

impl FieldRef {
    pub fn parse(reference: &str) -> Self {
        match StandardField::parse(reference) {
            Some(field) => FieldRef::Standard(field),
            None => FieldRef::Custom(reference.to_string()),
        }
    }
}

/// How a custom reference found its definition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchedBy {
    Id,
    /// Legacy reference that stored the key_name instead of the id
    KeyName,
}

/// One concrete field of a category layout.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ResolvedField {
    Standard {
        field: StandardField,
        label: &'static str,
        field_type: FieldType,
    },
    Custom {
        definition: FieldDefinition,
        matched_by: MatchedBy,
    },
}

impl ResolvedField {
    /// The key a log stores this field's value under
    pub fn key(&self) -> &str {
        match self {
            ResolvedField::Standard { field, .. } => field.as_str(),
            ResolvedField::Custom { definition, .. } => &definition.key_name,
        }
    }

    pub fn label(&self) -> &str {
        match self {
            ResolvedField::Standard { label, .. } => label,
            ResolvedField::Custom { definition, .. } => &definition.label,
        }
    }

    pub fn field_type(&self) -> FieldType {
        match self {
            ResolvedField::Standard { field_type, .. } => *field_type,
            ResolvedField::Custom { definition, .. } => definition.field_type,
        }
    }

    /// Standard fields are always active
    pub fn is_active(&self) -> bool {
        match self {
            ResolvedField::Standard { .. } => true,
            ResolvedField::Custom { definition, .. } => definition.is_active,
        }
    }

    /// The real id of a custom field, whatever the reference matched on
    pub fn custom_id(&self) -> Option<&FieldId> {
        match self {
            ResolvedField::Standard { .. } => None,
            ResolvedField::Custom { definition, .. } => Some(&definition.id),
        }
    }

    pub fn as_custom(&self) -> Option<&FieldDefinition> {
        match self {
            ResolvedField::Standard { .. } => None,
            ResolvedField::Custom { definition, .. } => Some(definition),
        }
    }
}

/// Lookup tables over one set of field definitions, built once per pass.
struct FieldIndex<'a> {
    by_id: HashMap<&'a str, &'a FieldDefinition>,
    by_key_name: HashMap<&'a str, &'a FieldDefinition>,
}

impl<'a> FieldIndex<'a> {
    fn new(fields: &'a [FieldDefinition]) -> Self {
        let mut by_id = HashMap::with_capacity(fields.len());
        let mut by_key_name = HashMap::with_capacity(fields.len());
        for field in fields {
            by_id.entry(field.id.as_str()).or_insert(field);
            by_key_name.entry(field.key_name.as_str()).or_insert(field);
        }
        Self { by_id, by_key_name }
    }

    fn lookup(&self, reference: &str) -> Option<(&'a FieldDefinition, MatchedBy)> {
        if let Some(field) = self.by_id.get(reference) {
            return Some((*field, MatchedBy::Id));
        }
        self.by_key_name
            .get(reference)
            .map(|field| (*field, MatchedBy::KeyName))
    }
}

/// Resolves category layouts against a fixed set of field definitions.
pub struct FieldResolver<'a> {
    fields: &'a [FieldDefinition],
    index: FieldIndex<'a>,
    locale: Locale,
}

impl<'a> FieldResolver<'a> {
    pub fn new(fields: &'a [FieldDefinition]) -> Self {
        Self {
            fields,
            index: FieldIndex::new(fields),
            locale: Locale::default(),
        }
    }

    /// Set the language of standard field labels
    pub fn with_locale(mut self, locale: Locale) -> Self {
        self.locale = locale;
        self
    }

    /// The reference list a category resolves from, with `date` ensured.
    ///
    /// A category without settings gets the legacy layout: the default
    /// standard fields followed by every active custom field's key_name.
    pub fn effective_references(&self, category: &Category) -> Vec<String> {
        let mut references: Vec<String> = match category.visible_fields() {
            Some(fields) => fields.to_vec(),
            None => StandardField::LEGACY_DEFAULTS
                .iter()
                .map(|f| f.as_str().to_string())
                .chain(
                    self.fields
                        .iter()
                        .filter(|f| f.is_active)
                        .map(|f| f.key_name.clone()),
                )
                .collect(),
        };
        ensure_date(&mut references);
        references
    }

    /// Resolve one reference, or `None` when it matches nothing
    pub fn resolve_reference(&self, reference: &str) -> Option<ResolvedField> {
        match FieldRef::parse(reference) {
            FieldRef::Standard(field) => Some(ResolvedField::Standard {
                field,
                label: field.label(self.locale),
                field_type: field.field_type(),
            }),
            FieldRef::Custom(reference) => {
                self.index
                    .lookup(&reference)
                    .map(|(definition, matched_by)| ResolvedField::Custom {
                        definition: definition.clone(),
                        matched_by,
                    })
            }
        }
    }

    /// The ordered fields of `category`
    pub fn resolve(&self, category: &Category) -> Vec<ResolvedField> {
        self.effective_references(category)
            .iter()
            .filter_map(|reference| self.resolve_reference(reference))
            .collect()
    }

    /// Like [`FieldResolver::resolve`] but without inactive custom fields
    pub fn resolve_active(&self, category: &Category) -> Vec<ResolvedField> {
        self.resolve(category)
            .into_iter()
            .filter(ResolvedField::is_active)
            .collect()
    }
}

/// Resolve `category` against `fields` with English labels.
pub fn resolve_visible_fields(
    category: &Category,
    fields: &[FieldDefinition],
) -> Vec<ResolvedField> {
    FieldResolver::new(fields).resolve(category)
}

/// Resolve `category`, dropping inactive custom fields.
pub fn resolve_active_fields(
    category: &Category,
    fields: &[FieldDefinition],
) -> Vec<ResolvedField> {
    FieldResolver::new(fields).resolve_active(category)
}

/// The reference list `category` resolves from.
pub fn effective_visible_fields(category: &Category, fields: &[FieldDefinition]) -> Vec<String> {
    FieldResolver::new(fields).effective_references(category)
}

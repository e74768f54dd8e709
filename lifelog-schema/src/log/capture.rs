//! Custom data capture at save time

use crate::resolver::ResolvedField;
use serde_json::Value;
use std::collections::BTreeMap;

/// Pick the values of a log's resolved custom fields out of `values`.
///
/// Values are keyed by each field's key_name. Null, empty-string and
/// empty-array values are dropped. The result is what a log stores in
/// `custom_data`; it is not touched again when the field is later renamed,
/// retyped or deleted.
pub fn capture_custom_data(
    fields: &[ResolvedField],
    values: &BTreeMap<String, Value>,
) -> BTreeMap<String, Value> {
    fields
        .iter()
        .filter_map(ResolvedField::as_custom)
        .filter_map(|field| {
            let value = values.get(&field.key_name)?;
            (!is_blank(value)).then(|| (field.key_name.clone(), value.clone()))
        })
        .collect()
}

fn is_blank(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(s) => s.trim().is_empty(),
        Value::Array(items) => items.is_empty(),
        _ => false,
    }
}

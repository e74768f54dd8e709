//! End-to-end schema flow against the YAML store

use chrono::NaiveDate;
use lifelog_schema::{
    category::{AddCategory, ListCategories, SetDefaultCategory, UpdateCategory},
    codec::NOTIFICATION_SENTINEL,
    field::{notification_fields, AddField, DeleteField, ToggleFieldVisibility, UpdateField},
    log::{capture_custom_data, AddLog, ListLogs},
    Execute, FieldResolver, FieldType, Locale, ResolvedField, SchemaConfig, SchemaContext,
    StorageBackend, StorageConfig,
};
use serde_json::json;
use std::collections::BTreeMap;
use tempfile::TempDir;

fn yaml_config(root: &std::path::Path, tenant: &str) -> SchemaConfig {
    SchemaConfig {
        tenant: tenant.to_string(),
        locale: Locale::En,
        storage: StorageConfig {
            backend: StorageBackend::Yaml,
            root: Some(root.to_path_buf()),
        },
    }
}

#[test_log::test(tokio::test)]
async fn test_category_layout_round_trip() {
    let temp = TempDir::new().unwrap();
    let ctx = SchemaContext::from_config(&yaml_config(temp.path(), "alice"))
        .await
        .unwrap();

    let mood = AddField::new("Mood", FieldType::Select)
        .with_options(["good", "bad"])
        .execute(&ctx)
        .await
        .into_result()
        .unwrap();
    let wake = AddField::new("Wake up", FieldType::Time)
        .with_notification(true)
        .execute(&ctx)
        .await
        .into_result()
        .unwrap();

    let journal = AddCategory::new("Journal")
        .with_visible_fields(["memo", mood.id.as_str(), wake.id.as_str(), "ghost"])
        .execute(&ctx)
        .await
        .into_result()
        .unwrap();

    // Reopen from disk and resolve
    let ctx = SchemaContext::from_config(&yaml_config(temp.path(), "alice"))
        .await
        .unwrap();
    let fields = ctx.field_definitions().await.unwrap();
    let category = ctx
        .categories()
        .await
        .unwrap()
        .into_iter()
        .find(|c| c.id == journal.id)
        .unwrap();

    let resolved = FieldResolver::new(&fields).resolve(&category);
    let keys: Vec<_> = resolved.iter().map(ResolvedField::key).collect();
    assert_eq!(keys, vec!["date", "memo", "mood", "wake_up"]);

    // The sentinel lives on disk but never in definitions
    let raw = std::fs::read_to_string(
        temp.path()
            .join("alice")
            .join("fields")
            .join(format!("{}.yaml", wake.id)),
    )
    .unwrap();
    assert!(raw.contains(NOTIFICATION_SENTINEL));
    assert!(fields
        .iter()
        .all(|f| !f.options.iter().any(|o| o == NOTIFICATION_SENTINEL)));

    let notifying = notification_fields(&ctx).await.unwrap();
    assert_eq!(notifying.len(), 1);
    assert_eq!(notifying[0].key_name, "wake_up");
}

#[test_log::test(tokio::test)]
async fn test_log_values_survive_field_changes() {
    let temp = TempDir::new().unwrap();
    let ctx = SchemaContext::from_config(&yaml_config(temp.path(), "alice"))
        .await
        .unwrap();

    let distance = AddField::new("Distance", FieldType::Number)
        .execute(&ctx)
        .await
        .into_result()
        .unwrap();
    let category = AddCategory::new("Exercise")
        .with_visible_fields(["date", distance.id.as_str()])
        .execute(&ctx)
        .await
        .into_result()
        .unwrap();

    let fields = ctx.field_definitions().await.unwrap();
    let resolved = FieldResolver::new(&fields).resolve_active(&category);
    let values = BTreeMap::from([
        ("distance".to_string(), json!(5)),
        ("unrelated".to_string(), json!("x")),
    ]);
    let date = NaiveDate::from_ymd_opt(2024, 4, 2).unwrap();
    AddLog::new(date, "Morning run", &category.name)
        .with_custom_data(capture_custom_data(&resolved, &values))
        .execute(&ctx)
        .await
        .into_result()
        .unwrap();

    let updated = UpdateField::new(distance.id.clone())
        .with_label("Kilometres")
        .with_type(FieldType::Text)
        .execute(&ctx)
        .await
        .into_result()
        .unwrap();
    assert_eq!(updated.field.key_name, "distance");
    assert_eq!(updated.warnings.len(), 1);

    ToggleFieldVisibility::new(distance.id.clone(), false)
        .execute(&ctx)
        .await
        .into_result()
        .unwrap();
    let fields = ctx.field_definitions().await.unwrap();
    assert!(FieldResolver::new(&fields)
        .resolve_active(&category)
        .iter()
        .all(|f| f.key() != "distance"));

    DeleteField::new(distance.id.clone())
        .execute(&ctx)
        .await
        .into_result()
        .unwrap();

    let logs = ListLogs::new()
        .for_category("Exercise")
        .execute(&ctx)
        .await
        .into_result()
        .unwrap();
    assert_eq!(logs.len(), 1);
    assert_eq!(
        logs[0].custom_data,
        BTreeMap::from([("distance".to_string(), json!(5))])
    );
}

#[test_log::test(tokio::test)]
async fn test_default_category_and_ordering_persist() {
    let temp = TempDir::new().unwrap();
    let ctx = SchemaContext::from_config(&yaml_config(temp.path(), "alice"))
        .await
        .unwrap();

    let mut ids = Vec::new();
    for name in ["Food", "Transport", "Health"] {
        let category = AddCategory::new(name)
            .execute(&ctx)
            .await
            .into_result()
            .unwrap();
        ids.push(category.id);
    }
    SetDefaultCategory::new(ids[0].clone())
        .execute(&ctx)
        .await
        .into_result()
        .unwrap();
    SetDefaultCategory::new(ids[2].clone())
        .execute(&ctx)
        .await
        .into_result()
        .unwrap();
    UpdateCategory::new(ids[1].clone())
        .with_active(false)
        .execute(&ctx)
        .await
        .into_result()
        .unwrap();

    let other_tenant = SchemaContext::from_config(&yaml_config(temp.path(), "bob"))
        .await
        .unwrap();
    assert!(other_tenant.categories().await.unwrap().is_empty());

    let ctx = SchemaContext::from_config(&yaml_config(temp.path(), "alice"))
        .await
        .unwrap();
    let all = ListCategories::new()
        .execute(&ctx)
        .await
        .into_result()
        .unwrap();
    let orders: Vec<_> = all.iter().map(|c| c.sort_order).collect();
    assert_eq!(orders, vec![10, 20, 30]);
    let defaults: Vec<_> = all.iter().filter(|c| c.is_default).map(|c| &c.id).collect();
    assert_eq!(defaults, vec![&ids[2]]);

    let active = ListCategories::new()
        .active_only()
        .execute(&ctx)
        .await
        .into_result()
        .unwrap();
    assert_eq!(active.len(), 2);
}

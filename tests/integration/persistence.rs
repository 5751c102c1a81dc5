//! Tests for custom model persistence

use crate::common::TestFixture;
use modeldeck::{KeyValueStore, ModelOption, Provider};
use pretty_assertions::assert_eq;
use std::fs;

#[test]
fn test_custom_models_survive_reopen() -> Result<(), Box<dyn std::error::Error>> {
    let fixture = TestFixture::new()?;

    {
        let mut registry = fixture.registry(Provider::Claude);
        registry.add(Provider::Claude, "local-model", Some("Local"));
        registry.add(Provider::Claude, "qwen3", None);
    }

    let reopened = fixture.registry(Provider::Claude);
    assert_eq!(
        reopened.custom_models(),
        &[
            ModelOption::labeled("local-model", "Local"),
            ModelOption::labeled("qwen3", "qwen3"),
        ]
    );
    Ok(())
}

#[test]
fn test_stored_layout() -> Result<(), Box<dyn std::error::Error>> {
    let fixture = TestFixture::new()?;
    let mut registry = fixture.registry(Provider::Cursor);
    registry.add(Provider::Cursor, "composer-1", Some("Composer"));

    let raw = fixture
        .store()
        .get("cursor-custom-models")
        .ok_or("cursor key missing")?;
    let parsed: serde_json::Value = serde_json::from_str(&raw)?;
    assert_eq!(
        parsed,
        serde_json::json!([{"value": "composer-1", "label": "Composer"}])
    );
    assert_eq!(fixture.store().get("claude-custom-models"), None);
    Ok(())
}

#[test]
fn test_load_observes_writes_from_other_handle() -> Result<(), Box<dyn std::error::Error>> {
    let fixture = TestFixture::new()?;
    let mut writer = fixture.registry(Provider::Codex);
    let reader = fixture.registry(Provider::Claude);

    writer.add(Provider::Codex, "o1", None);
    assert_eq!(reader.load(Provider::Codex), vec![ModelOption::labeled("o1", "o1")]);
    assert!(reader.is_custom(Provider::Codex, "o1"));

    writer.remove(Provider::Codex, "o1");
    assert!(reader.load(Provider::Codex).is_empty());
    Ok(())
}

#[test]
fn test_malformed_values_load_empty() -> Result<(), Box<dyn std::error::Error>> {
    let fixture = TestFixture::new()?;
    let store = fixture.store();
    store.set("claude-custom-models", "definitely not json")?;
    store.set("cursor-custom-models", r#"{"value":"x","label":"x"}"#)?;
    store.set("codex-custom-models", "")?;

    let registry = fixture.registry(Provider::Claude);
    for &provider in Provider::ALL {
        assert!(registry.load(provider).is_empty(), "{provider}");
    }
    Ok(())
}

#[test]
fn test_malformed_value_is_replaced_on_add() -> Result<(), Box<dyn std::error::Error>> {
    let fixture = TestFixture::new()?;
    fixture.store().set("claude-custom-models", "[broken")?;

    let mut registry = fixture.registry(Provider::Claude);
    registry.add(Provider::Claude, "fresh", None);

    let reopened = fixture.registry(Provider::Claude);
    assert_eq!(
        reopened.custom_models(),
        &[ModelOption::labeled("fresh", "fresh")]
    );
    Ok(())
}

#[test]
fn test_corrupt_store_file_loads_empty() -> Result<(), Box<dyn std::error::Error>> {
    let fixture = TestFixture::new()?;
    let path = fixture.store_path();
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(&path, "\u{0}\u{1}garbage")?;

    let registry = fixture.registry(Provider::Claude);
    assert!(registry.custom_models().is_empty());
    assert_eq!(registry.merge(Provider::Claude).len(), 4);
    Ok(())
}

#[test]
fn test_add_leaves_corrupt_store_untouched() -> Result<(), Box<dyn std::error::Error>> {
    let fixture = TestFixture::new()?;
    let path = fixture.store_path();
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let content = r#"{"codex-custom-models": "[{\"value\":\"o1\"}]", "#;
    fs::write(&path, content)?;

    let mut registry = fixture.registry(Provider::Claude);
    registry.add(Provider::Claude, "local", None);

    assert!(registry.is_custom(Provider::Claude, "local"));
    assert_eq!(fs::read_to_string(&path)?, content);
    Ok(())
}

#[test]
fn test_bad_byte_in_one_value_keeps_other_providers() -> Result<(), Box<dyn std::error::Error>> {
    let fixture = TestFixture::new()?;
    let path = fixture.store_path();
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let mut content =
        br#"{"codex-custom-models": "[{\"value\":\"o1\",\"label\":\"o1\"}]", "ollama-base-url": "http://"#
            .to_vec();
    content.push(0xFF);
    content.extend_from_slice(br#""}"#);
    fs::write(&path, &content)?;

    let mut registry = fixture.registry(Provider::Claude);
    registry.add(Provider::Claude, "local", None);

    let store = fixture.store();
    assert!(store.get("codex-custom-models").is_some());
    assert_eq!(
        fixture.registry(Provider::Codex).custom_models(),
        &[ModelOption::labeled("o1", "o1")]
    );
    assert_eq!(
        fixture.registry(Provider::Claude).custom_models(),
        &[ModelOption::labeled("local", "local")]
    );
    Ok(())
}

#[test]
fn test_hand_edited_array_is_read() -> Result<(), Box<dyn std::error::Error>> {
    let fixture = TestFixture::new()?;
    let path = fixture.store_path();
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(
        &path,
        r#"{"codex-custom-models": [{"value": "gpt-oss:20b"}, {"value": "o3", "label": "Shadowed"}]}"#,
    )?;

    let registry = fixture.registry(Provider::Codex);
    assert_eq!(
        registry.custom_models(),
        &[
            ModelOption::labeled("gpt-oss:20b", "gpt-oss:20b"),
            ModelOption::labeled("o3", "Shadowed"),
        ]
    );
    let merged = registry.merge(Provider::Codex);
    assert_eq!(merged.iter().filter(|m| m.value == "o3").count(), 1);
    assert_eq!(merged.last(), Some(&ModelOption::labeled("gpt-oss:20b", "gpt-oss:20b")));
    Ok(())
}

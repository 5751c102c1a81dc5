//! Custom backend settings sharing the store with model lists

use crate::common::TestFixture;
use modeldeck::{CustomBackend, KeyValueStore, ModelOption, Provider};

#[test]
fn test_backend_and_models_share_store() -> Result<(), Box<dyn std::error::Error>> {
    let fixture = TestFixture::new()?;
    let store = fixture.store();

    let mut backend = CustomBackend::load(&store);
    backend.set_enabled(&store, true);
    backend.set_thinking_model(&store, "qwen3-coder-next:q4_K_M");

    let mut registry = fixture.registry(Provider::Claude);
    registry.add(Provider::Claude, "qwen3-coder:30b", Some("Qwen3 Coder"));

    let reloaded = CustomBackend::load(&fixture.store());
    assert!(reloaded.enabled);
    assert_eq!(reloaded.thinking_model, "qwen3-coder-next:q4_K_M");
    assert_eq!(
        fixture.registry(Provider::Claude).custom_models(),
        &[ModelOption::labeled("qwen3-coder:30b", "Qwen3 Coder")]
    );
    Ok(())
}

#[test]
fn test_thinking_override_picks_model() -> Result<(), Box<dyn std::error::Error>> {
    let fixture = TestFixture::new()?;
    let store = fixture.store();
    let registry = fixture.registry(Provider::Claude);

    let mut backend = CustomBackend::load(&store);
    backend.set_enabled(&store, true);
    backend.set_thinking_model(&store, "deepseek-r1:70b");

    let selected = registry.default_model(Provider::Claude);
    assert_eq!(backend.model_for(selected, false), "sonnet");
    assert_eq!(backend.model_for(selected, true), "deepseek-r1:70b");
    Ok(())
}

#[test]
fn test_disabled_backend_exports_nothing() -> Result<(), Box<dyn std::error::Error>> {
    let fixture = TestFixture::new()?;
    let store = fixture.store();
    store.set("ollama-enabled", "false")?;
    store.set("ollama-base-url", "http://elsewhere:1234")?;

    let backend = CustomBackend::load(&store);
    assert_eq!(backend.base_url, "http://elsewhere:1234");
    assert!(backend.env().is_empty());
    Ok(())
}

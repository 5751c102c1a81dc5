//! Registry behavior for every shipped provider

use crate::common::TestFixture;
use modeldeck::{ModelCatalog, ModelOption, Provider};
use pretty_assertions::assert_eq;
use rstest::rstest;

#[rstest]
#[case::claude(Provider::Claude)]
#[case::cursor(Provider::Cursor)]
#[case::codex(Provider::Codex)]
fn test_builtins_are_prefix(#[case] provider: Provider) -> Result<(), Box<dyn std::error::Error>> {
    let fixture = TestFixture::new()?;
    let mut registry = fixture.registry(provider);
    registry.add(provider, "zz-custom", Some("ZZ"));

    let builtins = ModelCatalog::builtin().builtins(provider).to_vec();
    let merged = registry.merge(provider);
    assert_eq!(merged[..builtins.len()], builtins[..]);
    assert_eq!(merged.last(), Some(&ModelOption::labeled("zz-custom", "ZZ")));
    Ok(())
}

#[rstest]
#[case::claude(Provider::Claude)]
#[case::cursor(Provider::Cursor)]
#[case::codex(Provider::Codex)]
fn test_trimmed_add_appears_once(
    #[case] provider: Provider,
) -> Result<(), Box<dyn std::error::Error>> {
    let fixture = TestFixture::new()?;
    let mut registry = fixture.registry(provider);

    registry.add(provider, "  foo  ", None);
    registry.add(provider, "foo", None);

    let foos: Vec<_> = registry
        .merge(provider)
        .into_iter()
        .filter(|m| m.value == "foo")
        .collect();
    assert_eq!(foos, vec![ModelOption::labeled("foo", "foo")]);
    Ok(())
}

#[rstest]
#[case::claude(Provider::Claude)]
#[case::cursor(Provider::Cursor)]
#[case::codex(Provider::Codex)]
fn test_add_remove_round_trip(#[case] provider: Provider) -> Result<(), Box<dyn std::error::Error>> {
    let fixture = TestFixture::new()?;
    let mut registry = fixture.registry(provider);
    let before = registry.merge(provider);

    registry.add(provider, "scratch", Some("Scratch"));
    assert!(registry.is_custom(provider, "scratch"));

    registry.remove(provider, "scratch");
    assert!(!registry.is_custom(provider, "scratch"));
    assert_eq!(registry.merge(provider), before);
    assert!(registry.load(provider).is_empty());
    Ok(())
}

#[rstest]
#[case::claude(Provider::Claude)]
#[case::cursor(Provider::Cursor)]
#[case::codex(Provider::Codex)]
fn test_blank_adds_are_noops(#[case] provider: Provider) -> Result<(), Box<dyn std::error::Error>> {
    let fixture = TestFixture::new()?;
    let mut registry = fixture.registry(provider);

    registry.add(provider, "", None);
    registry.add(provider, "   ", Some("Blank"));

    assert!(registry.custom_models().is_empty());
    assert!(!fixture.store_path().exists());
    Ok(())
}

#[test]
fn test_builtin_duplicate_is_noop() -> Result<(), Box<dyn std::error::Error>> {
    let fixture = TestFixture::new()?;
    let mut registry = fixture.registry(Provider::Codex);
    let before = registry.merge(Provider::Codex);

    registry.add(Provider::Codex, "gpt-5-codex", Some("Mine"));
    registry.add(Provider::Codex, " o3 ", None);

    assert_eq!(registry.merge(Provider::Codex), before);
    assert!(!registry.is_custom(Provider::Codex, "o3"));
    Ok(())
}

#[test]
fn test_customs_do_not_leak_across_providers() -> Result<(), Box<dyn std::error::Error>> {
    let fixture = TestFixture::new()?;
    let mut registry = fixture.registry(Provider::Claude);
    registry.add(Provider::Claude, "qwen3-coder", None);

    for provider in [Provider::Cursor, Provider::Codex] {
        assert!(
            !registry
                .merge(provider)
                .iter()
                .any(|m| m.value == "qwen3-coder"),
            "{provider} should not see claude customs"
        );
    }

    registry.switch_provider(Provider::Cursor);
    assert!(registry.custom_models().is_empty());
    registry.switch_provider(Provider::Claude);
    assert_eq!(
        registry.custom_models(),
        &[ModelOption::labeled("qwen3-coder", "qwen3-coder")]
    );
    Ok(())
}

#[test]
fn test_default_models() -> Result<(), Box<dyn std::error::Error>> {
    let fixture = TestFixture::new()?;
    let registry = fixture.registry(Provider::Claude);
    assert_eq!(registry.default_model(Provider::Claude), "sonnet");
    assert_eq!(registry.default_model(Provider::Cursor), "gpt-5");
    assert_eq!(registry.default_model(Provider::Codex), "gpt-5-codex");
    Ok(())
}

//! Built-in model tables per provider
//!
//! The catalog is static configuration: it supplies each provider's fixed,
//! ordered list of built-in models and the provider's default model. Custom
//! models never live here.

use crate::model::ModelOption;
use crate::provider::Provider;
use std::collections::BTreeMap;

/// Built-in models and default for a single provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogEntry {
    /// Built-in options in display order.
    pub options: Vec<ModelOption>,
    /// Identifier of the default model; one of `options`.
    pub default_model: String,
}

impl CatalogEntry {
    /// Build an entry from `(value, label)` pairs.
    #[must_use]
    pub fn from_pairs(pairs: &[(&str, &str)], default_model: &str) -> Self {
        Self {
            options: pairs
                .iter()
                .map(|(value, label)| ModelOption::labeled(*value, *label))
                .collect(),
            default_model: default_model.to_string(),
        }
    }

    /// Whether `value` is one of the built-in identifiers.
    #[must_use]
    pub fn contains(&self, value: &str) -> bool {
        self.options.iter().any(|m| m.value == value)
    }
}

/// Reasons a catalog table is rejected.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CatalogError {
    /// A provider has no entry.
    #[error("no built-in models configured for provider {0}")]
    MissingProvider(Provider),
    /// The default model is not among the provider's built-ins.
    #[error("default model '{default_model}' is not a built-in model of {provider}")]
    UnknownDefault {
        /// Provider whose entry is inconsistent.
        provider: Provider,
        /// The offending default identifier.
        default_model: String,
    },
}

/// Table lookup from provider to its built-in models.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelCatalog {
    entries: BTreeMap<Provider, CatalogEntry>,
}

const CLAUDE_MODELS: &[(&str, &str)] = &[
    ("sonnet", "Sonnet"),
    ("opus", "Opus"),
    ("haiku", "Haiku"),
    ("opusplan", "Opus Plan"),
];

const CURSOR_MODELS: &[(&str, &str)] = &[
    ("gpt-5", "GPT-5"),
    ("sonnet-4.5", "Claude Sonnet 4.5"),
    ("opus-4.1", "Claude Opus 4.1"),
    ("grok", "Grok"),
];

const CODEX_MODELS: &[(&str, &str)] = &[
    ("gpt-5-codex", "GPT-5 Codex"),
    ("gpt-5", "GPT-5"),
    ("o3", "o3"),
    ("o4-mini", "o4-mini"),
];

impl ModelCatalog {
    /// Build a catalog, checking that every provider is present and that each
    /// default is one of its built-ins.
    ///
    /// # Errors
    ///
    /// Returns a [`CatalogError`] if a provider is missing or its default
    /// model is not listed among its options.
    pub fn new(
        entries: impl IntoIterator<Item = (Provider, CatalogEntry)>,
    ) -> Result<Self, CatalogError> {
        let entries: BTreeMap<_, _> = entries.into_iter().collect();
        for &provider in Provider::ALL {
            let entry = entries
                .get(&provider)
                .ok_or(CatalogError::MissingProvider(provider))?;
            if !entry.contains(&entry.default_model) {
                return Err(CatalogError::UnknownDefault {
                    provider,
                    default_model: entry.default_model.clone(),
                });
            }
        }
        Ok(Self { entries })
    }

    /// The table shipped with modeldeck.
    #[must_use]
    pub fn builtin() -> Self {
        let entries = [
            (
                Provider::Claude,
                CatalogEntry::from_pairs(CLAUDE_MODELS, "sonnet"),
            ),
            (
                Provider::Cursor,
                CatalogEntry::from_pairs(CURSOR_MODELS, "gpt-5"),
            ),
            (
                Provider::Codex,
                CatalogEntry::from_pairs(CODEX_MODELS, "gpt-5-codex"),
            ),
        ];
        Self {
            entries: entries.into_iter().collect(),
        }
    }

    /// Entry for `provider`.
    #[must_use]
    pub fn entry(&self, provider: Provider) -> &CatalogEntry {
        // `new` and `builtin` both guarantee an entry for every provider.
        &self.entries[&provider]
    }

    /// Built-in options for `provider`, in display order.
    #[must_use]
    pub fn builtins(&self, provider: Provider) -> &[ModelOption] {
        &self.entry(provider).options
    }

    /// Default model identifier for `provider`.
    #[must_use]
    pub fn default_model(&self, provider: Provider) -> &str {
        &self.entry(provider).default_model
    }
}

impl Default for ModelCatalog {
    fn default() -> Self {
        Self::builtin()
    }
}

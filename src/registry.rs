//! Per-provider model registry
//!
//! Merges each provider's built-in models with the user's custom models and
//! mediates every change to the custom subset. Custom lists are persisted as
//! a JSON array of `{value, label}` under [`Provider::storage_key`].
//!
//! The registry keeps the *active* provider's custom list in memory. Queries
//! about another provider read straight from storage; mutations of another
//! provider switch to it first, which reloads its list. Every mutation is
//! written through to the store before returning, so a `load` right after an
//! `add` or `remove` observes it.

use crate::catalog::ModelCatalog;
use crate::model::ModelOption;
use crate::provider::Provider;
use crate::store::KeyValueStore;
use std::collections::HashSet;
use tracing::{debug, warn};

/// Built-ins in order, then the customs whose value is not already listed.
///
/// Values are unique in the result: a custom that repeats a built-in or an
/// earlier custom is skipped.
#[must_use]
pub fn merge_models(builtins: &[ModelOption], custom: &[ModelOption]) -> Vec<ModelOption> {
    let mut seen: HashSet<&str> = builtins.iter().map(|m| m.value.as_str()).collect();
    builtins
        .iter()
        .chain(custom.iter().filter(|m| seen.insert(m.value.as_str())))
        .cloned()
        .collect()
}

/// Read `provider`'s custom models from `store`.
///
/// A missing key or a payload that is not a JSON array of model entries
/// yields an empty list.
#[must_use]
pub fn load_custom_models<S: KeyValueStore + ?Sized>(
    store: &S,
    provider: Provider,
) -> Vec<ModelOption> {
    let key = provider.storage_key();
    let Some(raw) = store.get(key) else {
        return Vec::new();
    };
    if raw.trim().is_empty() {
        return Vec::new();
    }

    match serde_json::from_str::<Vec<ModelOption>>(&raw) {
        Ok(models) => {
            debug!(%provider, count = models.len(), "Loaded custom models");
            models
        }
        Err(e) => {
            warn!(%provider, key, "Ignoring malformed custom models: {}", e);
            Vec::new()
        }
    }
}

/// Models available for one provider at a time, backed by a key-value store.
#[derive(Debug)]
pub struct ModelRegistry<S> {
    store: S,
    catalog: ModelCatalog,
    active: Provider,
    custom: Vec<ModelOption>,
}

impl<S: KeyValueStore> ModelRegistry<S> {
    /// Create a registry with `provider` active, loading its custom models.
    #[must_use]
    pub fn new(store: S, catalog: ModelCatalog, provider: Provider) -> Self {
        let custom = load_custom_models(&store, provider);
        Self {
            store,
            catalog,
            active: provider,
            custom,
        }
    }

    /// The provider whose custom list is held in memory.
    #[must_use]
    pub const fn provider(&self) -> Provider {
        self.active
    }

    /// Make `provider` active, reloading its custom list from storage.
    ///
    /// Reloads even when `provider` is already active, picking up external
    /// changes to storage.
    pub fn switch_provider(&mut self, provider: Provider) {
        self.active = provider;
        self.custom = load_custom_models(&self.store, provider);
    }

    /// Custom models of the active provider, in insertion order.
    #[must_use]
    pub fn custom_models(&self) -> &[ModelOption] {
        &self.custom
    }

    /// The built-in table in use.
    #[must_use]
    pub const fn catalog(&self) -> &ModelCatalog {
        &self.catalog
    }

    /// The backing store.
    #[must_use]
    pub const fn store(&self) -> &S {
        &self.store
    }

    /// Read `provider`'s custom models from storage.
    #[must_use]
    pub fn load(&self, provider: Provider) -> Vec<ModelOption> {
        load_custom_models(&self.store, provider)
    }

    /// Built-ins of `provider` followed by its non-colliding custom models.
    #[must_use]
    pub fn merge(&self, provider: Provider) -> Vec<ModelOption> {
        let builtins = self.catalog.builtins(provider);
        if provider == self.active {
            merge_models(builtins, &self.custom)
        } else {
            merge_models(builtins, &self.load(provider))
        }
    }

    /// Add a custom model to `provider`.
    ///
    /// `value` and `label` are trimmed; a blank label falls back to the
    /// value. Blank values and values already in the merged list are ignored.
    pub fn add(&mut self, provider: Provider, value: &str, label: Option<&str>) {
        let value = value.trim();
        if value.is_empty() {
            return;
        }
        self.activate(provider);

        let exists = self.catalog.entry(provider).contains(value)
            || self.custom.iter().any(|m| m.value == value);
        if exists {
            debug!(%provider, value, "Model already listed, not adding");
            return;
        }

        let label = label.map(str::trim).filter(|l| !l.is_empty());
        self.custom.push(ModelOption::new(value, label));
        self.persist();
    }

    /// Remove the custom model `value` from `provider`.
    ///
    /// Built-ins are never in the custom list, so removing one does nothing.
    pub fn remove(&mut self, provider: Provider, value: &str) {
        self.activate(provider);

        let before = self.custom.len();
        self.custom.retain(|m| m.value != value);
        if self.custom.len() == before {
            return;
        }
        self.persist();
    }

    /// Whether `value` is one of `provider`'s custom models, even if a
    /// built-in of the same value hides it from the merged list.
    #[must_use]
    pub fn is_custom(&self, provider: Provider, value: &str) -> bool {
        if provider == self.active {
            self.custom.iter().any(|m| m.value == value)
        } else {
            self.load(provider).iter().any(|m| m.value == value)
        }
    }

    /// The fixed default model identifier of `provider`.
    #[must_use]
    pub fn default_model(&self, provider: Provider) -> &str {
        self.catalog.default_model(provider)
    }

    fn activate(&mut self, provider: Provider) {
        if provider != self.active {
            self.switch_provider(provider);
        }
    }

    /// Write the active custom list through to storage. Failures are logged
    /// and dropped; the in-memory list keeps the change.
    fn persist(&self) {
        let key = self.active.storage_key();
        let payload = match serde_json::to_string(&self.custom) {
            Ok(payload) => payload,
            Err(e) => {
                warn!(provider = %self.active, "Failed to encode custom models: {}", e);
                return;
            }
        };

        match self.store.set(key, &payload) {
            Ok(()) => debug!(
                provider = %self.active,
                count = self.custom.len(),
                "Saved custom models"
            ),
            Err(e) => warn!(provider = %self.active, key, "Failed to save custom models: {}", e),
        }
    }
}

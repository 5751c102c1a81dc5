//! Custom backend settings
//!
//! Lets Claude requests go through a local Ollama instance or any
//! OpenAI-compatible endpoint. The settings live next to the custom model
//! lists in the same key-value store, one key per field, and are written
//! through on every change.

use crate::provider::Provider;
use crate::store::KeyValueStore;
use tracing::{debug, warn};

/// Store key for the on/off switch (`"true"` / `"false"`).
pub const ENABLED_KEY: &str = "ollama-enabled";
/// Store key for the endpoint base URL.
pub const BASE_URL_KEY: &str = "ollama-base-url";
/// Store key for the auth token.
pub const AUTH_TOKEN_KEY: &str = "ollama-auth-token";
/// Store key for the thinking-mode model override.
pub const THINKING_MODEL_KEY: &str = "ollama-thinking-model";

/// Base URL used until the user sets one.
pub const DEFAULT_BASE_URL: &str = "http://localhost:11434";
/// Token used until the user sets one; what a local Ollama expects.
pub const DEFAULT_AUTH_TOKEN: &str = "ollama";

/// Environment variable carrying the endpoint base URL.
pub const BASE_URL_ENV: &str = "ANTHROPIC_BASE_URL";
/// Environment variable carrying the auth token.
pub const AUTH_TOKEN_ENV: &str = "ANTHROPIC_AUTH_TOKEN";

/// Routing settings for a custom Claude backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CustomBackend {
    /// Whether requests are routed to the custom backend.
    pub enabled: bool,
    /// Endpoint base URL.
    pub base_url: String,
    /// Auth token sent to the endpoint.
    pub auth_token: String,
    /// Model to use while thinking mode is active; empty for none.
    pub thinking_model: String,
}

impl Default for CustomBackend {
    fn default() -> Self {
        Self {
            enabled: false,
            base_url: DEFAULT_BASE_URL.to_string(),
            auth_token: DEFAULT_AUTH_TOKEN.to_string(),
            thinking_model: String::new(),
        }
    }
}

impl CustomBackend {
    /// Read the settings from `store`, using defaults for absent or empty
    /// values.
    #[must_use]
    pub fn load<S: KeyValueStore + ?Sized>(store: &S) -> Self {
        let defaults = Self::default();
        let non_empty = |key: &str| store.get(key).filter(|v| !v.is_empty());

        let settings = Self {
            enabled: store.get(ENABLED_KEY).as_deref() == Some("true"),
            base_url: non_empty(BASE_URL_KEY).unwrap_or(defaults.base_url),
            auth_token: non_empty(AUTH_TOKEN_KEY).unwrap_or(defaults.auth_token),
            thinking_model: store.get(THINKING_MODEL_KEY).unwrap_or_default(),
        };
        debug!(enabled = settings.enabled, "Loaded custom backend settings");
        settings
    }

    /// Only Claude can be routed through a custom backend.
    #[must_use]
    pub const fn applies_to(provider: Provider) -> bool {
        matches!(provider, Provider::Claude)
    }

    /// Turn routing on or off and persist.
    pub fn set_enabled<S: KeyValueStore + ?Sized>(&mut self, store: &S, enabled: bool) {
        self.enabled = enabled;
        write_through(store, ENABLED_KEY, if enabled { "true" } else { "false" });
    }

    /// Change the base URL and persist.
    pub fn set_base_url<S: KeyValueStore + ?Sized>(&mut self, store: &S, base_url: &str) {
        self.base_url = base_url.to_string();
        write_through(store, BASE_URL_KEY, base_url);
    }

    /// Change the auth token and persist.
    pub fn set_auth_token<S: KeyValueStore + ?Sized>(&mut self, store: &S, auth_token: &str) {
        self.auth_token = auth_token.to_string();
        write_through(store, AUTH_TOKEN_KEY, auth_token);
    }

    /// Change the thinking-mode model override and persist. Empty clears it
    /// and deletes the stored key.
    pub fn set_thinking_model<S: KeyValueStore + ?Sized>(&mut self, store: &S, model: &str) {
        self.thinking_model = model.to_string();
        if model.is_empty() {
            if let Err(e) = store.remove(THINKING_MODEL_KEY) {
                warn!(key = THINKING_MODEL_KEY, "Failed to clear backend setting: {}", e);
            }
        } else {
            write_through(store, THINKING_MODEL_KEY, model);
        }
    }

    /// Environment variables to set on the spawned agent. Empty while
    /// routing is disabled.
    #[must_use]
    pub fn env(&self) -> Vec<(&'static str, String)> {
        if !self.enabled {
            return Vec::new();
        }
        vec![
            (BASE_URL_ENV, self.base_url.clone()),
            (AUTH_TOKEN_ENV, self.auth_token.clone()),
        ]
    }

    /// Model to request: the thinking override when routing is enabled,
    /// thinking is active and an override is set; otherwise `selected`.
    #[must_use]
    pub fn model_for<'a>(&'a self, selected: &'a str, thinking: bool) -> &'a str {
        let model = self.thinking_model.trim();
        if self.enabled && thinking && !model.is_empty() {
            model
        } else {
            selected
        }
    }
}

fn write_through<S: KeyValueStore + ?Sized>(store: &S, key: &str, value: &str) {
    if let Err(e) = store.set(key, value) {
        warn!(key, "Failed to save backend setting: {}", e);
    }
}

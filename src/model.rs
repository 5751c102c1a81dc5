//! Selectable model entries

use serde::{Deserialize, Deserializer, Serialize};

/// A model a provider can run, as shown in pickers.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct ModelOption {
    /// Provider-specific model identifier (opaque).
    pub value: String,
    /// Display name; equal to `value` when none was given.
    pub label: String,
}

impl ModelOption {
    /// Create an option, falling back to `value` when `label` is absent.
    #[must_use]
    pub fn new(value: impl Into<String>, label: Option<&str>) -> Self {
        let value = value.into();
        let label = label.map_or_else(|| value.clone(), str::to_string);
        Self { value, label }
    }

    /// Create an option with an explicit display name.
    #[must_use]
    pub fn labeled(value: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            label: label.into(),
        }
    }

    /// Whether the display name differs from the raw identifier.
    #[must_use]
    pub fn has_distinct_label(&self) -> bool {
        self.label != self.value
    }
}

// Stored entries written by hand or by older builds may lack `label`.
#[derive(Deserialize)]
struct RawModelOption {
    value: String,
    #[serde(default)]
    label: Option<String>,
}

impl<'de> Deserialize<'de> for ModelOption {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = RawModelOption::deserialize(deserializer)?;
        Ok(Self::new(raw.value, raw.label.as_deref()))
    }
}

//! Manage-models state: listing, adding and removing a provider's models

use crate::model::ModelOption;
use crate::registry::ModelRegistry;
use crate::store::KeyValueStore;

/// One line of the manage-models list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelRow {
    /// The merged-list entry.
    pub option: ModelOption,
    /// Custom entries get a remove button; built-ins are marked as such.
    pub removable: bool,
    /// Show the raw identifier under the label.
    pub show_value: bool,
}

impl ModelRow {
    /// Tag shown in place of the remove button.
    #[must_use]
    pub const fn badge(&self) -> &'static str {
        if self.removable { "custom" } else { "built-in" }
    }
}

/// State for the manage-models popover
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ManageModelsState {
    /// Whether the popover is showing
    pub open: bool,

    /// Pending model identifier (required)
    pub new_id: String,

    /// Pending display name (optional)
    pub new_label: String,
}

impl ManageModelsState {
    /// Create a closed popover with empty inputs
    #[must_use]
    pub const fn new() -> Self {
        Self {
            open: false,
            new_id: String::new(),
            new_label: String::new(),
        }
    }

    /// Open or close the popover
    pub const fn toggle(&mut self) {
        self.open = !self.open;
    }

    /// Close the popover (e.g. on a click outside it). Pending input is kept.
    pub const fn close(&mut self) {
        self.open = false;
    }

    /// Whether the add button is enabled
    #[must_use]
    pub fn can_add(&self) -> bool {
        !self.new_id.trim().is_empty()
    }

    /// Rows for the active provider's merged model list
    #[must_use]
    pub fn rows<S: KeyValueStore>(registry: &ModelRegistry<S>) -> Vec<ModelRow> {
        let provider = registry.provider();
        registry
            .merge(provider)
            .into_iter()
            .map(|option| ModelRow {
                removable: registry.is_custom(provider, &option.value),
                show_value: option.has_distinct_label(),
                option,
            })
            .collect()
    }

    /// Add the pending model to the active provider and clear the inputs.
    ///
    /// Does nothing while the identifier is blank. Inputs are cleared even
    /// when the registry drops the entry as a duplicate.
    pub fn submit<S: KeyValueStore>(&mut self, registry: &mut ModelRegistry<S>) {
        if !self.can_add() {
            return;
        }

        let label = self.new_label.trim();
        let label = (!label.is_empty()).then_some(label);
        registry.add(registry.provider(), &self.new_id, label);

        self.new_id.clear();
        self.new_label.clear();
    }

    /// Remove a custom model from the active provider
    pub fn remove<S: KeyValueStore>(registry: &mut ModelRegistry<S>, value: &str) {
        registry.remove(registry.provider(), value);
    }

    /// Clear all popover state
    pub fn clear(&mut self) {
        self.open = false;
        self.new_id.clear();
        self.new_label.clear();
    }
}

// Input configuration and remapping

use super::action::{default_bindings, Action, Binding};
use std::collections::HashMap;

/// Maps bindings (keys/buttons) to game actions
#[derive(Debug, Clone, Default)]
pub struct InputConfig {
    bindings: HashMap<Binding, Action>,

    /// Reverse mapping for quick lookups (action -> all bindings)
    action_to_bindings: HashMap<Action, Vec<Binding>>,
}

impl InputConfig {
    /// Create an empty configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a configuration with the default bindings
    pub fn with_defaults() -> Self {
        Self::from_bindings(default_bindings())
    }

    /// Create a configuration from a list of bindings
    pub fn from_bindings(bindings: Vec<(Binding, Action)>) -> Self {
        let mut config = Self::new();
        for (binding, action) in bindings {
            config.bind(binding, action);
        }
        config
    }

    /// Bind an input to an action, replacing whatever it was bound to
    pub fn bind(&mut self, binding: Binding, action: Action) {
        self.unbind(binding);
        self.bindings.insert(binding, action);
        self.action_to_bindings
            .entry(action)
            .or_default()
            .push(binding);
    }

    /// Remove a binding
    pub fn unbind(&mut self, binding: Binding) {
        if let Some(action) = self.bindings.remove(&binding) {
            if let Some(list) = self.action_to_bindings.get_mut(&action) {
                list.retain(|b| *b != binding);
                if list.is_empty() {
                    self.action_to_bindings.remove(&action);
                }
            }
        }
    }

    /// Get the action bound to an input
    pub fn get_action(&self, binding: Binding) -> Option<Action> {
        self.bindings.get(&binding).copied()
    }

    /// Get all inputs bound to an action
    pub fn get_bindings(&self, action: Action) -> Vec<Binding> {
        self.action_to_bindings
            .get(&action)
            .cloned()
            .unwrap_or_default()
    }

    /// Check if an action has any bindings
    pub fn has_binding(&self, action: Action) -> bool {
        self.action_to_bindings.contains_key(&action)
    }

    /// Reset to default bindings
    pub fn reset_to_defaults(&mut self) {
        *self = Self::with_defaults();
    }
}

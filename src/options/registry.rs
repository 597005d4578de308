use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use super::set::Options;

// ============================================================================
// Per-Recipe Override Registry
// ============================================================================
//
// Operator-supplied overrides keyed by recipe name, e.g. everything under
// "mongrel" applies to every mongrel recipe instance. The registry is
// populated before any recipe is created and read-only thereafter; it is
// passed into the resolver explicitly rather than living in ambient global
// state.
//
// ============================================================================

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OverrideRegistry {
    by_recipe: HashMap<String, Options>,
}

impl OverrideRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register the override set for one recipe name. Registering the same
    /// name twice deep-merges the new set over the existing one.
    pub fn register(&mut self, recipe_name: impl Into<String>, overrides: Options) {
        let name = recipe_name.into();
        let merged = match self.by_recipe.remove(&name) {
            Some(existing) => existing.merged(overrides),
            None => overrides,
        };
        self.by_recipe.insert(name, merged);
    }

    /// The override layer for a recipe name; empty when none was registered.
    pub fn overrides_for(&self, recipe_name: &str) -> Options {
        self.by_recipe.get(recipe_name).cloned().unwrap_or_default()
    }

    pub fn is_empty(&self) -> bool {
        self.by_recipe.is_empty()
    }
}

use std::sync::Arc;

use crate::errors::RecipeError;
use crate::options::{resolve, Options, OverrideRegistry};
use crate::supervisor::Supervisor;
use crate::watch::{build_watch, WatchSpec};

use super::identity::{derive_handle, recipe_name};
use super::kind::RecipeKind;
use super::layout::FileLayout;

// ============================================================================
// Recipe Construction
// ============================================================================
//
// The one-shot pipeline from layered option sources to a submitted watch
// definition: resolve options, derive identity, plan and provision paths,
// build the spec and policies, submit. Every failure aborts construction
// and propagates to the caller; nothing is retried.
//
// ============================================================================

/// Owns the override registry and the supervisor boundary. Populate the
/// registry before creating any recipe; it is read-only afterwards.
pub struct Godhead<S> {
    registry: OverrideRegistry,
    supervisor: S,
}

impl<S: Supervisor> Godhead<S> {
    pub fn new(registry: OverrideRegistry, supervisor: S) -> Self {
        Self {
            registry,
            supervisor,
        }
    }

    pub fn supervisor(&self) -> &S {
        &self.supervisor
    }

    /// Build and submit one recipe instance of kind `K`.
    pub fn create<K: RecipeKind>(&self, overrides: Options) -> Result<Recipe, RecipeError> {
        let name = recipe_name(K::type_ident());
        let options = resolve(K::defaults(), self.registry.overrides_for(&name), overrides);
        let handle = derive_handle(&name, &options)?;
        tracing::debug!(recipe = %name, handle = %handle, "Resolved recipe options");

        let layout = FileLayout::plan(&options, &handle)?;
        layout.ensure_directories()?;

        let watch = build_watch(&options, &name, &handle, &layout)?;
        self.supervisor.submit(&watch)?;
        tracing::info!(
            recipe = %name,
            handle = %handle,
            group = %watch.group,
            "Watch definition submitted"
        );

        Ok(Recipe {
            name,
            handle,
            options,
            watch,
        })
    }
}

/// Read-only introspection over one constructed recipe. Holds no runtime
/// state; the supervisor owns the process from here on.
#[derive(Debug, Clone)]
pub struct Recipe {
    name: Arc<str>,
    handle: String,
    options: Options,
    watch: WatchSpec,
}

impl Recipe {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn handle(&self) -> &str {
        &self.handle
    }

    pub fn options(&self) -> &Options {
        &self.options
    }

    pub fn start_command(&self) -> &str {
        &self.watch.start
    }

    pub fn stop_command(&self) -> Option<&str> {
        self.watch.stop.as_deref()
    }

    pub fn restart_command(&self) -> Option<&str> {
        self.watch.restart.as_deref()
    }

    /// The full definition as submitted to the supervisor.
    pub fn watch(&self) -> &WatchSpec {
        &self.watch
    }
}

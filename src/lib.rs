//! Declarative process-supervision recipes for the god supervisor family.
//!
//! A recipe resolves layered option sources into one final option set,
//! derives the instance's identity and filesystem paths, and emits a
//! declarative watch definition for an external supervisor to execute:
//! start detection, resource-threshold restart rules, and a flapping
//! escalation rule with retry parameters. This crate never monitors or
//! controls a running process; it only builds the configuration.

pub mod errors;
pub mod options;
pub mod recipe;
pub mod supervisor;
pub mod watch;

pub use errors::RecipeError;
pub use options::{options_from_files, Options, OverrideRegistry};
pub use recipe::{GodRecipe, Godhead, Recipe, RecipeKind};
pub use supervisor::{LoggingSupervisor, RecordingSupervisor, Supervisor};
pub use watch::{FlappingPolicy, RestartPolicy, StartPolicy, WatchSpec};

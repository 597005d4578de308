// ============================================================================
// Options Layer - Resolution of Layered Recipe Configuration
// ============================================================================
//
// Everything about option sets lives here:
// - the deep-merge algorithm over JSON mappings
// - the Options newtype with typed accessors for recognized keys
// - three-layer resolution (kind defaults, per-name overrides, instance)
// - layered option-document loading from files
// - the explicit per-recipe override registry
//
// ============================================================================

pub mod merge;
pub mod registry;
pub mod resolver;
pub mod set;

pub use merge::{deep_merge, deep_merge_maps};
pub use registry::OverrideRegistry;
pub use resolver::{options_from_files, resolve};
pub use set::{base_defaults, Options, PidFileSetting};

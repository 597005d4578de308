// ============================================================================
// Recipe Layer - Identity, Layout, Kinds, Construction
// ============================================================================
//
// Everything that turns a recipe kind plus resolved options into a
// submitted watch definition:
// - name/handle derivation with the per-type name cache
// - log/pid path planning and directory provisioning
// - the RecipeKind defaults chain
// - the Godhead construction pipeline and the Recipe handle
//
// ============================================================================

pub mod identity;
pub mod kind;
pub mod layout;
pub mod recipe;

pub use identity::{derive_handle, derive_recipe_name, pluralize, recipe_name};
pub use kind::{GodRecipe, RecipeKind};
pub use layout::FileLayout;
pub use recipe::{Godhead, Recipe};

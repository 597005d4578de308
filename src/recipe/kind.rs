use crate::options::{base_defaults, Options};

// ============================================================================
// Recipe Kinds
// ============================================================================
//
// A kind describes one managed process type. Defaults accumulate along an
// explicit call chain: a derived kind's `defaults()` calls its parent
// kind's `defaults()` and merges its own table on top, so the resolved
// table for any kind equals the deep-merge fold of every level's own
// declarations in base-to-derived order.
//
// ============================================================================

pub trait RecipeKind: 'static {
    /// Simple type identifier the recipe name derives from, e.g.
    /// "MongrelRecipe" names the "mongrel" recipe.
    fn type_ident() -> &'static str;

    /// Fully accumulated default options for this kind, most specific
    /// declarations winning.
    fn defaults() -> Options;
}

/// The base kind every defaults chain bottoms out in.
pub struct GodRecipe;

impl RecipeKind for GodRecipe {
    fn type_ident() -> &'static str {
        "GodRecipe"
    }

    fn defaults() -> Options {
        base_defaults()
    }
}

use std::path::Path;

use serde_json::Value;

use super::set::Options;
use crate::errors::RecipeError;

// ============================================================================
// Layered Option Resolution
// ============================================================================
//
// A recipe's final option set is the deep-merge fold of three layers, later
// layers winning on conflicts:
//
//   1. the recipe kind's accumulated defaults (base kind upward through the
//      kind chain, most specific last)
//   2. the per-recipe-name override registered before any recipe is created
//   3. the overrides supplied for this one instance
//
// Resolution is pure: identical layers always produce an identical set.
//
// ============================================================================

/// Fold the three option layers into the final set for one recipe instance.
pub fn resolve(hierarchy_defaults: Options, global_for_type: Options, instance: Options) -> Options {
    hierarchy_defaults.merged(global_for_type).merged(instance)
}

/// Load a series of JSON option documents, later files winning over earlier
/// ones via deep merge.
///
/// Any unreadable, unparsable, or non-mapping document fails the whole load;
/// nothing is partially applied.
pub fn options_from_files<P>(paths: impl IntoIterator<Item = P>) -> Result<Options, RecipeError>
where
    P: AsRef<Path>,
{
    let mut options = Options::new();
    for path in paths {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|source| RecipeError::ReadOptions {
            path: path.to_path_buf(),
            source,
        })?;
        let document: Value =
            serde_json::from_str(&raw).map_err(|source| RecipeError::ParseOptions {
                path: path.to_path_buf(),
                source,
            })?;
        let Value::Object(map) = document else {
            return Err(RecipeError::NotAMapping {
                path: path.to_path_buf(),
            });
        };
        tracing::debug!(path = %path.display(), keys = map.len(), "Merging options document");
        options = options.merged(Options::from_map(map));
    }
    Ok(options)
}

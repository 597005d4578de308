use std::collections::HashMap;
use std::sync::{Arc, OnceLock, PoisonError, RwLock};

use crate::errors::RecipeError;
use crate::options::Options;

// ============================================================================
// Recipe Identity
// ============================================================================
//
// A recipe's name is a pure function of its kind's simple type identifier:
// strip namespace qualifiers, convert to snake_case, drop a trailing
// `_recipe` token. "MongrelRecipe" names the "mongrel" recipe.
//
// Names are cached per identifier for the life of the process. The cached
// value is a pure function of the key, so concurrent first derivations are
// benign: every writer computes and stores the same thing.
//
// ============================================================================

static NAME_CACHE: OnceLock<RwLock<HashMap<&'static str, Arc<str>>>> = OnceLock::new();

/// The canonical recipe name for a type identifier, cached per identifier.
pub fn recipe_name(type_ident: &'static str) -> Arc<str> {
    let cache = NAME_CACHE.get_or_init(|| RwLock::new(HashMap::new()));
    if let Some(name) = cache
        .read()
        .unwrap_or_else(PoisonError::into_inner)
        .get(type_ident)
    {
        return Arc::clone(name);
    }

    let derived: Arc<str> = derive_recipe_name(type_ident).into();
    let mut cache = cache.write().unwrap_or_else(PoisonError::into_inner);
    Arc::clone(cache.entry(type_ident).or_insert(derived))
}

/// Uncached name derivation. Idempotent: same input, same output.
pub fn derive_recipe_name(type_ident: &str) -> String {
    let simple = type_ident.rsplit("::").next().unwrap_or(type_ident);
    let simple = simple.rsplit('/').next().unwrap_or(simple);
    let snake = underscore(simple);
    match snake.strip_suffix("_recipe") {
        Some(stripped) => stripped.to_string(),
        None => snake,
    }
}

/// The unique label for one recipe instance: `{name}_{port}` when a port is
/// set, just the name otherwise.
pub fn derive_handle(name: &str, options: &Options) -> Result<String, RecipeError> {
    Ok(match options.port()? {
        Some(port) => format!("{name}_{port}"),
        None => name.to_string(),
    })
}

/// Default monitor group: the pluralized recipe name.
pub fn pluralize(name: &str) -> String {
    if name.ends_with('s') || name.ends_with('x') || name.ends_with('z')
        || name.ends_with("ch") || name.ends_with("sh")
    {
        format!("{name}es")
    } else if name.ends_with('y')
        && !matches!(name.chars().rev().nth(1), Some('a' | 'e' | 'i' | 'o' | 'u'))
    {
        format!("{}ies", &name[..name.len() - 1])
    } else {
        format!("{name}s")
    }
}

/// CamelCase to snake_case. Runs of capitals stay together until the run
/// ends: "HTTPServerRecipe" becomes "http_server_recipe".
fn underscore(ident: &str) -> String {
    let chars: Vec<char> = ident.chars().collect();
    let mut out = String::with_capacity(ident.len() + 4);
    for (i, &c) in chars.iter().enumerate() {
        if c.is_uppercase() {
            let after_lower =
                i > 0 && (chars[i - 1].is_lowercase() || chars[i - 1].is_ascii_digit());
            let run_ends = i > 0
                && chars[i - 1].is_uppercase()
                && chars.get(i + 1).is_some_and(|next| next.is_lowercase());
            if after_lower || run_ends {
                out.push('_');
            }
            out.extend(c.to_lowercase());
        } else if c == '-' || c == ' ' {
            out.push('_');
        } else {
            out.push(c);
        }
    }
    out
}

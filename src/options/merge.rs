use serde_json::{Map, Value};

// ============================================================================
// Deep Merge
// ============================================================================
//
// Recursive union of two JSON mappings. When both sides of a key hold
// mappings the merge recurses; any other pairing is replaced wholesale by
// the overlay value. Distinct keys from both sides survive.
//
// ============================================================================

/// Merge `overlay` into `base`, returning the combined value.
///
/// Overlay wins on scalar conflicts. Nested mappings combine key-wise.
pub fn deep_merge(base: Value, overlay: Value) -> Value {
    match (base, overlay) {
        (Value::Object(base), Value::Object(overlay)) => {
            Value::Object(deep_merge_maps(base, overlay))
        }
        (_, overlay) => overlay,
    }
}

/// Merge two JSON objects key-wise, recursing into shared mapping values.
pub fn deep_merge_maps(
    mut base: Map<String, Value>,
    overlay: Map<String, Value>,
) -> Map<String, Value> {
    for (key, overlay_value) in overlay {
        match base.remove(&key) {
            Some(base_value) => {
                base.insert(key, deep_merge(base_value, overlay_value));
            }
            None => {
                base.insert(key, overlay_value);
            }
        }
    }
    base
}

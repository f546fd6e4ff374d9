//! Structural merge of override documents onto defaults.

use serde_json::{Map, Value};

/// Merge `overlay` onto `base`, returning a new value.
///
/// Where both sides hold a mapping the keys are merged recursively; in every other case the
/// overlay value replaces the base value wholesale (scalars and sequences included).
pub fn deep_merge(base: &Value, overlay: &Value) -> Value {
    match (base, overlay) {
        (Value::Object(base_map), Value::Object(overlay_map)) => {
            Value::Object(merge_maps(base_map, overlay_map))
        }
        (_, overlay) => overlay.clone(),
    }
}

/// Mapping-level form of [`deep_merge`].
pub fn merge_maps(base: &Map<String, Value>, overlay: &Map<String, Value>) -> Map<String, Value> {
    let mut merged = base.clone();
    for (key, value) in overlay {
        let next = match merged.get(key) {
            Some(existing) => deep_merge(existing, value),
            None => value.clone(),
        };
        merged.insert(key.clone(), next);
    }
    merged
}

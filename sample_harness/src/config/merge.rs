//! Structural deep merge over JSON configuration values.

use serde_json::Value;
use serde_json::map::Entry;

/// Returns `base` with `overlay` merged on top, leaving both inputs untouched.
///
/// Objects present on both sides merge key by key; every other value in
/// `overlay` replaces the corresponding value in `base`.
///
/// # Examples
///
/// ```rust
/// use sample_harness::config::merge;
/// use serde_json::json;
///
/// let base = json!({"doc": {"enabled": true, "output_dir": "docs"}});
/// let merged = merge(&base, &json!({"doc": {"output_dir": "out"}}));
/// assert_eq!(merged, json!({"doc": {"enabled": true, "output_dir": "out"}}));
/// assert_eq!(base["doc"]["output_dir"], "docs");
/// ```
#[must_use]
pub fn merge(base: &Value, overlay: &Value) -> Value {
    let mut merged = base.clone();
    merge_value(&mut merged, overlay.clone());
    merged
}

/// Overlays `layer` onto `target`, updating `target` in place.
///
/// An object layer over an object target merges key by key, recursing into
/// keys present on both sides. Any other layer replaces the target, and an
/// object layer over a non-object target replaces it too.
///
/// # Examples
///
/// ```rust
/// use sample_harness::config::merge_value;
/// use serde_json::json;
///
/// let mut acc = json!({"test": {"enabled": false}, "log_level": "warn"});
/// merge_value(&mut acc, json!({"test": {"enabled": true}}));
/// assert_eq!(acc, json!({"test": {"enabled": true}, "log_level": "warn"}));
/// ```
pub fn merge_value(target: &mut Value, layer: Value) {
    match (target, layer) {
        (Value::Object(fields), Value::Object(entries)) => {
            for (key, value) in entries {
                match fields.entry(key) {
                    Entry::Occupied(mut slot) => merge_value(slot.get_mut(), value),
                    Entry::Vacant(slot) => {
                        slot.insert(value);
                    }
                }
            }
        }
        (slot, replacement) => *slot = replacement,
    }
}

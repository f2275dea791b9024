//! Loose JSON helpers for model-generated payloads
//!
//! Model output is only loosely typed, so presence checks follow "truthy"
//! semantics: `null`, `false`, `0`, and `""` count as absent, while every array
//! and object (even empty) counts as present.

use serde_json::Value;

/// Whether a value counts as present
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0 && !f.is_nan()),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// Look up a key and return it only if truthy
pub fn truthy_field<'a>(value: &'a Value, key: &str) -> Option<&'a Value> {
    value.get(key).filter(|v| is_truthy(v))
}

/// Resolve a dotted path such as `actionable_recommendations.pivot_options`
pub fn get_path<'a>(value: &'a Value, path: &str) -> Option<&'a Value> {
    path.split('.').try_fold(value, |current, key| current.get(key))
}

/// Set a dotted path, creating intermediate objects where the slot is falsy.
///
/// Returns false when an intermediate slot holds a truthy non-object, in which
/// case nothing is written.
pub fn set_path(value: &mut Value, path: &str, new_value: Value) -> bool {
    let mut keys: Vec<&str> = path.split('.').collect();
    let Some(last) = keys.pop() else {
        return false;
    };

    let mut current = value;
    for key in keys {
        let Some(map) = current.as_object_mut() else {
            return false;
        };
        let slot = map
            .entry(key.to_string())
            .or_insert_with(|| Value::Object(Default::default()));
        if !is_truthy(slot) {
            *slot = Value::Object(Default::default());
        }
        current = slot;
    }

    match current.as_object_mut() {
        Some(map) => {
            map.insert(last.to_string(), new_value);
            true
        }
        None => false,
    }
}

/// Interpret a number or a numeric string as f64
pub fn as_number_like(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }
}

/// Number of direct children of an object or array; scalars have none
pub fn child_count(value: &Value) -> usize {
    match value {
        Value::Object(map) => map.len(),
        Value::Array(items) => items.len(),
        _ => 0,
    }
}

/// Length in characters of the compact serialization
pub fn serialized_len(value: &Value) -> usize {
    serde_json::to_string(value)
        .map(|s| s.chars().count())
        .unwrap_or(0)
}

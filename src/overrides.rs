//! Dotted-key writes into an existing mapping.
//!
//! Segments address the same places that `get`, `list`, and the env layer
//! name: mapping keys by name, sequence elements by index. So `peers.1`
//! replaces the second element of `peers` and leaves the rest of the sequence
//! alone.

use serde_json::Value;

use crate::ConfigMap;
use crate::error::ConfigError;

/// Store `value` at `dotted_key` inside `map`.
///
/// Missing mapping keys are created, and a scalar met on the way is replaced
/// by a mapping. A segment that lands on a sequence must be an existing index;
/// anything else is rejected so a sequence never turns into a mapping.
pub fn set_dotted(map: &mut ConfigMap, dotted_key: &str, value: Value) -> Result<(), ConfigError> {
    let segments: Vec<&str> = dotted_key.split('.').collect();
    if segments.iter().any(|s| s.is_empty()) {
        return Err(invalid(dotted_key, "key must be a non-empty dotted path".into()));
    }

    let mut root = Value::Object(std::mem::take(map));
    let result = set_in(&mut root, &segments, value, dotted_key);
    if let Value::Object(restored) = root {
        *map = restored;
    }
    result
}

fn set_in(current: &mut Value, segments: &[&str], value: Value, key: &str) -> Result<(), ConfigError> {
    let Some((head, rest)) = segments.split_first() else {
        *current = value;
        return Ok(());
    };

    match current {
        Value::Object(children) => {
            let child = children.entry(*head).or_insert(Value::Null);
            set_in(child, rest, value, key)
        }
        Value::Array(items) => {
            let len = items.len();
            let slot = head
                .parse::<usize>()
                .ok()
                .and_then(|index| items.get_mut(index))
                .ok_or_else(|| {
                    invalid(key, format!("`{head}` is not an index of a {len}-element sequence"))
                })?;
            set_in(slot, rest, value, key)
        }
        other => {
            *other = Value::Object(ConfigMap::new());
            set_in(other, segments, value, key)
        }
    }
}

fn invalid(key: &str, reason: String) -> ConfigError {
    ConfigError::InvalidValue {
        key: key.into(),
        reason,
    }
}

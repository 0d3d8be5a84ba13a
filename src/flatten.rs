//! Walk a configuration mapping down to its leaves, recording the key path of
//! each one.
//!
//! A leaf is any value that is not a mapping or a sequence. Mappings contribute
//! their keys as path segments; sequences contribute the element index. Empty
//! mappings and sequences have no leaves.
//!
//! The same path renders two ways:
//!
//! | Form | Example | Used for |
//! |------|---------|----------|
//! | dotted | `database.url` | `get`, `list`, diagnostics |
//! | env key | `database_url` | environment override lookup |

use serde_json::Value;

use crate::ConfigMap;

/// A leaf value and the key path that reaches it.
#[derive(Debug, Clone, PartialEq)]
pub struct Leaf<'a> {
    pub path: Vec<String>,
    pub value: &'a Value,
}

impl Leaf<'_> {
    pub fn dotted(&self) -> String {
        self.path.join(".")
    }

    /// Underscore-joined path, e.g. `a.b.c` → `a_b_c`. Case is kept as written.
    pub fn env_key(&self) -> String {
        self.path.join("_")
    }
}

/// Collect every leaf of `map` in the mapping's iteration order.
pub fn leaves(map: &ConfigMap) -> Vec<Leaf<'_>> {
    let mut out = Vec::new();
    let mut path = Vec::new();
    for (key, value) in map {
        path.push(key.clone());
        collect(value, &mut path, &mut out);
        path.pop();
    }
    out
}

fn collect<'a>(value: &'a Value, path: &mut Vec<String>, out: &mut Vec<Leaf<'a>>) {
    match value {
        Value::Object(children) => {
            for (key, child) in children {
                path.push(key.clone());
                collect(child, path, out);
                path.pop();
            }
        }
        Value::Array(items) => {
            for (index, item) in items.iter().enumerate() {
                path.push(index.to_string());
                collect(item, path, out);
                path.pop();
            }
        }
        leaf => out.push(Leaf {
            path: path.clone(),
            value: leaf,
        }),
    }
}

/// Navigate `map` by a leaf path, descending into sequences by index.
pub fn value_at_mut<'a>(map: &'a mut ConfigMap, path: &[String]) -> Option<&'a mut Value> {
    let (first, rest) = path.split_first()?;
    let mut current = map.get_mut(first)?;
    for segment in rest {
        current = match current {
            Value::Object(children) => children.get_mut(segment)?,
            Value::Array(items) => items.get_mut(segment.parse::<usize>().ok()?)?,
            _ => return None,
        };
    }
    Some(current)
}

/// Render a leaf for display: strings bare, everything else as JSON.
pub fn format_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

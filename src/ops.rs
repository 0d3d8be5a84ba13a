//! Config operations: key lookup, listing, and result types.
//!
//! Provides the logic behind `config list`, `config get`, `config env`, and
//! the `ConfigResult` enum that callers use to display results.

use std::fmt;
use std::path::PathBuf;

use serde_json::Value;

use crate::ConfigMap;
use crate::error::ConfigError;
use crate::flatten::{self, format_value};

/// Result of a config operation. Returned to the caller for display.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigResult {
    /// A key's effective value.
    KeyValue { key: String, value: String },
    /// Confirmation that a value was persisted.
    ValueSet { key: String, value: String },
    /// All effective key-value pairs.
    Listing { entries: Vec<(String, String)> },
    /// Location of the namespace's config file.
    FilePath(PathBuf),
    /// `(dotted_key, env_var)` for every leaf.
    EnvKeys { entries: Vec<(String, String)> },
}

impl fmt::Display for ConfigResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigResult::KeyValue { key, value } => write!(f, "{key} = {value}"),
            ConfigResult::ValueSet { key, value } => write!(f, "Set {key} = {value}"),
            ConfigResult::Listing { entries } => write_pairs(f, entries, " = "),
            ConfigResult::FilePath(path) => write!(f, "{}", path.display()),
            ConfigResult::EnvKeys { entries } => write_pairs(f, entries, " <- "),
        }
    }
}

fn write_pairs(f: &mut fmt::Formatter<'_>, entries: &[(String, String)], sep: &str) -> fmt::Result {
    for (i, (left, right)) in entries.iter().enumerate() {
        if i > 0 {
            writeln!(f)?;
        }
        write!(f, "{left}{sep}{right}")?;
    }
    Ok(())
}

/// Navigate a mapping by dotted key path (e.g. `"database.url"`). Numeric
/// segments index into sequences.
pub fn map_get<'a>(map: &'a ConfigMap, dotted_key: &str) -> Option<&'a Value> {
    let mut segments = dotted_key.split('.');
    let mut current = map.get(segments.next()?)?;
    for segment in segments {
        current = match current {
            Value::Object(children) => children.get(segment)?,
            Value::Array(items) => items.get(segment.parse::<usize>().ok()?)?,
            _ => return None,
        };
    }
    Some(current)
}

/// Get a config value by dotted key for display.
pub fn get_value(config: &ConfigMap, key: &str) -> Result<ConfigResult, ConfigError> {
    let value = map_get(config, key).ok_or_else(|| ConfigError::KeyNotFound(key.into()))?;
    let value = match value {
        Value::Object(_) | Value::Array(_) => {
            serde_yaml::to_string(value).map_err(|e| ConfigError::InvalidValue {
                key: key.into(),
                reason: e.to_string(),
            })?
        }
        leaf => format_value(leaf),
    };
    Ok(ConfigResult::KeyValue {
        key: key.into(),
        value: value.trim_end().to_string(),
    })
}

/// List all effective config values as flattened dotted key-value pairs.
pub fn list_values(config: &ConfigMap) -> Vec<(String, String)> {
    flatten::leaves(config)
        .iter()
        .map(|leaf| (leaf.dotted(), format_value(leaf.value)))
        .collect()
}

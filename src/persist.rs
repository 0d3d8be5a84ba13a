//! Config persistence: encode a mapping as YAML and replace the file with it.
//!
//! Writes go through `std::fs::write`, so the previous contents are replaced in
//! one call or an error is returned. There is no lock and no rename step;
//! concurrent writers to the same namespace race and the last one wins.

use std::path::Path;

use serde_json::Value;

use crate::ConfigMap;
use crate::error::ConfigError;

/// Encode `map` as a YAML document.
pub fn encode(map: &ConfigMap, path: &Path) -> Result<String, ConfigError> {
    serde_yaml::to_string(map).map_err(|e| ConfigError::Encode {
        path: path.to_path_buf(),
        source: e,
    })
}

/// Encode `map` and write it to `path`, replacing what was there.
pub fn write_config_file(path: &Path, map: &ConfigMap) -> Result<(), ConfigError> {
    let content = encode(map, path)?;
    std::fs::write(path, content).map_err(|e| ConfigError::Io {
        path: path.to_path_buf(),
        source: e,
    })
}

/// Parse a raw command-line value with YAML scalar rules: `3000` → number,
/// `true` → bool, `~` → null, anything else → string.
///
/// Structured input (`[a, b]`, `{x: 1}`) is accepted as well.
pub fn parse_scalar(key: &str, raw: &str) -> Result<Value, ConfigError> {
    if raw.trim().is_empty() {
        return Ok(Value::String(raw.to_string()));
    }
    match serde_yaml::from_str::<Value>(raw) {
        Ok(value) => Ok(value),
        Err(_) if !raw.contains(['[', '{', ':']) => Ok(Value::String(raw.to_string())),
        Err(e) => Err(ConfigError::InvalidValue {
            key: key.into(),
            reason: e.to_string(),
        }),
    }
}

use std::collections::HashMap;
use std::fs::File;

use serde_json::Value;
use tracing::{info, warn};

use crate::ConfigMap;
use crate::flatten;

/// A frozen view of environment variables used for config overrides.
///
/// Taken once and handed to the reconciler so tests can pass synthetic data
/// instead of `std::env::vars()`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EnvSnapshot {
    vars: HashMap<String, String>,
}

impl EnvSnapshot {
    /// No variables: overrides are never applied.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn from_pairs<K, V>(pairs: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            vars: pairs
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }

    /// `.env` entries from the working directory (or its ancestors), with the
    /// real process environment layered on top.
    ///
    /// The process environment is not modified. A missing `.env` file is fine;
    /// a malformed one is logged and skipped.
    pub fn from_process() -> Self {
        let mut vars = read_dotenv(dotenvy::dotenv_iter());
        vars.extend(std::env::vars());
        Self { vars }
    }

    /// Case-sensitive lookup. An empty value counts as set.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.vars.get(name).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.vars.is_empty()
    }
}

/// Value of `name` in the `.env` file, if there is one.
pub(crate) fn dotenv_var(name: &str) -> Option<String> {
    read_dotenv(dotenvy::dotenv_iter()).remove(name)
}

/// Entries of a `.env` source. A missing file yields nothing; a malformed
/// entry stops reading at that line.
fn read_dotenv(source: Result<dotenvy::Iter<File>, dotenvy::Error>) -> HashMap<String, String> {
    let mut vars = HashMap::new();
    match source {
        Ok(iter) => {
            for item in iter {
                match item {
                    Ok((key, value)) => {
                        vars.insert(key, value);
                    }
                    Err(e) => {
                        warn!(error = %e, "Skipping malformed .env entry");
                        break;
                    }
                }
            }
        }
        Err(e) if e.not_found() => {}
        Err(e) => warn!(error = %e, "Could not read .env file"),
    }
    vars
}

/// Replace every leaf whose env key is set in `env` with the raw variable
/// value, returning the new mapping.
///
/// `a.b.c` is looked up as `a_b_c`. Values are inserted as strings with no
/// type coercion, even when the leaf was a number or bool.
pub fn apply_env_overrides(mut config: ConfigMap, env: &EnvSnapshot) -> ConfigMap {
    if env.is_empty() {
        return config;
    }

    let overrides: Vec<(Vec<String>, String)> = flatten::leaves(&config)
        .into_iter()
        .filter_map(|leaf| {
            let var = leaf.env_key();
            let raw = env.get(&var)?;
            info!(key = %leaf.dotted(), var = %var, "Overriding config value from environment variable");
            Some((leaf.path, raw.to_string()))
        })
        .collect();

    if overrides.is_empty() {
        return config;
    }

    for (path, raw) in overrides {
        if let Some(slot) = flatten::value_at_mut(&mut config, &path) {
            *slot = Value::String(raw);
        }
    }
    config
}

/// Every `(dotted_key, env_var)` pair recognized for `config`.
pub fn env_keys(config: &ConfigMap) -> Vec<(String, String)> {
    flatten::leaves(config)
        .iter()
        .map(|leaf| (leaf.dotted(), leaf.env_key()))
        .collect()
}

//! Construction-time argument checks. These run before the root is resolved
//! and before any filesystem access.

use std::path::{Component, Path};

use crate::ConfigMap;
use crate::error::ConfigError;

/// A namespace must be non-empty and stay below the root: no absolute paths,
/// no `..` segments. Nested names such as `wallet/mainnet` are allowed.
pub fn validate_namespace(namespace: Option<&str>) -> Result<&str, ConfigError> {
    let namespace = match namespace {
        Some(ns) if !ns.trim().is_empty() => ns,
        _ => return Err(ConfigError::NamespaceRequired),
    };

    for component in Path::new(namespace).components() {
        match component {
            Component::Normal(_) | Component::CurDir => {}
            Component::ParentDir => {
                return Err(ConfigError::InvalidNamespace {
                    namespace: namespace.into(),
                    reason: "must not contain '..'".into(),
                });
            }
            Component::RootDir | Component::Prefix(_) => {
                return Err(ConfigError::InvalidNamespace {
                    namespace: namespace.into(),
                    reason: "must be relative to the config root".into(),
                });
            }
        }
    }

    Ok(namespace)
}

/// The default configuration must be present and contain at least one key.
pub fn validate_defaults(defaults: Option<&ConfigMap>) -> Result<&ConfigMap, ConfigError> {
    match defaults {
        Some(map) if !map.is_empty() => Ok(map),
        _ => Err(ConfigError::DefaultsRequired),
    }
}

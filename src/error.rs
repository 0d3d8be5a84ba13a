use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Namespace is required — call .namespace() on the builder")]
    NamespaceRequired,

    #[error("Invalid namespace '{namespace}': {reason}")]
    InvalidNamespace { namespace: String, reason: String },

    #[error("Default configuration is required and must not be empty — call .defaults() on the builder")]
    DefaultsRequired,

    #[error("Default configuration must serialize to a mapping: {0}")]
    DefaultsNotAMapping(String),

    #[error("Could not resolve the configuration root directory")]
    RootUnresolved,

    #[error("Failed to access {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse {path}: {source}")]
    Parse {
        path: PathBuf,
        source: serde_yaml::Error,
    },

    #[error("Failed to encode configuration for {path}: {source}")]
    Encode {
        path: PathBuf,
        source: serde_yaml::Error,
    },

    #[error("Top level of {path} is not a mapping")]
    NotAMapping { path: PathBuf },

    #[error("Key not found: {0}")]
    KeyNotFound(String),

    #[error("Invalid value for '{key}': {reason}")]
    InvalidValue { key: String, reason: String },
}

impl ConfigError {
    /// True for failures that come from reading, writing, or decoding the
    /// persisted file. These are recovered locally by `reload` and
    /// `update_config` instead of reaching the caller.
    pub fn is_persistence(&self) -> bool {
        matches!(
            self,
            ConfigError::Io { .. }
                | ConfigError::Parse { .. }
                | ConfigError::Encode { .. }
                | ConfigError::NotAMapping { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn io_error_includes_path() {
        let err = ConfigError::Io {
            path: "/srv/root/wallet/config.yaml".into(),
            source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        };
        let msg = err.to_string();
        assert!(msg.contains("/srv/root/wallet/config.yaml"));
        assert!(msg.contains("denied"));
        assert!(err.is_persistence());
    }

    #[test]
    fn namespace_required_formats() {
        let err = ConfigError::NamespaceRequired;
        assert!(err.to_string().contains("namespace"));
        assert!(!err.is_persistence());
    }

    #[test]
    fn key_not_found_formats() {
        let err = ConfigError::KeyNotFound("database.url".into());
        assert!(err.to_string().contains("database.url"));
    }

    #[test]
    fn not_a_mapping_is_persistence() {
        let err = ConfigError::NotAMapping {
            path: "config.yaml".into(),
        };
        assert!(err.is_persistence());
    }
}

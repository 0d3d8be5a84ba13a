use serde::Serialize;
use serde_json::Value;

use crate::ConfigMap;
use crate::env::EnvSnapshot;
use crate::error::ConfigError;
use crate::file::{NamespacePaths, RootResolver};
use crate::reconciler::ConfigReconciler;
use crate::types::RootPath;
use crate::validate;

/// File name used inside each namespace folder unless overridden.
pub const DEFAULT_FILE_NAME: &str = "config.yaml";

/// Root used when the builder is not given one: `~/.nsconfig`.
pub const DEFAULT_ROOT: RootPath = RootPath::Home(".nsconfig");

/// Builder for a [`ConfigReconciler`].
///
/// Only [`namespace()`](Self::namespace) and [`defaults()`](Self::defaults)
/// (or [`defaults_from()`](Self::defaults_from)) are required. The root and the
/// environment snapshot default to process-wide sources; tests should pass
/// explicit ones.
pub struct ReconcilerBuilder {
    namespace: Option<String>,
    defaults: Option<ConfigMap>,
    defaults_error: Option<String>,
    root: Option<Box<dyn RootResolver>>,
    env: Option<EnvSnapshot>,
    file_name: Option<String>,
}

impl ReconcilerBuilder {
    pub(crate) fn new() -> Self {
        Self {
            namespace: None,
            defaults: None,
            defaults_error: None,
            root: None,
            env: None,
            file_name: None,
        }
    }

    /// Folder name under the root. Nested names (`a/b`) are allowed.
    pub fn namespace(mut self, namespace: &str) -> Self {
        self.namespace = Some(namespace.to_string());
        self
    }

    pub fn defaults(mut self, defaults: ConfigMap) -> Self {
        self.defaults = Some(defaults);
        self.defaults_error = None;
        self
    }

    /// Take the defaults from any value that serializes to a mapping, such as a
    /// config struct's `Default` impl.
    pub fn defaults_from<S: Serialize>(mut self, source: &S) -> Self {
        match serde_json::to_value(source) {
            Ok(Value::Object(map)) => {
                self.defaults = Some(map);
                self.defaults_error = None;
            }
            Ok(other) => {
                self.defaults_error = Some(format!("got {}", kind_of(&other)));
            }
            Err(e) => self.defaults_error = Some(e.to_string()),
        }
        self
    }

    /// Where namespace folders live (default: [`DEFAULT_ROOT`]).
    pub fn root(mut self, root: impl RootResolver + 'static) -> Self {
        self.root = Some(Box::new(root));
        self
    }

    /// Environment used for overrides (default: [`EnvSnapshot::from_process`]).
    pub fn env(mut self, env: EnvSnapshot) -> Self {
        self.env = Some(env);
        self
    }

    /// Disable environment overrides.
    pub fn no_env(self) -> Self {
        self.env(EnvSnapshot::empty())
    }

    /// Override the config file name (default: [`DEFAULT_FILE_NAME`]).
    pub fn file_name(mut self, name: &str) -> Self {
        self.file_name = Some(name.to_string());
        self
    }

    fn effective_file_name(&self) -> &str {
        self.file_name.as_deref().unwrap_or(DEFAULT_FILE_NAME)
    }

    /// Validate arguments, resolve the root, and run the initial load.
    ///
    /// Fails only on missing/invalid arguments or an unresolvable root, all of
    /// which are checked before the filesystem is touched. Problems with the
    /// config file itself are logged and the defaults are used.
    pub fn build(self) -> Result<ConfigReconciler, ConfigError> {
        let namespace = validate::validate_namespace(self.namespace.as_deref())?.to_string();
        let file_name = self.effective_file_name().to_string();
        if let Some(reason) = self.defaults_error {
            return Err(ConfigError::DefaultsNotAMapping(reason));
        }
        validate::validate_defaults(self.defaults.as_ref())?;
        let defaults = self.defaults.unwrap_or_default();

        let root = match &self.root {
            Some(resolver) => resolver.resolve_root(),
            None => DEFAULT_ROOT.resolve_root(),
        }
        .ok_or(ConfigError::RootUnresolved)?;

        let paths = NamespacePaths::new(&root, &namespace, &file_name);
        let env = self.env.unwrap_or_else(EnvSnapshot::from_process);

        Ok(ConfigReconciler::from_parts(namespace, defaults, paths, env))
    }
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a bool",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "a sequence",
        Value::Object(_) => "a mapping",
    }
}

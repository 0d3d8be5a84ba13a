//! The reconciler: owns the defaults, the namespace's file location, the
//! environment snapshot, and the effective configuration.
//!
//! # Load
//!
//! 1. Create the namespace folder if missing.
//! 2. Read `config.yaml`; a missing file counts as "no persisted state".
//! 3. [`reconcile`](crate::resolve::reconcile) defaults with the persisted
//!    mapping and rewrite the file when the merge changed anything.
//! 4. Apply environment overrides to a copy of the merged result. The merged
//!    result itself is kept as the stored layer; overrides are never written.
//!
//! [`try_load`](ConfigReconciler::try_load) returns failures as
//! [`ConfigError`]. [`reload`](ConfigReconciler::reload) and construction
//! log them and fall back to the defaults, so a broken file never stops the
//! process.
//!
//! # Update
//!
//! [`update_config`](ConfigReconciler::update_config) deep-merges the updates
//! over the stored layer (defaults plus file, before environment overrides),
//! writes the result, and runs a full load again so the new state has been
//! through the file, the defaults, and the environment. Merging over the
//! stored layer keeps override values out of the file. On failure the
//! previous configuration is kept.

use std::path::Path;

use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, info, warn};

use crate::ConfigMap;
use crate::builder::ReconcilerBuilder;
use crate::env::{self, EnvSnapshot};
use crate::error::ConfigError;
use crate::file::{self, NamespacePaths};
use crate::merge::deep_merge;
use crate::ops::{self, ConfigResult};
use crate::overrides;
use crate::persist;
use crate::resolve::{self, Reconciled};
use crate::types::ConfigAction;

/// Namespaced configuration backed by `<root>/<namespace>/config.yaml`.
#[derive(Debug, Clone)]
pub struct ConfigReconciler {
    namespace: String,
    defaults: ConfigMap,
    paths: NamespacePaths,
    env: EnvSnapshot,
    /// Defaults merged with the file; what an update builds on.
    stored: ConfigMap,
    config: ConfigMap,
}

/// Result of one load: the merged layer as written, and the same mapping
/// with environment overrides applied.
struct Loaded {
    stored: ConfigMap,
    effective: ConfigMap,
}

impl ConfigReconciler {
    pub fn builder() -> ReconcilerBuilder {
        ReconcilerBuilder::new()
    }

    /// Reconciler for `namespace` under the default root, with overrides from
    /// `.env` and the process environment.
    pub fn new(namespace: &str, defaults: ConfigMap) -> Result<Self, ConfigError> {
        Self::builder()
            .namespace(namespace)
            .defaults(defaults)
            .build()
    }

    pub(crate) fn from_parts(
        namespace: String,
        defaults: ConfigMap,
        paths: NamespacePaths,
        env: EnvSnapshot,
    ) -> Self {
        let mut reconciler = Self {
            namespace,
            stored: defaults.clone(),
            config: defaults.clone(),
            defaults,
            paths,
            env,
        };
        reconciler.reload();
        reconciler
    }

    /// Run the load algorithm and return the effective configuration without
    /// storing it.
    pub fn try_load(&self) -> Result<ConfigMap, ConfigError> {
        self.load_layers().map(|loaded| loaded.effective)
    }

    fn load_layers(&self) -> Result<Loaded, ConfigError> {
        let path = &self.paths.file;

        file::ensure_folder(&self.paths.folder)?;
        let persisted = file::read_config_file(path)?;
        let first_run = persisted.is_none();

        let Reconciled { merged, write_back } = resolve::reconcile(&self.defaults, persisted);
        if write_back {
            if first_run {
                debug!(path = %path.display(), "Creating config file from defaults");
            } else {
                debug!(path = %path.display(), "Backfilling config file with merged defaults");
            }
            persist::write_config_file(path, &merged)?;
        }

        let effective = env::apply_env_overrides(merged.clone(), &self.env);
        info!(
            namespace = %self.namespace,
            path = %path.display(),
            config = %serde_json::to_string(&effective).unwrap_or_default(),
            "Loaded config"
        );
        Ok(Loaded {
            stored: merged,
            effective,
        })
    }

    /// Load again and store the result, falling back to the defaults on any
    /// persistence failure.
    pub fn reload(&mut self) -> &ConfigMap {
        match self.load_layers() {
            Ok(loaded) => self.store(loaded),
            Err(e) => {
                warn!(
                    path = %self.paths.file.display(),
                    error = %e,
                    "Could not load config file, using defaults"
                );
                self.stored = self.defaults.clone();
                self.config = self.defaults.clone();
            }
        }
        &self.config
    }

    fn store(&mut self, loaded: Loaded) {
        self.stored = loaded.stored;
        self.config = loaded.effective;
    }

    /// Merge `updates` into the stored configuration, persist, and reload.
    ///
    /// Environment overrides active at the time are not written; they are
    /// applied again by the reload. Leaves the configuration untouched when
    /// any step fails.
    pub fn try_update_config(&mut self, updates: ConfigMap) -> Result<(), ConfigError> {
        let updated = deep_merge(self.stored.clone(), updates);
        file::ensure_folder(&self.paths.folder)?;
        persist::write_config_file(&self.paths.file, &updated)?;
        let loaded = self.load_layers()?;
        self.store(loaded);
        Ok(())
    }

    /// Like [`try_update_config`](Self::try_update_config), but failures are
    /// logged instead of returned.
    pub fn update_config(&mut self, updates: ConfigMap) {
        if let Err(e) = self.try_update_config(updates) {
            warn!(
                path = %self.paths.file.display(),
                error = %e,
                "Could not update config file"
            );
        }
    }

    /// Persist a single value by dotted key. `raw` is parsed as a YAML scalar.
    ///
    /// Numeric segments index into sequences, so `peers.1` replaces one
    /// element. An index past the end is rejected.
    pub fn set_value(&mut self, key: &str, raw: &str) -> Result<ConfigResult, ConfigError> {
        let value = persist::parse_scalar(key, raw)?;
        let mut updated = self.stored.clone();
        overrides::set_dotted(&mut updated, key, value)?;
        self.try_update_config(updated)?;
        Ok(ConfigResult::ValueSet {
            key: key.into(),
            value: raw.into(),
        })
    }

    /// Handle a [`ConfigAction`] (list / get / set / path / env).
    pub fn handle(&mut self, action: &ConfigAction) -> Result<ConfigResult, ConfigError> {
        match action {
            ConfigAction::List => Ok(ConfigResult::Listing {
                entries: self.list(),
            }),
            ConfigAction::Get { key } => ops::get_value(&self.config, key),
            ConfigAction::Set { key, value } => self.set_value(key, value),
            ConfigAction::Path => Ok(ConfigResult::FilePath(self.paths.file.clone())),
            ConfigAction::Env => Ok(ConfigResult::EnvKeys {
                entries: self.env_keys(),
            }),
        }
    }

    /// Handle a `ConfigAction` and print the result to stdout.
    pub fn handle_and_print(&mut self, action: &ConfigAction) -> Result<(), ConfigError> {
        let result = self.handle(action)?;
        println!("{result}");
        Ok(())
    }

    /// The effective configuration.
    pub fn config(&self) -> &ConfigMap {
        &self.config
    }

    /// Deserialize the effective configuration into `T`.
    ///
    /// Environment overrides are strings, so numeric or boolean fields that
    /// were overridden need a string-tolerant deserializer.
    pub fn config_as<T: DeserializeOwned>(&self) -> Result<T, ConfigError> {
        serde_json::from_value(Value::Object(self.config.clone())).map_err(|e| {
            ConfigError::InvalidValue {
                key: "<effective>".into(),
                reason: e.to_string(),
            }
        })
    }

    pub fn get(&self, dotted_key: &str) -> Result<&Value, ConfigError> {
        ops::map_get(&self.config, dotted_key)
            .ok_or_else(|| ConfigError::KeyNotFound(dotted_key.into()))
    }

    pub fn list(&self) -> Vec<(String, String)> {
        ops::list_values(&self.config)
    }

    /// `(dotted_key, env_var)` for every leaf of the effective configuration.
    pub fn env_keys(&self) -> Vec<(String, String)> {
        env::env_keys(&self.config)
    }

    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    pub fn defaults(&self) -> &ConfigMap {
        &self.defaults
    }

    pub fn persistence_folder_path(&self) -> &Path {
        &self.paths.folder
    }

    pub fn config_file_path(&self) -> &Path {
        &self.paths.file
    }
}

//! Namespaced configuration for long-running services. Give it a namespace and
//! a default mapping; it keeps `<root>/<namespace>/config.yaml` in step with
//! your defaults and lets environment variables override any leaf.
//!
//! ```ignore
//! let defaults = serde_json::json!({
//!     "port": 8080,
//!     "database": { "url": "sqlite://data.db", "pool_size": 5 },
//! });
//! let mut cfg = ConfigReconciler::builder()
//!     .namespace("registry")
//!     .defaults(defaults.as_object().cloned().unwrap_or_default())
//!     .root(RootPath::env_or("REGISTRY_ROOT", RootPath::Home(".registry")))
//!     .build()?;
//!
//! let port = cfg.get("port")?;
//! cfg.update_config(updates);
//! ```
//!
//! # Layers
//!
//! ```text
//! Defaults              supplied by the caller, never modified
//!        ↑ overridden by
//! config.yaml           <root>/<namespace>/config.yaml
//!        ↑ overridden by
//! Environment           a.b.c  ←  a_b_c
//! ```
//!
//! The first two layers are deep-merged: nested mappings combine key by key and
//! the file wins on any other conflict. Keys that only exist in the file are
//! kept.
//!
//! # Self-healing file
//!
//! On every load the merged result is compared with what was on disk. If the
//! merge added anything (a default key introduced in a newer release, say) the
//! file is rewritten with the merged mapping, so the file always documents
//! every key the application knows about. When nothing changed the file is
//! left alone.
//!
//! The first load creates the folder and writes the defaults verbatim.
//!
//! # Environment overrides
//!
//! Every leaf is looked up under its underscore-joined key path, exactly as
//! the keys are spelled: `database.pool_size` is overridden by
//! `database_pool_size`. Sequence elements use their index (`peers_0`).
//! Values are inserted as raw strings without type coercion. They are applied
//! to a copy after the write-back step, and updates build on the layer below
//! them, so they never end up in the file.
//!
//! Overrides are read from an [`EnvSnapshot`]. By default that is the `.env`
//! file (if any) plus the process environment; tests pass
//! [`EnvSnapshot::from_pairs`] instead.
//!
//! # Updates
//!
//! [`update_config()`](ConfigReconciler::update_config) deep-merges the
//! updates over the defaults-plus-file layer (not the env-overridden view),
//! writes the result, and then performs a full load, so the stored state
//! always round-trips through the file and overrides stay out of it.
//! [`set_value()`](ConfigReconciler::set_value) does the same for one
//! dotted key and a raw string value.
//!
//! # Error handling
//!
//! Only construction can fail the caller: a missing namespace or empty
//! defaults, or a root that cannot be resolved. These are checked before the
//! filesystem is touched.
//!
//! After construction, file problems (unreadable, unparseable, unwritable) are
//! logged with the file path through `tracing`. A failed load yields the
//! defaults; a failed update keeps the previous configuration. The `try_*`
//! variants return the [`ConfigError`] instead.
//!
//! There is no locking. Two reconcilers on the same namespace race and the
//! last write wins.

pub mod error;
pub mod types;

mod builder;
#[cfg(feature = "clap")]
mod cli;
mod env;
mod file;
mod flatten;
pub(crate) mod merge;
mod ops;
mod overrides;
mod persist;
mod reconciler;
mod resolve;
mod validate;

#[cfg(test)]
mod fixtures;

pub use builder::{DEFAULT_FILE_NAME, DEFAULT_ROOT, ReconcilerBuilder};
#[cfg(feature = "clap")]
pub use cli::{ConfigArgs, ConfigSubcommand};
pub use env::{EnvSnapshot, apply_env_overrides, env_keys};
pub use error::ConfigError;
pub use file::RootResolver;
pub use merge::deep_merge;
pub use ops::ConfigResult;
pub use reconciler::ConfigReconciler;
pub use serde_json::Value;
pub use types::{ConfigAction, RootPath};

/// A configuration mapping: string keys to JSON-model values.
pub type ConfigMap = serde_json::Map<String, Value>;

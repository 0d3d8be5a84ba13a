//! Core reconciliation: merge defaults with the persisted mapping and decide
//! whether the file needs rewriting.
//!
//! Operates on pre-loaded data with no I/O, so every branch of the load
//! algorithm is testable with synthetic inputs:
//!
//! 1. No persisted file: the defaults are the merged result and must be written.
//! 2. Otherwise deep-merge the persisted mapping over the defaults.
//! 3. Rewrite only when the merge changed something, which backfills default
//!    keys added since the file was last written.
//!
//! Environment overrides run after this step and never reach the file.

use crate::ConfigMap;
use crate::merge::deep_merge;

/// Output of [`reconcile`].
#[derive(Debug, Clone, PartialEq)]
pub struct Reconciled {
    /// Defaults merged with the persisted mapping, before env overrides.
    pub merged: ConfigMap,
    /// Whether the file must be rewritten to equal `merged`.
    pub write_back: bool,
}

pub fn reconcile(defaults: &ConfigMap, persisted: Option<ConfigMap>) -> Reconciled {
    match persisted {
        None => Reconciled {
            merged: defaults.clone(),
            write_back: true,
        },
        Some(persisted) => {
            let merged = deep_merge(defaults.clone(), persisted.clone());
            let write_back = merged != persisted;
            Reconciled { merged, write_back }
        }
    }
}

//! `config` subcommands for applications built on clap (feature `clap`).
//!
//! Flatten [`ConfigArgs`] into a command, turn it into a
//! [`ConfigAction`] with [`ConfigArgs::into_action`], and pass that to
//! [`ConfigReconciler::handle`](crate::ConfigReconciler::handle).

use clap::{Args, Subcommand};

use crate::types::ConfigAction;

#[derive(Debug, Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub action: Option<ConfigSubcommand>,
}

#[derive(Debug, Subcommand)]
pub enum ConfigSubcommand {
    /// Print every effective value as `key = value`.
    List,
    /// Print one effective value.
    Get {
        /// Dotted path; numeric segments index sequences (`peers.0`).
        key: String,
    },
    /// Write one value to the namespace's config.yaml.
    Set {
        /// Dotted path; numeric segments index sequences (`peers.0`).
        key: String,
        /// YAML scalar: `3000` is a number, `true` a bool, anything else text.
        value: String,
    },
    /// Print where config.yaml lives.
    Path,
    /// Print the environment variable that overrides each key.
    Env,
}

impl ConfigArgs {
    /// `config` with no subcommand lists.
    pub fn into_action(self) -> ConfigAction {
        match self.action.unwrap_or(ConfigSubcommand::List) {
            ConfigSubcommand::List => ConfigAction::List,
            ConfigSubcommand::Get { key } => ConfigAction::Get { key },
            ConfigSubcommand::Set { key, value } => ConfigAction::Set { key, value },
            ConfigSubcommand::Path => ConfigAction::Path,
            ConfigSubcommand::Env => ConfigAction::Env,
        }
    }
}

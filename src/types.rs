//! Root locations and framework-agnostic config operations.
//!
//! A reconciler stores its file at `<root>/<namespace>/config.yaml`. The root
//! comes from a [`RootResolver`](crate::RootResolver); [`RootPath`] covers the
//! usual places:
//!
//! ```text
//! RootPath::Platform("myapp")        ~/.local/share/myapp (Linux)
//! RootPath::Home(".myapp")           ~/.myapp
//! RootPath::Cwd                      ./
//! RootPath::Path("/srv/myapp")       /srv/myapp
//! RootPath::env_or("MYAPP_ROOT",     $MYAPP_ROOT if set, else ~/.myapp/mainnet
//!     RootPath::Home(".myapp/mainnet"))
//! ```

use std::path::PathBuf;

/// Where the configuration root lives.
#[derive(Debug, Clone, PartialEq)]
pub enum RootPath {
    /// Platform data directory for the given application name.
    Platform(&'static str),
    /// A subdirectory under the user's home directory, e.g. `Home(".myapp")`.
    Home(&'static str),
    /// Current working directory.
    Cwd,
    /// An explicit path.
    Path(PathBuf),
    /// The directory named by an environment variable (process environment,
    /// then `.env`), falling back to another location when it is unset or empty.
    EnvOr {
        var: String,
        fallback: Box<RootPath>,
    },
}

impl RootPath {
    pub fn env_or(var: &str, fallback: RootPath) -> Self {
        RootPath::EnvOr {
            var: var.to_string(),
            fallback: Box::new(fallback),
        }
    }
}

/// A config operation, independent of any CLI framework.
/// The CLI layer converts parsed clap args into this.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigAction {
    /// Every effective leaf as `key = value`.
    List,
    Get { key: String },
    /// Persist `value` (parsed as a YAML scalar) at dotted `key`.
    Set { key: String, value: String },
    /// Location of the config file.
    Path,
    /// Environment variable recognized for each leaf.
    Env,
}

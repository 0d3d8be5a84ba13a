//! Default configuration for the nsconfig demo application.
//!
//! The struct only provides the defaults and a typed view. Everything else
//! (the YAML file, write-back, env overrides) works on the untyped mapping.
//!
//! # Env var mapping
//!
//! | Env var                  | Config key               |
//! |--------------------------|--------------------------|
//! | `name`                   | `name`                   |
//! | `server_host`            | `server.host`            |
//! | `server_port`            | `server.port`            |
//! | `server_max_connections` | `server.max_connections` |
//! | `display_color`          | `display.color`          |

use serde::{Deserialize, Serialize};

/// Root configuration for the demo application.
#[derive(Serialize, Deserialize, Debug)]
pub struct DemoConfig {
    pub name: String,
    pub server: ServerConfig,
    pub display: DisplayConfig,
}

#[derive(Serialize, Deserialize, Debug)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub max_connections: u32,
}

#[derive(Serialize, Deserialize, Debug)]
pub struct DisplayConfig {
    /// Supported values: red, green, yellow, blue, magenta, cyan, white.
    pub color: String,
}

impl Default for DemoConfig {
    fn default() -> Self {
        Self {
            name: "nsconfig-demo".into(),
            server: ServerConfig {
                host: "127.0.0.1".into(),
                port: 3000,
                max_connections: 100,
            },
            display: DisplayConfig {
                color: "yellow".into(),
            },
        }
    }
}

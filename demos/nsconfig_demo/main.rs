//! # nsconfig demo application
//!
//! A sample CLI that keeps its settings in a namespaced YAML file. It exists
//! to exercise nsconfig by hand.
//!
//! ## Running
//!
//! ```sh
//! cargo run --example nsconfig_demo -- --root /tmp/demo show
//! cargo run --example nsconfig_demo -- --root /tmp/demo config set server.port 8080
//! display_color=red cargo run --example nsconfig_demo -- --root /tmp/demo show
//! RUST_LOG=nsconfig=debug cargo run --example nsconfig_demo -- --root /tmp/demo show
//! ```

mod config;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use nsconfig::{ConfigArgs, ConfigReconciler, RootPath};

use config::DemoConfig;

/// nsconfig demo — a sample CLI app backed by a namespaced config file.
#[derive(Parser, Debug)]
#[command(name = "nsconfig-demo")]
struct Cli {
    /// Directory holding namespace folders (default: ~/.nsconfig-demo).
    #[arg(long, global = true)]
    root: Option<PathBuf>,

    /// Namespace folder under the root.
    #[arg(long, global = true, default_value = "demo")]
    namespace: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Print the effective configuration, colored by display.color.
    Show,
    /// Inspect or change the configuration file (list, get, set, path, env).
    Config(ConfigArgs),
}

fn ansi_color_code(name: &str) -> &str {
    match name {
        "red" => "\x1b[31m",
        "green" => "\x1b[32m",
        "yellow" => "\x1b[33m",
        "blue" => "\x1b[34m",
        "magenta" => "\x1b[35m",
        "cyan" => "\x1b[36m",
        "white" => "\x1b[37m",
        _ => "\x1b[0m",
    }
}

const RESET: &str = "\x1b[0m";

fn show(reconciler: &ConfigReconciler) {
    let color = reconciler
        .get("display.color")
        .ok()
        .and_then(|v| v.as_str())
        .unwrap_or("");
    let color = ansi_color_code(color);

    let entries = reconciler.list();
    let max_key_len = entries.iter().map(|(k, _)| k.len()).max().unwrap_or(0);
    for (key, value) in &entries {
        println!("{color}{key:<max_key_len$}{RESET}  {value}");
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let root = match cli.root {
        Some(path) => RootPath::Path(path),
        None => RootPath::env_or("NSCONFIG_DEMO_ROOT", RootPath::Home(".nsconfig-demo")),
    };

    let mut reconciler = ConfigReconciler::builder()
        .namespace(&cli.namespace)
        .defaults_from(&DemoConfig::default())
        .root(root)
        .build()
        .unwrap_or_else(|e| {
            eprintln!("Failed to set up config:\n{e}");
            std::process::exit(1);
        });

    match cli.command {
        Commands::Show => show(&reconciler),
        Commands::Config(args) => {
            let action = args.into_action();
            reconciler.handle_and_print(&action).unwrap_or_else(|e| {
                eprintln!("Config error:\n{e}");
                std::process::exit(1);
            });
        }
    }
}

//! Command-line interface definition and parsing.
//!
//! Flags may be written with a `-`, `--` or `/` prefix in any case
//! (`-d`, `/DEMO`, `--demo`). Arguments that are not recognised are ignored
//! rather than rejected, so the raw arguments are first normalised into the
//! canonical form and only then handed to clap.

use clap::Parser;
use std::path::PathBuf;

/// Command-line arguments for the auction house.
#[derive(Parser, Debug, Default, PartialEq, Eq)]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Seed the marketplace with generated clients and products.
    #[arg(short, long)]
    pub demo: bool,

    /// Path to a TOML configuration file.
    #[arg(short, long, env = "APP_CONFIG")]
    pub config: Option<PathBuf>,
}

impl Cli {
    /// Parse the process arguments.
    pub fn import() -> Result<Self, clap::Error> {
        Self::import_from(std::env::args_os().map(|arg| arg.to_string_lossy().into_owned()))
    }

    /// Parse an explicit argument list, the first item being the program name.
    pub fn import_from<I: IntoIterator<Item = String>>(args: I) -> Result<Self, clap::Error> {
        Self::try_parse_from(normalize(args))
    }
}

fn normalize<I: IntoIterator<Item = String>>(args: I) -> Vec<String> {
    let mut args = args.into_iter();
    let program = args.next().unwrap_or_else(|| env!("CARGO_PKG_NAME").to_owned());

    let mut demo = false;
    let mut config = None;
    let mut terminal = None;

    while let Some(arg) = args.next() {
        let Some(flag) = arg
            .strip_prefix("--")
            .or_else(|| arg.strip_prefix('-'))
            .or_else(|| arg.strip_prefix('/'))
        else {
            continue;
        };

        let (name, value) = match flag.split_once('=') {
            Some((name, value)) => (name.to_lowercase(), Some(value.to_owned())),
            None => (flag.to_lowercase(), None),
        };

        match name.as_str() {
            "d" | "demo" => demo = true,
            "c" | "config" => {
                if let Some(path) = value.or_else(|| args.next()) {
                    config = Some(path);
                }
            }
            "h" | "help" | "?" => terminal = Some("--help"),
            "v" | "version" => terminal = Some("--version"),
            _ => {}
        }
    }

    let mut normalized = vec![program];
    normalized.extend(terminal.map(str::to_owned));
    if demo {
        normalized.push("--demo".to_owned());
    }
    if let Some(path) = config {
        normalized.push("--config".to_owned());
        normalized.push(path);
    }
    normalized
}

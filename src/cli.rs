//! CLI argument parsing for srcspot

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Explicit toggle value
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Switch {
    On,
    Off,
}

impl Switch {
    pub fn as_bool(self) -> bool {
        matches!(self, Switch::On)
    }
}

#[derive(Parser, Debug)]
#[command(name = "srcspot")]
#[command(version)]
#[command(about = "Source attribution helpers and hover inspector for rendered pages", long_about = None)]
pub struct Cli {
    /// Enable debug tracing output to stderr
    #[arg(long, global = true)]
    pub debug: bool,

    /// Configuration file (TOML)
    #[arg(long = "config", value_name = "FILE", global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Report whether a request host counts as a development context
    CheckHost {
        /// Host header value, e.g. localhost:8080
        host: String,

        /// Treat any host as development
        #[arg(long)]
        force: bool,
    },

    /// Print the inspector script tag (empty outside development)
    ScriptTag {
        /// Request host
        #[arg(long, default_value = "localhost")]
        host: String,

        /// Treat any host as development
        #[arg(long)]
        force: bool,

        /// Base path for the default script location
        #[arg(long, value_name = "BASE", conflicts_with = "path")]
        base: Option<String>,

        /// Explicit script path
        #[arg(long, value_name = "PATH")]
        path: Option<String>,
    },

    /// Replay a scenario's events through the inspector, one JSON line per event
    Replay {
        /// Scenario file (JSON)
        scenario: PathBuf,

        /// Persist the enabled flag in this JSON file
        #[arg(long, value_name = "FILE")]
        state: Option<PathBuf>,

        /// Attach even on a production host
        #[arg(long)]
        force: bool,

        /// Simulate a page without the clipboard API
        #[arg(long = "no-clipboard-api")]
        no_clipboard_api: bool,
    },

    /// Show the attribution of the element under a point
    Lookup {
        /// Scenario file (JSON)
        scenario: PathBuf,

        /// Point as X,Y
        #[arg(long, value_name = "X,Y", value_parser = parse_point)]
        at: (i32, i32),
    },

    /// Flip or set the persisted enabled flag and print the status
    Toggle {
        /// State file (JSON)
        #[arg(long, value_name = "FILE")]
        state: PathBuf,

        /// Set explicitly instead of flipping
        #[arg(value_enum)]
        value: Option<Switch>,
    },
}

/// Parse `X,Y` into a point
pub fn parse_point(s: &str) -> Result<(i32, i32), String> {
    let (x, y) = s
        .split_once(',')
        .ok_or_else(|| format!("expected X,Y, got '{}'", s))?;
    let x = x
        .trim()
        .parse()
        .map_err(|e| format!("invalid X in '{}': {}", s, e))?;
    let y = y
        .trim()
        .parse()
        .map_err(|e| format!("invalid Y in '{}': {}", s, e))?;
    Ok((x, y))
}

//! Command-line interface definitions.
//!
//! Lives in the library so `xtask` can render man pages from it.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use clap_complete::Shell;

/// Record mouse and keyboard input and play it back.
#[derive(Debug, Parser)]
#[command(name = "macrorec", version = crate::version(), about, long_about = None)]
pub struct Cli {
    /// Increase log verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Use this config file instead of the default location
    #[arg(long, value_name = "PATH", global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Record input to a JSONL event log (press Esc to stop)
    Record {
        /// Output file (.jsonl)
        output: PathBuf,
    },

    /// Play back a recorded event log
    Play(PlayArgs),

    /// Show configuration
    #[command(subcommand)]
    Config(ConfigCommands),

    /// Generate shell completions
    Completions {
        /// Target shell
        shell: Shell,
    },
}

#[derive(Debug, Args)]
pub struct PlayArgs {
    /// Recorded .jsonl file
    pub input: PathBuf,

    /// Speed factor (e.g. 2.0 = twice as fast)
    #[arg(long, value_name = "F")]
    pub speed: Option<f64>,

    /// Play only mouse events
    #[arg(long, conflicts_with = "keyboard_only")]
    pub mouse_only: bool,

    /// Play only keyboard events
    #[arg(long)]
    pub keyboard_only: bool,

    /// Repeat until interrupted with Ctrl+C
    #[arg(long = "loop")]
    pub looping: bool,

    /// Log the events instead of injecting them
    #[arg(long)]
    pub dry_run: bool,
}

#[derive(Debug, Subcommand)]
pub enum ConfigCommands {
    /// Print the effective configuration as TOML
    Show,
    /// Print the config file location
    Path,
}

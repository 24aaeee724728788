//! macrorec library
//!
//! Records timestamped mouse and keyboard input to a line-delimited JSON
//! event log and replays it with configurable speed, filtering and looping.

use std::sync::OnceLock;

pub mod cli;
pub mod config;
pub mod event;
pub mod eventlog;
pub mod input;
pub mod player;
pub mod recorder;

pub use config::Config;
pub use event::{Button, Event, KeyRef, NamedKey};
pub use eventlog::{EventLog, LogError};
pub use player::{PlaybackOptions, PlaybackResult, Player};
pub use recorder::{RecordSummary, Recorder};

/// Version string shown by `--version`.
///
/// Dev builds append the commit hash and build date; release builds carry
/// the bare package version.
pub fn version() -> &'static str {
    static VERSION: OnceLock<String> = OnceLock::new();
    VERSION.get_or_init(|| match option_env!("VERGEN_GIT_SHA") {
        Some(sha) => format!(
            "{} ({}, {})",
            env!("CARGO_PKG_VERSION"),
            sha,
            env!("MACROREC_BUILD_DATE")
        ),
        None => env!("CARGO_PKG_VERSION").to_string(),
    })
}

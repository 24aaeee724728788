//! Player lifecycle state and results.

use std::fmt;

/// Lifecycle of a [`Player`](super::Player).
///
/// `Idle -> Loading -> (Playing -> [WaitingInterIteration -> Playing]*) -> Done`,
/// with `Interrupted` reachable from `Playing` and `WaitingInterIteration`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayerState {
    Idle,
    Loading,
    /// Replaying pass number `pass` (1-based).
    Playing { pass: u64 },
    /// Cooling down after pass `pass` before the next one.
    WaitingInterIteration { pass: u64 },
    Interrupted,
    Done,
}

impl PlayerState {
    /// Whether the player has stopped for good.
    pub fn is_terminal(&self) -> bool {
        matches!(self, PlayerState::Interrupted | PlayerState::Done)
    }
}

impl fmt::Display for PlayerState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlayerState::Idle => write!(f, "idle"),
            PlayerState::Loading => write!(f, "loading"),
            PlayerState::Playing { pass } => write!(f, "playing (pass {pass})"),
            PlayerState::WaitingInterIteration { pass } => {
                write!(f, "waiting after pass {pass}")
            }
            PlayerState::Interrupted => write!(f, "interrupted"),
            PlayerState::Done => write!(f, "done"),
        }
    }
}

/// Counters accumulated over a playback run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PlaybackStats {
    /// Passes started.
    pub passes: u64,
    /// Events handed to the input sink.
    pub dispatched: usize,
    /// Events excluded by the filter.
    pub skipped: usize,
    /// Events whose injection failed.
    pub failed: usize,
}

/// How a playback run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaybackResult {
    /// The log had no events; nothing was injected.
    Empty,
    /// All passes completed.
    Finished(PlaybackStats),
    /// Stopped by the user.
    Interrupted(PlaybackStats),
}

impl PlaybackResult {
    pub fn stats(&self) -> PlaybackStats {
        match self {
            PlaybackResult::Empty => PlaybackStats::default(),
            PlaybackResult::Finished(stats) | PlaybackResult::Interrupted(stats) => *stats,
        }
    }

    pub fn is_interrupted(&self) -> bool {
        matches!(self, PlaybackResult::Interrupted(_))
    }
}

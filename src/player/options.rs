//! Playback options.

use std::time::Duration;

use crate::event::Event;

/// Pause between passes in loop mode.
pub const DEFAULT_LOOP_PAUSE: Duration = Duration::from_secs(200);

/// Upper bound on a single sleep slice while waiting for an event.
pub const DEFAULT_TICK: Duration = Duration::from_millis(10);

/// Which events a playback pass injects.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum EventFilter {
    #[default]
    All,
    MouseOnly,
    KeyboardOnly,
}

impl EventFilter {
    /// Build a filter from the `--mouse-only` / `--keyboard-only` flags.
    pub fn from_flags(mouse_only: bool, keyboard_only: bool) -> Self {
        match (mouse_only, keyboard_only) {
            (true, false) => EventFilter::MouseOnly,
            (false, true) => EventFilter::KeyboardOnly,
            _ => EventFilter::All,
        }
    }

    pub fn admits(&self, event: &Event) -> bool {
        match self {
            EventFilter::All => true,
            EventFilter::MouseOnly => event.is_mouse(),
            EventFilter::KeyboardOnly => event.is_key(),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            EventFilter::All => "all",
            EventFilter::MouseOnly => "mouse-only",
            EventFilter::KeyboardOnly => "keyboard-only",
        }
    }
}

/// Settings for one playback run.
#[derive(Debug, Clone, PartialEq)]
pub struct PlaybackOptions {
    /// Speed multiplier (2.0 plays twice as fast).
    pub speed: f64,
    pub filter: EventFilter,
    /// Repeat until interrupted.
    pub looping: bool,
    /// Pause between passes when looping.
    pub loop_pause: Duration,
    /// Longest sleep between interrupt checks.
    pub tick: Duration,
}

impl Default for PlaybackOptions {
    fn default() -> Self {
        Self {
            speed: 1.0,
            filter: EventFilter::All,
            looping: false,
            loop_pause: DEFAULT_LOOP_PAUSE,
            tick: DEFAULT_TICK,
        }
    }
}

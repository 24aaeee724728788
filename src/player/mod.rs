//! Event log playback.
//!
//! Replays a loaded [`EventLog`] through an [`InputSink`], reproducing the
//! recorded inter-event timing scaled by a speed multiplier.
//!
//! # Usage
//!
//! ```no_run
//! use macrorec::input::DryRunSink;
//! use macrorec::player::{NeverInterrupted, PlaybackOptions, PlaybackResult, Player};
//!
//! let mut player = Player::open("macro.jsonl", PlaybackOptions::default()).unwrap();
//! let mut sink = DryRunSink::new();
//! match player.run(&mut sink, &NeverInterrupted) {
//!     PlaybackResult::Empty => println!("Nothing to play"),
//!     PlaybackResult::Finished(stats) => println!("Injected {} events", stats.dispatched),
//!     PlaybackResult::Interrupted(_) => println!("Stopped by user"),
//! }
//! ```

mod interrupt;
mod options;
mod schedule;
mod state;

use std::path::Path;
use std::time::Instant;

use unicode_normalization::UnicodeNormalization;

use crate::event::{Event, KeyRef};
use crate::eventlog::{EventLog, LogError};
use crate::input::{InjectError, InputSink};

pub use interrupt::{Interrupt, NeverInterrupted, SigintFlag};
pub use options::{EventFilter, PlaybackOptions, DEFAULT_LOOP_PAUSE, DEFAULT_TICK};
pub use schedule::{scaled_offset, wait_until, MIN_SPEED};
pub use state::{PlaybackResult, PlaybackStats, PlayerState};

/// Replays an event log.
///
/// The log is read once and never modified, so every loop pass replays
/// exactly the same sequence.
#[derive(Debug)]
pub struct Player {
    log: EventLog,
    options: PlaybackOptions,
    state: PlayerState,
}

impl Player {
    /// Create a player for an already loaded log.
    pub fn new(log: EventLog, options: PlaybackOptions) -> Self {
        Self {
            log,
            options,
            state: PlayerState::Idle,
        }
    }

    /// Load a log from `path`.
    ///
    /// Fails with [`LogError::NotFound`] when the file does not exist.
    pub fn open<P: AsRef<Path>>(path: P, options: PlaybackOptions) -> Result<Self, LogError> {
        let mut player = Self::new(EventLog::default(), options);
        player.transition(PlayerState::Loading);
        player.log = EventLog::parse(path)?;
        Ok(player)
    }

    pub fn state(&self) -> PlayerState {
        self.state
    }

    pub fn log(&self) -> &EventLog {
        &self.log
    }

    pub fn options(&self) -> &PlaybackOptions {
        &self.options
    }

    /// Play the log until it finishes or `interrupt` fires.
    ///
    /// Injection failures are logged and skipped; they never end playback.
    pub fn run(&mut self, sink: &mut dyn InputSink, interrupt: &dyn Interrupt) -> PlaybackResult {
        let Some(first) = self.log.events.first() else {
            tracing::info!("Event log is empty, nothing to play");
            self.transition(PlayerState::Done);
            return PlaybackResult::Empty;
        };
        let base = first.t();
        let mut stats = PlaybackStats::default();

        loop {
            stats.passes += 1;
            let pass = stats.passes;
            self.transition(PlayerState::Playing { pass });

            if !play_pass(&self.log, &self.options, base, sink, interrupt, &mut stats) {
                return self.interrupted(stats);
            }
            tracing::info!("Pass {} complete ({} events injected so far)", pass, stats.dispatched);

            if !self.options.looping {
                break;
            }

            self.transition(PlayerState::WaitingInterIteration { pass });
            tracing::info!(
                "Waiting {}s before the next pass",
                self.options.loop_pause.as_secs_f64()
            );
            if !wait_until(
                Instant::now(),
                self.options.loop_pause,
                self.options.tick,
                interrupt,
            ) {
                return self.interrupted(stats);
            }
        }

        self.transition(PlayerState::Done);
        PlaybackResult::Finished(stats)
    }

    fn interrupted(&mut self, stats: PlaybackStats) -> PlaybackResult {
        self.transition(PlayerState::Interrupted);
        PlaybackResult::Interrupted(stats)
    }

    fn transition(&mut self, next: PlayerState) {
        tracing::debug!("Player state: {} -> {}", self.state, next);
        self.state = next;
    }
}

/// Replay every event once. Returns `false` if interrupted.
fn play_pass(
    log: &EventLog,
    options: &PlaybackOptions,
    base: f64,
    sink: &mut dyn InputSink,
    interrupt: &dyn Interrupt,
    stats: &mut PlaybackStats,
) -> bool {
    // Fresh baseline per pass so drift never carries over
    let start = Instant::now();

    for event in &log.events {
        let target = scaled_offset(event.t(), base, options.speed);
        if !wait_until(start, target, options.tick, interrupt) {
            return false;
        }

        if !options.filter.admits(event) {
            stats.skipped += 1;
            continue;
        }

        match dispatch(event, sink) {
            Ok(()) => stats.dispatched += 1,
            Err(e) => {
                stats.failed += 1;
                tracing::warn!("Skipping event {}: {}", event, e);
            }
        }
    }

    true
}

/// Inject one event.
///
/// Character keys are typed atomically on press; their release injects
/// nothing. A key name outside the vocabulary fails with
/// [`InjectError::UnknownKey`].
pub fn dispatch(event: &Event, sink: &mut dyn InputSink) -> Result<(), InjectError> {
    match event {
        Event::Move { x, y, .. } => sink.move_to(*x, *y),
        Event::Click {
            x,
            y,
            button,
            pressed,
            ..
        } => {
            sink.move_to(*x, *y)?;
            if *pressed {
                sink.press_button(*button)
            } else {
                sink.release_button(*button)
            }
        }
        Event::Scroll { dx, dy, .. } => sink.scroll(*dx, *dy),
        Event::Key { pressed, key, .. } => match key {
            KeyRef::Char(c) if *pressed => {
                let text: String = std::iter::once(*c).nfc().collect();
                sink.type_text(&text)
            }
            KeyRef::Text(text) if *pressed => {
                let text: String = text.nfc().collect();
                sink.type_text(&text)
            }
            KeyRef::Char(_) | KeyRef::Text(_) => Ok(()),
            KeyRef::Named(named) if *pressed => sink.press_key(*named),
            KeyRef::Named(named) => sink.release_key(*named),
            KeyRef::Unknown(name) => Err(InjectError::UnknownKey(name.clone())),
        },
    }
}

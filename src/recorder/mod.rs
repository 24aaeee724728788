//! Input recording.
//!
//! The recorder subscribes to the host's mouse/keyboard channel and, on a
//! separate channel, to the global stop hotkey (`esc`). Listeners append to a
//! shared [`EventBuffer`]; the calling thread polls a stop flag. When the
//! flag is set, or a listener dies, all listeners are stopped best-effort and
//! the buffered events are returned (or written to disk by
//! [`Recorder::record_to`]).

mod buffer;

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use anyhow::{Context, Result};

use crate::event::NamedKey;
use crate::eventlog::EventLog;
use crate::input::{HotkeySource, InputSource, Listener};

pub use buffer::EventBuffer;

/// Hotkey that ends a recording session.
pub const STOP_KEY: NamedKey = NamedKey::Esc;

/// Recorder tuning.
#[derive(Debug, Clone, PartialEq)]
pub struct RecorderConfig {
    /// How often the main loop checks the stop flag.
    pub poll_interval: Duration,
}

impl Default for RecorderConfig {
    fn default() -> Self {
        Self {
            poll_interval: Duration::from_millis(10),
        }
    }
}

/// Outcome of a recording written to disk.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordSummary {
    pub events: usize,
    pub path: PathBuf,
    pub bytes: u64,
}

/// Records host input until the stop hotkey fires.
#[derive(Debug, Clone, Default)]
pub struct Recorder {
    config: RecorderConfig,
}

impl Recorder {
    pub fn new(config: RecorderConfig) -> Self {
        Self { config }
    }

    /// Record until the stop hotkey is pressed or `stop` is set externally.
    ///
    /// Listener shutdown failures are logged and ignored.
    pub fn record(
        &self,
        source: &dyn InputSource,
        hotkeys: &dyn HotkeySource,
        stop: Arc<AtomicBool>,
    ) -> Result<EventLog> {
        let (log, started) = self.capture(source, hotkeys, &stop);
        started?;
        Ok(log)
    }

    /// Record and write the log to `path`.
    ///
    /// The log is written even when a listener failed to start, so input
    /// captured before the failure is kept.
    pub fn record_to(
        &self,
        path: &Path,
        source: &dyn InputSource,
        hotkeys: &dyn HotkeySource,
        stop: Arc<AtomicBool>,
    ) -> Result<RecordSummary> {
        let (log, started) = self.capture(source, hotkeys, &stop);
        let bytes = log
            .write(path)
            .with_context(|| format!("Failed to write recording to {}", path.display()))?;
        started?;

        Ok(RecordSummary {
            events: log.len(),
            path: path.to_path_buf(),
            bytes,
        })
    }

    /// Run one capture session. Always returns what was buffered, alongside
    /// the listener start-up result.
    fn capture(
        &self,
        source: &dyn InputSource,
        hotkeys: &dyn HotkeySource,
        stop: &Arc<AtomicBool>,
    ) -> (EventLog, Result<()>) {
        let buffer = Arc::new(EventBuffer::new());
        let mut listeners: Vec<Box<dyn Listener>> = Vec::new();

        let started = self.start_listeners(source, hotkeys, &buffer, stop, &mut listeners);
        if started.is_ok() {
            tracing::info!("Recording started, press {} to stop", STOP_KEY);
            self.wait_for_stop(stop, &listeners);
        }

        // Hotkey first, then the capture channel
        for listener in listeners.iter_mut().rev() {
            if let Err(e) = listener.stop() {
                tracing::debug!("Ignoring listener shutdown failure: {}", e);
            }
        }

        let events = buffer.drain();
        tracing::info!("Recording stopped with {} events", events.len());
        (EventLog::new(events), started)
    }

    fn start_listeners(
        &self,
        source: &dyn InputSource,
        hotkeys: &dyn HotkeySource,
        buffer: &Arc<EventBuffer>,
        stop: &Arc<AtomicBool>,
        listeners: &mut Vec<Box<dyn Listener>>,
    ) -> Result<()> {
        let sink = Arc::clone(buffer);
        let capture = source
            .subscribe(Box::new(move |notification| sink.append(notification)))
            .context("Failed to subscribe to input events")?;
        listeners.push(capture);

        let flag = Arc::clone(stop);
        let hotkey = hotkeys
            .register(
                STOP_KEY,
                Box::new(move || {
                    flag.store(true, Ordering::SeqCst);
                }),
            )
            .context("Failed to register stop hotkey")?;
        listeners.push(hotkey);

        Ok(())
    }

    fn wait_for_stop(&self, stop: &AtomicBool, listeners: &[Box<dyn Listener>]) {
        while !stop.load(Ordering::SeqCst) {
            if listeners.iter().any(|l| !l.is_running()) {
                tracing::warn!("Input listener terminated unexpectedly, stopping recording");
                break;
            }
            thread::sleep(self.config.poll_interval);
        }
    }
}

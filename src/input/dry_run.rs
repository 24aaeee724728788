//! Injection sink that only logs what it would do.

use crate::event::{Button, NamedKey};

use super::{InjectError, InputSink};

/// An [`InputSink`] that records nothing on the host and logs every call.
#[derive(Debug, Default)]
pub struct DryRunSink {
    injected: usize,
}

impl DryRunSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of injections performed so far.
    pub fn injected(&self) -> usize {
        self.injected
    }

    fn note(&mut self, action: std::fmt::Arguments<'_>) -> Result<(), InjectError> {
        self.injected += 1;
        tracing::info!(target: "macrorec::dry_run", "{}", action);
        Ok(())
    }
}

impl InputSink for DryRunSink {
    fn move_to(&mut self, x: i32, y: i32) -> Result<(), InjectError> {
        self.note(format_args!("move pointer to ({x}, {y})"))
    }

    fn press_button(&mut self, button: Button) -> Result<(), InjectError> {
        self.note(format_args!("press {button} button"))
    }

    fn release_button(&mut self, button: Button) -> Result<(), InjectError> {
        self.note(format_args!("release {button} button"))
    }

    fn scroll(&mut self, dx: i32, dy: i32) -> Result<(), InjectError> {
        self.note(format_args!("scroll by ({dx}, {dy})"))
    }

    fn press_key(&mut self, key: NamedKey) -> Result<(), InjectError> {
        self.note(format_args!("press <{key}>"))
    }

    fn release_key(&mut self, key: NamedKey) -> Result<(), InjectError> {
        self.note(format_args!("release <{key}>"))
    }

    fn type_text(&mut self, text: &str) -> Result<(), InjectError> {
        self.note(format_args!("type {text:?}"))
    }
}

//! Boundary between the recorder/player and the host input system.
//!
//! The host provides two capabilities:
//!
//! - Subscription: an [`InputSource`] delivers mouse and keyboard
//!   notifications, and a separate [`HotkeySource`] delivers global hotkeys.
//!   The two are independent channels so the stop hotkey keeps working while
//!   the regular keyboard path is busy.
//! - Injection: an [`InputSink`] synthesizes pointer, button, wheel and key
//!   events.
//!
//! [`DryRunSink`] logs injections instead of performing them. The `native`
//! feature adds an `rdev`-backed implementation of all three traits.

mod dry_run;
mod error;
#[cfg(feature = "native")]
pub mod native;

use crate::event::{Button, KeyRef, NamedKey};

pub use dry_run::DryRunSink;
pub use error::{InjectError, ListenerError};

/// Key identity as reported by the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NativeKey {
    /// A character key. `None` when the host could not resolve a character.
    Code(Option<char>),
    /// A control/modifier key.
    Named(NamedKey),
}

impl From<NativeKey> for KeyRef {
    fn from(key: NativeKey) -> Self {
        match key {
            NativeKey::Code(c) => KeyRef::from_char(c),
            NativeKey::Named(name) => KeyRef::Named(name),
        }
    }
}

/// A raw notification from the host input system.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputNotification {
    Move {
        x: f64,
        y: f64,
    },
    Click {
        x: f64,
        y: f64,
        button: Button,
        pressed: bool,
    },
    Scroll {
        x: f64,
        y: f64,
        dx: i64,
        dy: i64,
    },
    Key {
        pressed: bool,
        key: NativeKey,
    },
}

/// Callback invoked for every mouse/keyboard notification.
pub type InputHandler = Box<dyn Fn(InputNotification) + Send + Sync>;

/// Callback invoked when a registered hotkey fires.
pub type HotkeyHandler = Box<dyn Fn() + Send + Sync>;

/// A running subscription.
pub trait Listener: Send {
    /// Stop delivering notifications.
    fn stop(&mut self) -> Result<(), ListenerError>;

    /// False once the subscription terminated on its own (e.g. the host
    /// listener thread failed).
    fn is_running(&self) -> bool {
        true
    }
}

/// Mouse and keyboard notification channel.
pub trait InputSource {
    fn subscribe(&self, handler: InputHandler) -> Result<Box<dyn Listener>, ListenerError>;
}

/// Global hotkey channel, independent of [`InputSource`].
pub trait HotkeySource {
    fn register(
        &self,
        key: NamedKey,
        handler: HotkeyHandler,
    ) -> Result<Box<dyn Listener>, ListenerError>;
}

/// Synthetic input injection.
pub trait InputSink {
    fn move_to(&mut self, x: i32, y: i32) -> Result<(), InjectError>;

    fn press_button(&mut self, button: Button) -> Result<(), InjectError>;

    fn release_button(&mut self, button: Button) -> Result<(), InjectError>;

    fn scroll(&mut self, dx: i32, dy: i32) -> Result<(), InjectError>;

    fn press_key(&mut self, key: NamedKey) -> Result<(), InjectError>;

    fn release_key(&mut self, key: NamedKey) -> Result<(), InjectError>;

    /// Type text as a single atomic press+release per character.
    fn type_text(&mut self, text: &str) -> Result<(), InjectError>;
}

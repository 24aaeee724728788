//! Input capture and injection errors.

use crate::event::NamedKey;

/// Errors raised while injecting a synthetic input event.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InjectError {
    #[error("Key '{0}' cannot be injected on this host")]
    UnsupportedKey(NamedKey),

    #[error("Unknown key name '{0}'")]
    UnknownKey(String),

    #[error("Character {0:?} cannot be typed on this host")]
    UnsupportedChar(char),

    #[error("Input backend failed: {0}")]
    Backend(String),
}

/// Errors raised while starting or stopping an input subscription.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ListenerError {
    #[error("Failed to start input listener: {0}")]
    Start(String),

    #[error("Failed to stop input listener: {0}")]
    Stop(String),
}

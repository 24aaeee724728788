//! Recorded input events.
//!
//! Each event is stored as one JSON object whose `type` field selects the
//! variant, and whose `t` field is the offset in seconds from the start of
//! the recording session:
//!
//! ```text
//! {"type":"move","t":0.0,"x":10,"y":20}
//! {"type":"click","t":0.5,"x":10,"y":20,"button":"left","pressed":true}
//! {"type":"scroll","t":0.8,"x":10,"y":20,"dx":0,"dy":-1}
//! {"type":"key","t":1.2,"pressed":true,"key":{"type":"KeyCode","char":"a"}}
//! ```

mod key;

use std::fmt;

use serde::{Deserialize, Serialize};

pub use key::{KeyRef, NamedKey, UnknownKeyName};

/// Mouse buttons that can be recorded and replayed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Button {
    Left,
    Right,
    Middle,
}

impl Button {
    pub fn as_str(&self) -> &'static str {
        match self {
            Button::Left => "left",
            Button::Right => "right",
            Button::Middle => "middle",
        }
    }
}

impl fmt::Display for Button {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single recorded input event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Event {
    /// Pointer moved to an absolute position.
    Move { t: f64, x: i32, y: i32 },
    /// Mouse button pressed or released at a position.
    Click {
        t: f64,
        x: i32,
        y: i32,
        button: Button,
        pressed: bool,
    },
    /// Wheel scrolled by a relative delta at a position.
    Scroll {
        t: f64,
        x: i32,
        y: i32,
        dx: i32,
        dy: i32,
    },
    /// Key pressed or released.
    Key { t: f64, pressed: bool, key: KeyRef },
}

impl Event {
    /// Seconds since the start of the recording session.
    pub fn t(&self) -> f64 {
        match self {
            Event::Move { t, .. }
            | Event::Click { t, .. }
            | Event::Scroll { t, .. }
            | Event::Key { t, .. } => *t,
        }
    }

    pub fn is_key(&self) -> bool {
        matches!(self, Event::Key { .. })
    }

    pub fn is_mouse(&self) -> bool {
        !self.is_key()
    }

    /// Wire name of the event type.
    pub fn kind(&self) -> &'static str {
        match self {
            Event::Move { .. } => "move",
            Event::Click { .. } => "click",
            Event::Scroll { .. } => "scroll",
            Event::Key { .. } => "key",
        }
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Event::Move { t, x, y } => write!(f, "{t:.6}s move ({x}, {y})"),
            Event::Click {
                t,
                x,
                y,
                button,
                pressed,
            } => {
                let action = if *pressed { "press" } else { "release" };
                write!(f, "{t:.6}s {action} {button} at ({x}, {y})")
            }
            Event::Scroll { t, dx, dy, .. } => write!(f, "{t:.6}s scroll ({dx}, {dy})"),
            Event::Key { t, pressed, key } => {
                let action = if *pressed { "press" } else { "release" };
                write!(f, "{t:.6}s {action} key {key}")
            }
        }
    }
}

/// Round a duration in seconds to microsecond precision.
pub fn round_micros(secs: f64) -> f64 {
    (secs * 1_000_000.0).round() / 1_000_000.0
}

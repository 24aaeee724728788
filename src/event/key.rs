//! Key identities as they appear in the event log.
//!
//! A key is either a typed character (`KeyCode` on the wire) or a named
//! control/modifier key (`Key` on the wire):
//!
//! ```text
//! {"type":"KeyCode","char":"é"}
//! {"type":"Key","name":"shift"}
//! ```

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Generates the `NamedKey` enum together with its wire-name table.
macro_rules! named_keys {
    ($($variant:ident => $name:literal),+ $(,)?) => {
        /// Control, modifier and function keys that have no printable character.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum NamedKey {
            $($variant),+
        }

        impl NamedKey {
            /// Every key in the vocabulary, in declaration order.
            pub const ALL: &'static [NamedKey] = &[$(NamedKey::$variant),+];

            /// Wire name of this key.
            pub fn as_str(&self) -> &'static str {
                match self {
                    $(NamedKey::$variant => $name),+
                }
            }
        }

        impl FromStr for NamedKey {
            type Err = UnknownKeyName;

            fn from_str(name: &str) -> Result<Self, Self::Err> {
                match name {
                    $($name => Ok(NamedKey::$variant),)+
                    _ => Err(UnknownKeyName(name.to_string())),
                }
            }
        }
    };
}

named_keys! {
    Alt => "alt",
    AltL => "alt_l",
    AltR => "alt_r",
    AltGr => "alt_gr",
    Backspace => "backspace",
    CapsLock => "caps_lock",
    Cmd => "cmd",
    CmdL => "cmd_l",
    CmdR => "cmd_r",
    Ctrl => "ctrl",
    CtrlL => "ctrl_l",
    CtrlR => "ctrl_r",
    Delete => "delete",
    Down => "down",
    End => "end",
    Enter => "enter",
    Esc => "esc",
    F1 => "f1",
    F2 => "f2",
    F3 => "f3",
    F4 => "f4",
    F5 => "f5",
    F6 => "f6",
    F7 => "f7",
    F8 => "f8",
    F9 => "f9",
    F10 => "f10",
    F11 => "f11",
    F12 => "f12",
    F13 => "f13",
    F14 => "f14",
    F15 => "f15",
    F16 => "f16",
    F17 => "f17",
    F18 => "f18",
    F19 => "f19",
    F20 => "f20",
    Home => "home",
    Insert => "insert",
    Left => "left",
    MediaNext => "media_next",
    MediaPlayPause => "media_play_pause",
    MediaPrevious => "media_previous",
    MediaVolumeDown => "media_volume_down",
    MediaVolumeMute => "media_volume_mute",
    MediaVolumeUp => "media_volume_up",
    Menu => "menu",
    NumLock => "num_lock",
    PageDown => "page_down",
    PageUp => "page_up",
    Pause => "pause",
    PrintScreen => "print_screen",
    Right => "right",
    ScrollLock => "scroll_lock",
    Shift => "shift",
    ShiftL => "shift_l",
    ShiftR => "shift_r",
    Space => "space",
    Tab => "tab",
    Up => "up",
}

impl fmt::Display for NamedKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A key name outside the `NamedKey` vocabulary.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown key name: {0:?}")]
pub struct UnknownKeyName(pub String);

/// Identity of a pressed or released key.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "WireKey", into = "WireKey")]
pub enum KeyRef {
    /// A key that produces a single character.
    Char(char),
    /// A character key whose recorded text spans several characters
    /// (dead-key compositions, IME output).
    Text(String),
    /// A control/modifier key.
    Named(NamedKey),
    /// A key name outside the vocabulary. Kept so the log still loads and
    /// round-trips; it fails at dispatch.
    Unknown(String),
}

impl KeyRef {
    /// Key used when a character key carries no character.
    pub const FALLBACK: KeyRef = KeyRef::Named(NamedKey::Esc);

    /// Build a `KeyRef` from an optional character, falling back to `esc`.
    pub fn from_char(c: Option<char>) -> Self {
        c.map(KeyRef::Char).unwrap_or(Self::FALLBACK)
    }

    /// Build a `KeyRef` from recorded character text.
    pub fn from_text(text: &str) -> Self {
        let mut chars = text.chars();
        match (chars.next(), chars.next()) {
            (None, _) => Self::FALLBACK,
            (Some(c), None) => KeyRef::Char(c),
            (Some(_), Some(_)) => KeyRef::Text(text.to_string()),
        }
    }

    /// Build a `KeyRef` from a key name, keeping names outside the vocabulary.
    pub fn from_name(name: &str) -> Self {
        match name.parse() {
            Ok(named) => KeyRef::Named(named),
            Err(UnknownKeyName(name)) => KeyRef::Unknown(name),
        }
    }
}

impl fmt::Display for KeyRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            KeyRef::Char(c) => write!(f, "{:?}", c),
            KeyRef::Text(text) => write!(f, "{:?}", text),
            KeyRef::Named(key) => write!(f, "<{}>", key),
            KeyRef::Unknown(name) => write!(f, "<{}?>", name),
        }
    }
}

#[derive(Serialize, Deserialize)]
#[serde(tag = "type")]
enum WireKey {
    KeyCode {
        #[serde(default)]
        char: Option<String>,
    },
    Key {
        name: String,
    },
}

impl From<WireKey> for KeyRef {
    fn from(wire: WireKey) -> Self {
        match wire {
            WireKey::KeyCode { char: None } => KeyRef::FALLBACK,
            WireKey::KeyCode { char: Some(text) } => KeyRef::from_text(&text),
            WireKey::Key { name } => KeyRef::from_name(&name),
        }
    }
}

impl From<KeyRef> for WireKey {
    fn from(key: KeyRef) -> Self {
        match key {
            KeyRef::Char(c) => WireKey::KeyCode {
                char: Some(c.to_string()),
            },
            KeyRef::Text(text) => WireKey::KeyCode { char: Some(text) },
            KeyRef::Named(name) => WireKey::Key {
                name: name.as_str().to_string(),
            },
            KeyRef::Unknown(name) => WireKey::Key { name },
        }
    }
}

//! Translation between rdev keys and the log's key vocabulary.
//!
//! Character typing goes through a US-layout table; characters outside it
//! cannot be injected with rdev and are reported as unsupported.

use rdev::Key;

use crate::event::NamedKey;

/// Named key for an rdev key, if it has no printable character.
pub fn named_from_rdev(key: Key) -> Option<NamedKey> {
    let named = match key {
        Key::Alt => NamedKey::Alt,
        Key::AltGr => NamedKey::AltGr,
        Key::Backspace => NamedKey::Backspace,
        Key::CapsLock => NamedKey::CapsLock,
        Key::ControlLeft => NamedKey::Ctrl,
        Key::ControlRight => NamedKey::CtrlR,
        Key::Delete | Key::KpDelete => NamedKey::Delete,
        Key::DownArrow => NamedKey::Down,
        Key::End => NamedKey::End,
        Key::Escape => NamedKey::Esc,
        Key::F1 => NamedKey::F1,
        Key::F2 => NamedKey::F2,
        Key::F3 => NamedKey::F3,
        Key::F4 => NamedKey::F4,
        Key::F5 => NamedKey::F5,
        Key::F6 => NamedKey::F6,
        Key::F7 => NamedKey::F7,
        Key::F8 => NamedKey::F8,
        Key::F9 => NamedKey::F9,
        Key::F10 => NamedKey::F10,
        Key::F11 => NamedKey::F11,
        Key::F12 => NamedKey::F12,
        Key::Home => NamedKey::Home,
        Key::Insert => NamedKey::Insert,
        Key::LeftArrow => NamedKey::Left,
        Key::MetaLeft => NamedKey::Cmd,
        Key::MetaRight => NamedKey::CmdR,
        Key::NumLock => NamedKey::NumLock,
        Key::PageDown => NamedKey::PageDown,
        Key::PageUp => NamedKey::PageUp,
        Key::Pause => NamedKey::Pause,
        Key::PrintScreen => NamedKey::PrintScreen,
        Key::Return | Key::KpReturn => NamedKey::Enter,
        Key::RightArrow => NamedKey::Right,
        Key::ScrollLock => NamedKey::ScrollLock,
        Key::ShiftLeft => NamedKey::Shift,
        Key::ShiftRight => NamedKey::ShiftR,
        Key::Space => NamedKey::Space,
        Key::Tab => NamedKey::Tab,
        Key::UpArrow => NamedKey::Up,
        _ => return None,
    };
    Some(named)
}

/// rdev key used to inject a named key.
pub fn rdev_from_named(key: NamedKey) -> Option<Key> {
    let rdev_key = match key {
        NamedKey::Alt | NamedKey::AltL => Key::Alt,
        NamedKey::AltR | NamedKey::AltGr => Key::AltGr,
        NamedKey::Backspace => Key::Backspace,
        NamedKey::CapsLock => Key::CapsLock,
        NamedKey::Cmd | NamedKey::CmdL => Key::MetaLeft,
        NamedKey::CmdR => Key::MetaRight,
        NamedKey::Ctrl | NamedKey::CtrlL => Key::ControlLeft,
        NamedKey::CtrlR => Key::ControlRight,
        NamedKey::Delete => Key::Delete,
        NamedKey::Down => Key::DownArrow,
        NamedKey::End => Key::End,
        NamedKey::Enter => Key::Return,
        NamedKey::Esc => Key::Escape,
        NamedKey::F1 => Key::F1,
        NamedKey::F2 => Key::F2,
        NamedKey::F3 => Key::F3,
        NamedKey::F4 => Key::F4,
        NamedKey::F5 => Key::F5,
        NamedKey::F6 => Key::F6,
        NamedKey::F7 => Key::F7,
        NamedKey::F8 => Key::F8,
        NamedKey::F9 => Key::F9,
        NamedKey::F10 => Key::F10,
        NamedKey::F11 => Key::F11,
        NamedKey::F12 => Key::F12,
        NamedKey::Home => Key::Home,
        NamedKey::Insert => Key::Insert,
        NamedKey::Left => Key::LeftArrow,
        NamedKey::NumLock => Key::NumLock,
        NamedKey::PageDown => Key::PageDown,
        NamedKey::PageUp => Key::PageUp,
        NamedKey::Pause => Key::Pause,
        NamedKey::PrintScreen => Key::PrintScreen,
        NamedKey::Right => Key::RightArrow,
        NamedKey::ScrollLock => Key::ScrollLock,
        NamedKey::Shift | NamedKey::ShiftL => Key::ShiftLeft,
        NamedKey::ShiftR => Key::ShiftRight,
        NamedKey::Space => Key::Space,
        NamedKey::Tab => Key::Tab,
        NamedKey::Up => Key::UpArrow,
        // No rdev equivalent
        NamedKey::F13
        | NamedKey::F14
        | NamedKey::F15
        | NamedKey::F16
        | NamedKey::F17
        | NamedKey::F18
        | NamedKey::F19
        | NamedKey::F20
        | NamedKey::MediaNext
        | NamedKey::MediaPlayPause
        | NamedKey::MediaPrevious
        | NamedKey::MediaVolumeDown
        | NamedKey::MediaVolumeMute
        | NamedKey::MediaVolumeUp
        | NamedKey::Menu => return None,
    };
    Some(rdev_key)
}

/// (unshifted, shifted, key) rows of the US layout.
const US_LAYOUT: &[(char, char, Key)] = &[
    ('`', '~', Key::BackQuote),
    ('1', '!', Key::Num1),
    ('2', '@', Key::Num2),
    ('3', '#', Key::Num3),
    ('4', '$', Key::Num4),
    ('5', '%', Key::Num5),
    ('6', '^', Key::Num6),
    ('7', '&', Key::Num7),
    ('8', '*', Key::Num8),
    ('9', '(', Key::Num9),
    ('0', ')', Key::Num0),
    ('-', '_', Key::Minus),
    ('=', '+', Key::Equal),
    ('q', 'Q', Key::KeyQ),
    ('w', 'W', Key::KeyW),
    ('e', 'E', Key::KeyE),
    ('r', 'R', Key::KeyR),
    ('t', 'T', Key::KeyT),
    ('y', 'Y', Key::KeyY),
    ('u', 'U', Key::KeyU),
    ('i', 'I', Key::KeyI),
    ('o', 'O', Key::KeyO),
    ('p', 'P', Key::KeyP),
    ('[', '{', Key::LeftBracket),
    (']', '}', Key::RightBracket),
    ('\\', '|', Key::BackSlash),
    ('a', 'A', Key::KeyA),
    ('s', 'S', Key::KeyS),
    ('d', 'D', Key::KeyD),
    ('f', 'F', Key::KeyF),
    ('g', 'G', Key::KeyG),
    ('h', 'H', Key::KeyH),
    ('j', 'J', Key::KeyJ),
    ('k', 'K', Key::KeyK),
    ('l', 'L', Key::KeyL),
    (';', ':', Key::SemiColon),
    ('\'', '"', Key::Quote),
    ('z', 'Z', Key::KeyZ),
    ('x', 'X', Key::KeyX),
    ('c', 'C', Key::KeyC),
    ('v', 'V', Key::KeyV),
    ('b', 'B', Key::KeyB),
    ('n', 'N', Key::KeyN),
    ('m', 'M', Key::KeyM),
    (',', '<', Key::Comma),
    ('.', '>', Key::Dot),
    ('/', '?', Key::Slash),
];

/// Key and shift state that types `c`, if the layout has it.
pub fn keystroke_for(c: char) -> Option<(Key, bool)> {
    US_LAYOUT.iter().find_map(|&(plain, shifted, key)| {
        if c == plain {
            Some((key, false))
        } else if c == shifted {
            Some((key, true))
        } else {
            None
        }
    })
}

/// Unshifted character for a character key, used when the host reports no
/// typed text (key releases).
pub fn char_for(key: Key) -> Option<char> {
    let c = match key {
        Key::Kp0 => '0',
        Key::Kp1 => '1',
        Key::Kp2 => '2',
        Key::Kp3 => '3',
        Key::Kp4 => '4',
        Key::Kp5 => '5',
        Key::Kp6 => '6',
        Key::Kp7 => '7',
        Key::Kp8 => '8',
        Key::Kp9 => '9',
        Key::KpMinus => '-',
        Key::KpPlus => '+',
        Key::KpMultiply => '*',
        Key::KpDivide => '/',
        other => {
            return US_LAYOUT
                .iter()
                .find(|&&(_, _, k)| k == other)
                .map(|&(plain, _, _)| plain)
        }
    };
    Some(c)
}

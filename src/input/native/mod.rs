//! rdev-backed input capture and injection.
//!
//! `rdev::listen` can only run once per process and never returns on
//! success, so a single listener thread is started lazily and fans events
//! out to every registered subscriber. Hotkey subscribers are kept in their
//! own table and served before regular input subscribers.

mod keymap;

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, Once, OnceLock};
use std::thread;

use rdev::{EventType, Key};

use crate::event::{Button, NamedKey};

use super::{
    HotkeyHandler, HotkeySource, InjectError, InputHandler, InputNotification, InputSink,
    InputSource, Listener, ListenerError, NativeKey,
};

/// Process-wide fan-out from the single rdev listener.
///
/// rdev allows one `listen` per process, so the hotkey table is kept apart
/// from the input table but shares the listener thread. Hotkeys are served
/// first on each key press.
struct Hub {
    inputs: Mutex<Vec<(u64, Arc<InputHandler>)>>,
    hotkeys: Mutex<Vec<(u64, NamedKey, Arc<HotkeyHandler>)>>,
    next_id: AtomicU64,
    failed: AtomicBool,
    started: Once,
}

fn hub() -> &'static Hub {
    static HUB: OnceLock<Hub> = OnceLock::new();
    HUB.get_or_init(|| Hub {
        inputs: Mutex::new(Vec::new()),
        hotkeys: Mutex::new(Vec::new()),
        next_id: AtomicU64::new(1),
        failed: AtomicBool::new(false),
        started: Once::new(),
    })
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

impl Hub {
    fn ensure_started(&'static self) -> Result<(), ListenerError> {
        let mut spawn_error = None;
        self.started.call_once(|| {
            let spawned = thread::Builder::new()
                .name("macrorec-listen".to_string())
                .spawn(move || {
                    let mut pointer = (0.0f64, 0.0f64);
                    let result = rdev::listen(move |event| {
                        self.dispatch(&mut pointer, event);
                    });
                    if let Err(e) = result {
                        tracing::error!("Input listener stopped: {:?}", e);
                    }
                    self.failed.store(true, Ordering::SeqCst);
                });
            if let Err(e) = spawned {
                self.failed.store(true, Ordering::SeqCst);
                spawn_error = Some(ListenerError::Start(e.to_string()));
            }
        });

        match spawn_error {
            Some(e) => Err(e),
            None if self.failed.load(Ordering::SeqCst) => Err(ListenerError::Start(
                "input listener is not running".to_string(),
            )),
            None => Ok(()),
        }
    }

    fn dispatch(&self, pointer: &mut (f64, f64), event: rdev::Event) {
        let notification = match event.event_type {
            EventType::MouseMove { x, y } => {
                *pointer = (x, y);
                InputNotification::Move { x, y }
            }
            EventType::ButtonPress(button) | EventType::ButtonRelease(button) => {
                let Some(button) = button_from_rdev(button) else {
                    tracing::debug!("Ignoring unsupported mouse button {:?}", button);
                    return;
                };
                InputNotification::Click {
                    x: pointer.0,
                    y: pointer.1,
                    button,
                    pressed: matches!(event.event_type, EventType::ButtonPress(_)),
                }
            }
            EventType::Wheel { delta_x, delta_y } => InputNotification::Scroll {
                x: pointer.0,
                y: pointer.1,
                dx: delta_x,
                dy: delta_y,
            },
            EventType::KeyPress(key) => {
                let key = native_key(key, event.name.as_deref());
                self.fire_hotkeys(key);
                InputNotification::Key { pressed: true, key }
            }
            EventType::KeyRelease(key) => InputNotification::Key {
                pressed: false,
                key: native_key(key, event.name.as_deref()),
            },
        };

        let handlers: Vec<Arc<InputHandler>> =
            lock(&self.inputs).iter().map(|(_, h)| Arc::clone(h)).collect();
        for handler in handlers {
            handler(notification);
        }
    }

    fn fire_hotkeys(&self, key: NativeKey) {
        let NativeKey::Named(pressed) = key else {
            return;
        };
        let handlers: Vec<Arc<HotkeyHandler>> = lock(&self.hotkeys)
            .iter()
            .filter(|(_, k, _)| *k == pressed)
            .map(|(_, _, h)| Arc::clone(h))
            .collect();
        for handler in handlers {
            handler();
        }
    }

    fn next_id(&self) -> u64 {
        self.next_id.fetch_add(1, Ordering::Relaxed)
    }
}

fn button_from_rdev(button: rdev::Button) -> Option<Button> {
    match button {
        rdev::Button::Left => Some(Button::Left),
        rdev::Button::Right => Some(Button::Right),
        rdev::Button::Middle => Some(Button::Middle),
        rdev::Button::Unknown(_) => None,
    }
}

fn button_to_rdev(button: Button) -> rdev::Button {
    match button {
        Button::Left => rdev::Button::Left,
        Button::Right => rdev::Button::Right,
        Button::Middle => rdev::Button::Middle,
    }
}

/// Resolve an rdev key to the log vocabulary. Typed text reported by the
/// host wins over the layout table.
fn native_key(key: Key, name: Option<&str>) -> NativeKey {
    if let Some(named) = keymap::named_from_rdev(key) {
        return NativeKey::Named(named);
    }

    let typed = name.and_then(|name| {
        let mut chars = name.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) if !c.is_control() => Some(c),
            _ => None,
        }
    });
    NativeKey::Code(typed.or_else(|| keymap::char_for(key)))
}

#[derive(Debug, Clone, Copy)]
enum Channel {
    Input,
    Hotkey,
}

/// Subscription handle on the shared rdev listener.
pub struct NativeListener {
    id: u64,
    channel: Channel,
    stopped: bool,
}

impl Listener for NativeListener {
    fn stop(&mut self) -> Result<(), ListenerError> {
        if self.stopped {
            return Ok(());
        }
        let hub = hub();
        match self.channel {
            Channel::Input => lock(&hub.inputs).retain(|(id, _)| *id != self.id),
            Channel::Hotkey => lock(&hub.hotkeys).retain(|(id, _, _)| *id != self.id),
        }
        self.stopped = true;
        Ok(())
    }

    fn is_running(&self) -> bool {
        !self.stopped && !hub().failed.load(Ordering::SeqCst)
    }
}

/// Host input through rdev: subscription, global hotkeys and injection.
#[derive(Debug, Default)]
pub struct NativeInput;

impl NativeInput {
    pub fn new() -> Self {
        Self
    }

    fn simulate(&self, event: &EventType) -> Result<(), InjectError> {
        rdev::simulate(event).map_err(|e| InjectError::Backend(format!("{:?}", e)))
    }
}

impl InputSource for NativeInput {
    fn subscribe(&self, handler: InputHandler) -> Result<Box<dyn Listener>, ListenerError> {
        let hub = hub();
        let id = hub.next_id();
        lock(&hub.inputs).push((id, Arc::new(handler)));
        hub.ensure_started()?;
        Ok(Box::new(NativeListener {
            id,
            channel: Channel::Input,
            stopped: false,
        }))
    }
}

impl HotkeySource for NativeInput {
    fn register(
        &self,
        key: NamedKey,
        handler: HotkeyHandler,
    ) -> Result<Box<dyn Listener>, ListenerError> {
        let hub = hub();
        let id = hub.next_id();
        lock(&hub.hotkeys).push((id, key, Arc::new(handler)));
        hub.ensure_started()?;
        Ok(Box::new(NativeListener {
            id,
            channel: Channel::Hotkey,
            stopped: false,
        }))
    }
}

impl InputSink for NativeInput {
    fn move_to(&mut self, x: i32, y: i32) -> Result<(), InjectError> {
        self.simulate(&EventType::MouseMove {
            x: f64::from(x),
            y: f64::from(y),
        })
    }

    fn press_button(&mut self, button: Button) -> Result<(), InjectError> {
        self.simulate(&EventType::ButtonPress(button_to_rdev(button)))
    }

    fn release_button(&mut self, button: Button) -> Result<(), InjectError> {
        self.simulate(&EventType::ButtonRelease(button_to_rdev(button)))
    }

    fn scroll(&mut self, dx: i32, dy: i32) -> Result<(), InjectError> {
        self.simulate(&EventType::Wheel {
            delta_x: i64::from(dx),
            delta_y: i64::from(dy),
        })
    }

    fn press_key(&mut self, key: NamedKey) -> Result<(), InjectError> {
        let rdev_key = keymap::rdev_from_named(key).ok_or(InjectError::UnsupportedKey(key))?;
        self.simulate(&EventType::KeyPress(rdev_key))
    }

    fn release_key(&mut self, key: NamedKey) -> Result<(), InjectError> {
        let rdev_key = keymap::rdev_from_named(key).ok_or(InjectError::UnsupportedKey(key))?;
        self.simulate(&EventType::KeyRelease(rdev_key))
    }

    fn type_text(&mut self, text: &str) -> Result<(), InjectError> {
        // Resolve everything first so nothing is typed when a character is unsupported
        let strokes = text
            .chars()
            .map(|c| keymap::keystroke_for(c).ok_or(InjectError::UnsupportedChar(c)))
            .collect::<Result<Vec<_>, _>>()?;

        for (key, shift) in strokes {
            tap(key, shift, |event| self.simulate(event))?;
        }
        Ok(())
    }
}

/// Press and release `key`, wrapped in left shift when `shift` is set.
///
/// Shift is released even when the key itself fails to inject; the first
/// error is returned.
fn tap(
    key: Key,
    shift: bool,
    mut send: impl FnMut(&EventType) -> Result<(), InjectError>,
) -> Result<(), InjectError> {
    if shift {
        send(&EventType::KeyPress(Key::ShiftLeft))?;
    }
    let stroke = send(&EventType::KeyPress(key)).and_then(|()| send(&EventType::KeyRelease(key)));
    let released = if shift {
        send(&EventType::KeyRelease(Key::ShiftLeft))
    } else {
        Ok(())
    };
    stroke.and(released)
}

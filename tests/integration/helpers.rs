//! Shared test doubles and fixture access.

use std::fs;
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::{Duration, Instant};

use macrorec::input::{
    HotkeyHandler, HotkeySource, InjectError, InputHandler, InputNotification, InputSink,
    InputSource, Listener, ListenerError,
};
use macrorec::{Button, NamedKey};

pub fn fixtures_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
}

pub fn fixture_path(name: &str) -> PathBuf {
    fixtures_dir().join(name)
}

pub fn load_fixture(name: &str) -> String {
    fs::read_to_string(fixture_path(name)).expect("Failed to read fixture")
}

/// One injection seen by [`RecordingSink`].
#[derive(Debug, Clone, PartialEq)]
pub enum Injected {
    Move(i32, i32),
    Press(Button),
    Release(Button),
    Scroll(i32, i32),
    KeyDown(NamedKey),
    KeyUp(NamedKey),
    Type(String),
}

impl Injected {
    pub fn is_keyboard(&self) -> bool {
        matches!(
            self,
            Injected::KeyDown(_) | Injected::KeyUp(_) | Injected::Type(_)
        )
    }
}

/// Input sink that remembers every call and when it happened.
pub struct RecordingSink {
    start: Instant,
    pub calls: Vec<(Duration, Injected)>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self {
            start: Instant::now(),
            calls: Vec::new(),
        }
    }

    pub fn injected(&self) -> Vec<Injected> {
        self.calls.iter().map(|(_, call)| call.clone()).collect()
    }

    fn push(&mut self, call: Injected) -> Result<(), InjectError> {
        self.calls.push((self.start.elapsed(), call));
        Ok(())
    }
}

impl InputSink for RecordingSink {
    fn move_to(&mut self, x: i32, y: i32) -> Result<(), InjectError> {
        self.push(Injected::Move(x, y))
    }

    fn press_button(&mut self, button: Button) -> Result<(), InjectError> {
        self.push(Injected::Press(button))
    }

    fn release_button(&mut self, button: Button) -> Result<(), InjectError> {
        self.push(Injected::Release(button))
    }

    fn scroll(&mut self, dx: i32, dy: i32) -> Result<(), InjectError> {
        self.push(Injected::Scroll(dx, dy))
    }

    fn press_key(&mut self, key: NamedKey) -> Result<(), InjectError> {
        self.push(Injected::KeyDown(key))
    }

    fn release_key(&mut self, key: NamedKey) -> Result<(), InjectError> {
        self.push(Injected::KeyUp(key))
    }

    fn type_text(&mut self, text: &str) -> Result<(), InjectError> {
        self.push(Injected::Type(text.to_string()))
    }
}

#[derive(Default)]
struct ScriptState {
    handler: Mutex<Option<InputHandler>>,
    hotkeys: Mutex<Vec<(NamedKey, HotkeyHandler)>>,
    stops: AtomicUsize,
    dead: AtomicBool,
}

/// Host stand-in that test code drives by hand.
#[derive(Clone)]
pub struct ScriptedInput {
    state: Arc<ScriptState>,
    fail_subscribe: bool,
    fail_stop: bool,
}

impl ScriptedInput {
    pub fn new() -> Self {
        Self {
            state: Arc::new(ScriptState::default()),
            fail_subscribe: false,
            fail_stop: false,
        }
    }

    /// Listeners return an error from `stop`.
    pub fn failing_stop() -> Self {
        Self {
            fail_stop: true,
            ..Self::new()
        }
    }

    /// `subscribe` fails.
    pub fn failing_subscribe() -> Self {
        Self {
            fail_subscribe: true,
            ..Self::new()
        }
    }

    /// Block until both channels are registered.
    pub fn wait_until_ready(&self) {
        let deadline = Instant::now() + Duration::from_secs(5);
        while Instant::now() < deadline {
            let subscribed = self.state.handler.lock().unwrap().is_some();
            let hotkeys = !self.state.hotkeys.lock().unwrap().is_empty();
            if subscribed && hotkeys {
                return;
            }
            thread::sleep(Duration::from_millis(1));
        }
        panic!("recorder never subscribed");
    }

    pub fn emit(&self, notification: InputNotification) {
        if let Some(handler) = self.state.handler.lock().unwrap().as_ref() {
            handler(notification);
        }
    }

    pub fn press_hotkey(&self, key: NamedKey) {
        for (registered, handler) in self.state.hotkeys.lock().unwrap().iter() {
            if *registered == key {
                handler();
            }
        }
    }

    /// Simulate the host listener dying.
    pub fn kill(&self) {
        self.state.dead.store(true, Ordering::SeqCst);
    }

    pub fn stop_calls(&self) -> usize {
        self.state.stops.load(Ordering::SeqCst)
    }

    fn listener(&self) -> Box<dyn Listener> {
        Box::new(ScriptedListener {
            state: Arc::clone(&self.state),
            fail_stop: self.fail_stop,
        })
    }
}

impl InputSource for ScriptedInput {
    fn subscribe(&self, handler: InputHandler) -> Result<Box<dyn Listener>, ListenerError> {
        if self.fail_subscribe {
            return Err(ListenerError::Start("no input device".to_string()));
        }
        *self.state.handler.lock().unwrap() = Some(handler);
        Ok(self.listener())
    }
}

impl HotkeySource for ScriptedInput {
    fn register(
        &self,
        key: NamedKey,
        handler: HotkeyHandler,
    ) -> Result<Box<dyn Listener>, ListenerError> {
        self.state.hotkeys.lock().unwrap().push((key, handler));
        Ok(self.listener())
    }
}

struct ScriptedListener {
    state: Arc<ScriptState>,
    fail_stop: bool,
}

impl Listener for ScriptedListener {
    fn stop(&mut self) -> Result<(), ListenerError> {
        self.state.stops.fetch_add(1, Ordering::SeqCst);
        if self.fail_stop {
            Err(ListenerError::Stop("device busy".to_string()))
        } else {
            Ok(())
        }
    }

    fn is_running(&self) -> bool {
        !self.state.dead.load(Ordering::SeqCst)
    }
}

//! Integration tests for recording sessions driven by a scripted host

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use macrorec::input::{InputNotification, NativeKey};
use macrorec::recorder::{RecorderConfig, STOP_KEY};
use macrorec::{Button, Event, EventLog, KeyRef, NamedKey, Recorder};
use tempfile::TempDir;

use crate::helpers::ScriptedInput;

fn recorder() -> Recorder {
    Recorder::new(RecorderConfig {
        poll_interval: Duration::from_millis(1),
    })
}

fn key(pressed: bool, key: NativeKey) -> InputNotification {
    InputNotification::Key { pressed, key }
}

#[test]
fn stop_hotkey_ends_session_and_writes_log() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("sessions").join("macro.jsonl");
    let input = ScriptedInput::new();

    let session = {
        let input = input.clone();
        let path = path.clone();
        thread::spawn(move || {
            recorder().record_to(&path, &input, &input, Arc::new(AtomicBool::new(false)))
        })
    };

    input.wait_until_ready();
    input.emit(InputNotification::Move { x: 10.7, y: 20.2 });
    input.emit(InputNotification::Click {
        x: 10.0,
        y: 20.0,
        button: Button::Left,
        pressed: true,
    });
    input.emit(InputNotification::Scroll {
        x: 10.0,
        y: 20.0,
        dx: 0,
        dy: -1,
    });
    input.emit(key(true, NativeKey::Code(Some('a'))));
    input.emit(key(false, NativeKey::Code(None)));
    input.press_hotkey(STOP_KEY);

    let summary = session.join().unwrap().unwrap();
    assert_eq!(summary.events, 5);
    assert!(summary.bytes > 0);
    assert!(path.exists());

    let log = EventLog::parse(&path).unwrap();
    assert!(log.is_monotonic());
    let kinds: Vec<&str> = log.events.iter().map(Event::kind).collect();
    assert_eq!(kinds, vec!["move", "click", "scroll", "key", "key"]);
    assert!(matches!(log.events[0], Event::Move { x: 10, y: 20, .. }));
    assert!(matches!(
        log.events[3],
        Event::Key {
            pressed: true,
            key: KeyRef::Char('a'),
            ..
        }
    ));
    assert!(matches!(
        log.events[4],
        Event::Key {
            pressed: false,
            key: KeyRef::Named(NamedKey::Esc),
            ..
        }
    ));
    assert_eq!(input.stop_calls(), 2);
}

#[test]
fn listener_stop_failures_are_ignored() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("macro.jsonl");
    let input = ScriptedInput::failing_stop();

    let session = {
        let input = input.clone();
        let path = path.clone();
        thread::spawn(move || {
            recorder().record_to(&path, &input, &input, Arc::new(AtomicBool::new(false)))
        })
    };

    input.wait_until_ready();
    input.emit(InputNotification::Move { x: 1.0, y: 1.0 });
    input.press_hotkey(STOP_KEY);

    let summary = session.join().unwrap().unwrap();
    assert_eq!(summary.events, 1);
    assert_eq!(input.stop_calls(), 2);
    assert!(path.exists());
}

#[test]
fn external_stop_flag_ends_session() {
    let input = ScriptedInput::new();
    let stop = Arc::new(AtomicBool::new(false));

    let session = {
        let input = input.clone();
        let stop = Arc::clone(&stop);
        thread::spawn(move || recorder().record(&input, &input, stop))
    };

    input.wait_until_ready();
    input.emit(key(true, NativeKey::Named(NamedKey::Shift)));
    stop.store(true, Ordering::SeqCst);

    let log = session.join().unwrap().unwrap();
    assert_eq!(log.len(), 1);
}

#[test]
fn dead_listener_ends_session() {
    let input = ScriptedInput::new();

    let session = {
        let input = input.clone();
        thread::spawn(move || recorder().record(&input, &input, Arc::new(AtomicBool::new(false))))
    };

    input.wait_until_ready();
    input.emit(InputNotification::Move { x: 3.0, y: 4.0 });
    input.kill();

    let log = session.join().unwrap().unwrap();
    assert_eq!(log.len(), 1);
}

#[test]
fn failed_subscription_still_writes_empty_log() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("macro.jsonl");
    let input = ScriptedInput::failing_subscribe();

    let result = recorder().record_to(&path, &input, &input, Arc::new(AtomicBool::new(false)));

    let err = result.unwrap_err();
    assert!(format!("{err:#}").contains("no input device"), "{err:#}");
    assert!(path.exists());
    assert!(EventLog::parse(&path).unwrap().is_empty());
}

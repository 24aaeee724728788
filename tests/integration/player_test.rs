//! Integration tests for playback timing, filtering and dispatch

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

use macrorec::player::{
    EventFilter, NeverInterrupted, PlaybackOptions, PlaybackResult, Player, PlayerState,
};
use macrorec::{Button, Event, EventLog, KeyRef, LogError, NamedKey};

use crate::helpers::{fixture_path, Injected, RecordingSink};

fn options() -> PlaybackOptions {
    PlaybackOptions {
        tick: Duration::from_millis(2),
        ..PlaybackOptions::default()
    }
}

fn moves(times: &[f64]) -> EventLog {
    EventLog::new(
        times
            .iter()
            .enumerate()
            .map(|(i, &t)| Event::Move {
                t,
                x: i as i32,
                y: i as i32,
            })
            .collect(),
    )
}

fn timed_pass(log: EventLog, speed: f64) -> Duration {
    let mut player = Player::new(
        log,
        PlaybackOptions {
            speed,
            ..options()
        },
    );
    let mut sink = RecordingSink::new();
    let start = Instant::now();
    player.run(&mut sink, &NeverInterrupted);
    start.elapsed()
}

// ============================================================================
// Timing
// ============================================================================

#[test]
fn example_scenario_dispatches_in_order_and_on_time() {
    let mut player = Player::open(fixture_path("example.jsonl"), options()).unwrap();
    let mut sink = RecordingSink::new();

    let result = player.run(&mut sink, &NeverInterrupted);

    assert_eq!(result.stats().dispatched, 3);
    assert_eq!(
        sink.injected(),
        vec![
            Injected::Move(0, 0),
            Injected::Move(10, 10),
            Injected::Press(Button::Left),
            Injected::Move(10, 10),
            Injected::Release(Button::Left),
        ]
    );

    let (first_at, _) = sink.calls[0];
    let (press_at, _) = sink.calls[2];
    let (release_at, _) = sink.calls[4];
    assert!(first_at < Duration::from_millis(100), "{first_at:?}");
    assert!(press_at >= Duration::from_millis(500), "{press_at:?}");
    assert!(release_at < Duration::from_millis(900), "{release_at:?}");
    assert_eq!(player.state(), PlayerState::Done);
}

#[test]
fn speed_two_takes_about_half_as_long() {
    let times = [0.0, 0.1, 0.2, 0.3, 0.4];

    let normal = timed_pass(moves(&times), 1.0);
    let double = timed_pass(moves(&times), 2.0);

    let slack = Duration::from_millis(250);

    assert!(normal >= Duration::from_millis(400), "{normal:?}");
    assert!(normal < Duration::from_millis(400) + slack, "{normal:?}");
    assert!(double >= Duration::from_millis(200), "{double:?}");
    assert!(double < Duration::from_millis(200) + slack, "{double:?}");
    assert!(double + Duration::from_millis(100) < normal, "{double:?} vs {normal:?}");
}

#[test]
fn shifted_log_starts_at_first_event() {
    let log = EventLog::parse(fixture_path("shifted.jsonl")).unwrap();

    let elapsed = timed_pass(log, 1.0);

    assert!(elapsed >= Duration::from_millis(100), "{elapsed:?}");
    assert!(elapsed < Duration::from_millis(400), "{elapsed:?}");
}

#[test]
fn near_zero_speed_is_floored_not_infinite() {
    // A single event is always due immediately, whatever the speed
    let elapsed = timed_pass(moves(&[5.0]), 0.0);
    assert!(elapsed < Duration::from_millis(200), "{elapsed:?}");
}

// ============================================================================
// Filtering and key handling
// ============================================================================

#[test]
fn mouse_only_never_injects_keys() {
    let log = EventLog::parse(fixture_path("mixed.jsonl")).unwrap();
    let expected = log.count_where(Event::is_mouse);
    let mut player = Player::new(
        log,
        PlaybackOptions {
            filter: EventFilter::MouseOnly,
            ..options()
        },
    );
    let mut sink = RecordingSink::new();

    let stats = player.run(&mut sink, &NeverInterrupted).stats();

    assert_eq!(stats.dispatched, expected);
    assert!(sink.injected().iter().all(|call| !call.is_keyboard()));
}

#[test]
fn keyboard_only_injects_only_keys() {
    let log = EventLog::parse(fixture_path("mixed.jsonl")).unwrap();
    let expected = log.count_where(Event::is_key);
    let mut player = Player::new(
        log,
        PlaybackOptions {
            filter: EventFilter::KeyboardOnly,
            ..options()
        },
    );
    let mut sink = RecordingSink::new();

    let stats = player.run(&mut sink, &NeverInterrupted).stats();

    assert_eq!(stats.dispatched, expected);
    assert_eq!(stats.skipped, 5);
    assert!(sink.injected().iter().all(Injected::is_keyboard));
}

#[test]
fn char_keys_type_once_per_press() {
    let mut player = Player::open(
        fixture_path("mixed.jsonl"),
        PlaybackOptions {
            filter: EventFilter::KeyboardOnly,
            ..options()
        },
    )
    .unwrap();
    let mut sink = RecordingSink::new();

    player.run(&mut sink, &NeverInterrupted);

    assert_eq!(
        sink.injected(),
        vec![
            Injected::KeyDown(NamedKey::Shift),
            Injected::Type("H".to_string()),
            Injected::KeyUp(NamedKey::Shift),
            Injected::Type("é".to_string()),
            Injected::KeyDown(NamedKey::Esc),
            Injected::KeyUp(NamedKey::Esc),
        ]
    );
}

#[test]
fn char_release_alone_injects_nothing() {
    let log = EventLog::new(vec![Event::Key {
        t: 0.0,
        pressed: false,
        key: KeyRef::Char('z'),
    }]);
    let mut player = Player::new(log, options());
    let mut sink = RecordingSink::new();

    player.run(&mut sink, &NeverInterrupted);

    assert!(sink.calls.is_empty());
}

#[test]
fn unknown_key_is_skipped_and_playback_continues() {
    let mut player = Player::open(fixture_path("unknown_key.jsonl"), options()).unwrap();
    let mut sink = RecordingSink::new();

    let result = player.run(&mut sink, &NeverInterrupted);

    let stats = result.stats();
    assert!(!result.is_interrupted());
    assert_eq!(stats.failed, 2);
    assert_eq!(stats.dispatched, 4);
    assert_eq!(
        sink.injected(),
        vec![
            Injected::Move(1, 1),
            Injected::Type("ab".to_string()),
            Injected::Move(2, 2),
        ]
    );
    assert_eq!(player.state(), PlayerState::Done);
}

// ============================================================================
// Loading, empty logs and interruption
// ============================================================================

#[test]
fn empty_log_plays_nothing() {
    let mut player = Player::open(fixture_path("empty.jsonl"), options()).unwrap();
    let mut sink = RecordingSink::new();

    let result = player.run(&mut sink, &NeverInterrupted);

    assert_eq!(result, PlaybackResult::Empty);
    assert!(sink.calls.is_empty());
}

#[test]
fn missing_log_fails_before_any_dispatch() {
    let err = Player::open(fixture_path("nope.jsonl"), options()).unwrap_err();
    assert!(matches!(err, LogError::NotFound { .. }));
}

#[test]
fn loop_replays_until_interrupted() {
    let flag = Arc::new(AtomicBool::new(false));
    let stopper = {
        let flag = Arc::clone(&flag);
        thread::spawn(move || {
            thread::sleep(Duration::from_millis(150));
            flag.store(true, Ordering::SeqCst);
        })
    };
    let mut player = Player::new(
        moves(&[0.0, 0.01]),
        PlaybackOptions {
            looping: true,
            loop_pause: Duration::from_millis(20),
            ..options()
        },
    );
    let mut sink = RecordingSink::new();

    let start = Instant::now();
    let result = player.run(&mut sink, &flag);
    stopper.join().unwrap();

    assert!(result.is_interrupted());
    assert!(result.stats().passes >= 2, "{:?}", result.stats());
    assert!(start.elapsed() < Duration::from_secs(2));
    assert_eq!(player.state(), PlayerState::Interrupted);
    // Each pass replays the same immutable sequence
    let injected = sink.injected();
    assert_eq!(injected[0], Injected::Move(0, 0));
    assert_eq!(injected[2], Injected::Move(0, 0));
}

#[test]
fn interrupt_during_long_pause_returns_promptly() {
    let flag = Arc::new(AtomicBool::new(false));
    let stopper = {
        let flag = Arc::clone(&flag);
        thread::spawn(move || {
            thread::sleep(Duration::from_millis(50));
            flag.store(true, Ordering::SeqCst);
        })
    };
    let mut player = Player::new(
        moves(&[0.0]),
        PlaybackOptions {
            looping: true,
            ..options()
        },
    );
    let mut sink = RecordingSink::new();

    let start = Instant::now();
    let result = player.run(&mut sink, &flag);
    stopper.join().unwrap();

    assert!(result.is_interrupted());
    assert_eq!(result.stats().passes, 1);
    assert!(start.elapsed() < Duration::from_secs(2));
}

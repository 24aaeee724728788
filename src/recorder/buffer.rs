//! Shared append-only event buffer written by the input listeners.

use std::sync::{Mutex, MutexGuard};
use std::time::Instant;

use crate::event::{round_micros, Event};
use crate::input::InputNotification;

/// Timestamps and stores notifications from concurrent listeners.
///
/// The timestamp is taken while holding the lock, so events stay in
/// non-decreasing `t` order regardless of which listener appended them.
#[derive(Debug)]
pub struct EventBuffer {
    start: Instant,
    events: Mutex<Vec<Event>>,
}

impl EventBuffer {
    /// Create a buffer whose time base is now.
    pub fn new() -> Self {
        Self::starting_at(Instant::now())
    }

    pub fn starting_at(start: Instant) -> Self {
        Self {
            start,
            events: Mutex::new(Vec::new()),
        }
    }

    /// Timestamp a notification and append it.
    pub fn append(&self, notification: InputNotification) {
        let mut events = self.lock();
        let t = round_micros(self.start.elapsed().as_secs_f64());
        events.push(to_event(t, notification));
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Take every buffered event, leaving the buffer empty.
    pub fn drain(&self) -> Vec<Event> {
        std::mem::take(&mut *self.lock())
    }

    // A panicking listener must not cost us the recording
    fn lock(&self) -> MutexGuard<'_, Vec<Event>> {
        self.events
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl Default for EventBuffer {
    fn default() -> Self {
        Self::new()
    }
}

/// Build an event from a host notification. Coordinates are truncated to
/// whole pixels.
fn to_event(t: f64, notification: InputNotification) -> Event {
    match notification {
        InputNotification::Move { x, y } => Event::Move {
            t,
            x: x as i32,
            y: y as i32,
        },
        InputNotification::Click {
            x,
            y,
            button,
            pressed,
        } => Event::Click {
            t,
            x: x as i32,
            y: y as i32,
            button,
            pressed,
        },
        InputNotification::Scroll { x, y, dx, dy } => Event::Scroll {
            t,
            x: x as i32,
            y: y as i32,
            dx: dx.clamp(i32::MIN as i64, i32::MAX as i64) as i32,
            dy: dy.clamp(i32::MIN as i64, i32::MAX as i64) as i32,
        },
        InputNotification::Key { pressed, key } => Event::Key {
            t,
            pressed,
            key: key.into(),
        },
    }
}

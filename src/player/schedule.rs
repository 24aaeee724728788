//! Replay timing.
//!
//! Each pass has its own baseline instant; every event is due at its offset
//! from the first event, divided by the speed. Waiting happens in bounded
//! slices so interrupts are noticed promptly, and because targets are
//! measured from the baseline rather than from the previous event, sleep
//! overshoot never accumulates.

use std::thread;
use std::time::{Duration, Instant};

use super::interrupt::Interrupt;

/// Smallest speed used for scaling; guards against zero or negative speeds.
pub const MIN_SPEED: f64 = 1e-4;

/// Offset from the pass baseline at which an event at `t` is due.
///
/// Offsets too large for a `Duration` saturate to `Duration::MAX`, so such
/// an event is never reached within a pass.
pub fn scaled_offset(t: f64, base: f64, speed: f64) -> Duration {
    let speed = if speed.is_nan() { MIN_SPEED } else { speed.max(MIN_SPEED) };
    // f64::max ignores NaN, so secs is never NaN here
    let secs = ((t - base) / speed).max(0.0);
    Duration::try_from_secs_f64(secs).unwrap_or(Duration::MAX)
}

/// Sleep until `target` has elapsed since `start`, in slices of at most
/// `tick`.
///
/// Returns `false` if interrupted before the target was reached.
pub fn wait_until(
    start: Instant,
    target: Duration,
    tick: Duration,
    interrupt: &dyn Interrupt,
) -> bool {
    loop {
        if interrupt.is_interrupted() {
            return false;
        }
        let elapsed = start.elapsed();
        if elapsed >= target {
            return true;
        }
        let remaining = target - elapsed;
        thread::sleep(remaining.min(tick));
    }
}

//! User interrupt detection for the playback loop.
//!
//! The loop polls an [`Interrupt`] before every sleep slice and every
//! dispatch, so Ctrl+C takes effect within one tick.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Source of a "stop now" request.
pub trait Interrupt {
    fn is_interrupted(&self) -> bool;
}

impl Interrupt for AtomicBool {
    fn is_interrupted(&self) -> bool {
        self.load(Ordering::SeqCst)
    }
}

impl<T: Interrupt + ?Sized> Interrupt for Arc<T> {
    fn is_interrupted(&self) -> bool {
        (**self).is_interrupted()
    }
}

/// Set by the process Ctrl+C (SIGINT) handler.
#[derive(Debug, Clone)]
pub struct SigintFlag {
    flag: Arc<AtomicBool>,
}

impl SigintFlag {
    /// Install the Ctrl+C handler. Only one handler can exist per process.
    pub fn install() -> Result<Self, ctrlc::Error> {
        let flag = Arc::new(AtomicBool::new(false));
        let handler_flag = Arc::clone(&flag);
        ctrlc::set_handler(move || {
            handler_flag.store(true, Ordering::SeqCst);
        })?;
        Ok(Self { flag })
    }

    /// The shared flag, for callers that also want to stop on Ctrl+C.
    pub fn flag(&self) -> Arc<AtomicBool> {
        Arc::clone(&self.flag)
    }
}

impl Interrupt for SigintFlag {
    fn is_interrupted(&self) -> bool {
        self.flag.load(Ordering::SeqCst)
    }
}

/// Never interrupts.
#[derive(Debug, Clone, Copy, Default)]
pub struct NeverInterrupted;

impl Interrupt for NeverInterrupted {
    fn is_interrupted(&self) -> bool {
        false
    }
}

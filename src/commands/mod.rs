//! Subcommand handlers.

pub mod completions;
pub mod config;
pub mod play;
pub mod record;

use std::sync::atomic::AtomicBool;
use std::sync::Arc;

use macrorec::player::SigintFlag;

/// Flag raised by Ctrl+C. Falls back to a flag nothing sets if the handler
/// cannot be installed.
pub fn interrupt_flag() -> Arc<AtomicBool> {
    match SigintFlag::install() {
        Ok(sigint) => sigint.flag(),
        Err(e) => {
            tracing::warn!("Ctrl+C handler unavailable: {}", e);
            Arc::new(AtomicBool::new(false))
        }
    }
}

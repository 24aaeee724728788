//! `record` subcommand.

use std::path::Path;

use anyhow::Result;

use macrorec::Config;

/// Record until Esc (or Ctrl+C) and write the log to `output`.
#[cfg(feature = "native")]
#[cfg(not(tarpaulin_include))]
pub fn handle(output: &Path, config: &Config) -> Result<()> {
    use humansize::{format_size, DECIMAL};
    use macrorec::input::native::NativeInput;
    use macrorec::Recorder;

    let input = NativeInput::new();
    let stop = super::interrupt_flag();

    println!("Recording... (press Esc to stop)");
    let summary = Recorder::new(config.recorder_config()).record_to(output, &input, &input, stop)?;

    println!(
        "Recorded {} events to {} ({})",
        summary.events,
        summary.path.display(),
        format_size(summary.bytes, DECIMAL)
    );
    Ok(())
}

#[cfg(not(feature = "native"))]
pub fn handle(output: &Path, _config: &Config) -> Result<()> {
    anyhow::bail!(
        "Cannot record to {}: this build has no input backend (rebuild with `--features native`)",
        output.display()
    )
}

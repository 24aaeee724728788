//! Shell completion generation.

use std::io;

use anyhow::Result;
use clap::CommandFactory;
use clap_complete::Shell;

use macrorec::cli::Cli;

/// Print completions for `shell` to stdout.
#[cfg(not(tarpaulin_include))]
pub fn handle(shell: Shell) -> Result<()> {
    let mut command = Cli::command();
    clap_complete::generate(shell, &mut command, "macrorec", &mut io::stdout());
    Ok(())
}

//! macrorec command-line entry point.

mod commands;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use macrorec::cli::{Cli, Commands, ConfigCommands};
use macrorec::Config;

fn init_logging(verbose: u8) {
    let default = match verbose {
        0 => "warn,macrorec=info",
        1 => "warn,macrorec=debug",
        _ => "trace",
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default)),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config = match &cli.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };

    match cli.command {
        Commands::Record { output } => commands::record::handle(&output, &config),
        Commands::Play(args) => commands::play::handle(&args, &config),
        Commands::Config(ConfigCommands::Show) => commands::config::handle_show(&config),
        Commands::Config(ConfigCommands::Path) => {
            commands::config::handle_path(cli.config.as_deref())
        }
        Commands::Completions { shell } => commands::completions::handle(shell),
    }
}

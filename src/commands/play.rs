//! `play` subcommand.

use anyhow::{Context, Result};

use macrorec::cli::PlayArgs;
use macrorec::input::{DryRunSink, InputSink};
use macrorec::player::{EventFilter, PlaybackResult, Player};
use macrorec::Config;

/// Play back a recorded log.
#[cfg(not(tarpaulin_include))]
pub fn handle(args: &PlayArgs, config: &Config) -> Result<()> {
    let mut options = config.playback_options();
    if let Some(speed) = args.speed {
        options.speed = speed;
    }
    options.filter = EventFilter::from_flags(args.mouse_only, args.keyboard_only);
    options.looping = args.looping;

    let mut player = Player::open(&args.input, options)
        .with_context(|| format!("Cannot play {}", args.input.display()))?;

    if player.log().is_empty() {
        println!("Empty event log, nothing to play.");
        return Ok(());
    }

    let mut sink = make_sink(args.dry_run)?;
    let interrupt = super::interrupt_flag();

    let options = player.options();
    println!(
        "Playing {} events (speed={}x, loop={}, filter={})",
        player.log().len(),
        options.speed,
        options.looping,
        options.filter.as_str()
    );

    match player.run(sink.as_mut(), &interrupt) {
        PlaybackResult::Empty => println!("Empty event log, nothing to play."),
        PlaybackResult::Finished(stats) => println!(
            "Playback finished: {} injected, {} filtered, {} failed",
            stats.dispatched, stats.skipped, stats.failed
        ),
        PlaybackResult::Interrupted(stats) => println!(
            "\nPlayback interrupted by user after {} events.",
            stats.dispatched
        ),
    }

    Ok(())
}

fn make_sink(dry_run: bool) -> Result<Box<dyn InputSink>> {
    if dry_run {
        return Ok(Box::new(DryRunSink::new()));
    }

    #[cfg(feature = "native")]
    {
        Ok(Box::new(macrorec::input::native::NativeInput::new()))
    }

    #[cfg(not(feature = "native"))]
    {
        anyhow::bail!(
            "This build has no input backend; use --dry-run or rebuild with `--features native`"
        )
    }
}

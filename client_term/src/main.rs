mod canvas;
mod error;
mod font;
mod keyboard;
mod terminal;

use anyhow::Context;
use clap::Parser;
use game_core::{run, FixedRatePacer, Game, Params};
use std::{fs::File, path::PathBuf, sync::Mutex};
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::{canvas::TerminalCanvas, keyboard::TerminalInput, terminal::TerminalGuard};

/// Pong against an imperfect autopilot, in the terminal
#[derive(Parser, Debug)]
#[command(name = "pong", version, about)]
struct Cli {
    /// Seed for serve directions and autopilot mistakes [default: random]
    #[arg(long)]
    seed: Option<u64>,

    /// Ticks per second
    #[arg(long, default_value_t = Params::TICK_RATE,
          value_parser = clap::value_parser!(u32).range(1..=240))]
    fps: u32,

    /// Write logs to this file (the terminal itself is the game screen)
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// More log output: -v info, -vv debug, -vvv trace
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn setup_logging(cli: &Cli) -> anyhow::Result<()> {
    let Some(path) = &cli.log_file else {
        return Ok(());
    };
    let file = File::create(path)
        .with_context(|| format!("failed to create log file {}", path.display()))?;

    let level = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("game_core={level},client_term={level}")));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .try_init()
        .map_err(|err| anyhow::anyhow!(err))
        .context("failed to install log subscriber")
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    setup_logging(&cli)?;

    let seed = cli.seed.unwrap_or_else(rand::random);
    info!(seed, fps = cli.fps, "starting");

    let summary = {
        let _terminal = TerminalGuard::enter().context("failed to set up the terminal")?;
        let mut canvas = TerminalCanvas::stdout()?;
        let mut input = TerminalInput::new();
        let mut pacer = FixedRatePacer::new(cli.fps);
        let mut game = Game::new(seed);
        run(&mut game, &mut input, &mut canvas, &mut pacer)?
    };

    println!("Final score  {} : {}", summary.score.left, summary.score.right);
    Ok(())
}

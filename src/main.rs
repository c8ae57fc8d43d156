use std::fs::File;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use rand::{rngs::StdRng, SeedableRng};
use tracing_subscriber::EnvFilter;

use liquidsnake::adapter::{Audio, Silence};
use liquidsnake::game::SnakeGame;
use liquidsnake::input::Keyboard;
use liquidsnake::runner::Runner;
use liquidsnake::scheduler::IntervalScheduler;
use liquidsnake::term::{in_session, Bell, TermManager, TerminalView};

#[derive(Parser)]
#[command(name = "liquidsnake")]
#[command(version, about = "Snake on a 20x20 grid, in the terminal")]
struct Cli {
    /// Milliseconds between two moves of the snake
    #[arg(long, default_value = "100", value_parser = clap::value_parser!(u64).range(1..))]
    tick_ms: u64,

    /// Seed for food placement, for reproducible games
    #[arg(long)]
    seed: Option<u64>,

    /// Don't ring the terminal bell when food is eaten
    #[arg(long)]
    mute: bool,

    /// Write logs to this file (filter with RUST_LOG, default "info")
    #[arg(long)]
    log_file: Option<PathBuf>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    if let Some(path) = &cli.log_file {
        init_logging(path)?;
    }

    let rng = match cli.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let audio: Box<dyn Audio> = if cli.mute { Box::new(Silence) } else { Box::new(Bell::new()) };

    let mut view = TerminalView::new(TermManager::new()?)?;
    let tick = Duration::from_millis(cli.tick_ms);

    in_session(&mut view, |view| {
        tracing::info!(tick_ms = cli.tick_ms, seed = ?cli.seed, "terminal ready");
        let game = SnakeGame::new(view, audio, rng);
        Runner::new(game, Keyboard, IntervalScheduler::new(tick)).run()
    })
}

fn init_logging(path: &Path) -> Result<()> {
    let file = File::create(path)
        .with_context(|| format!("Failed to create log file {}", path.display()))?;

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();

    Ok(())
}

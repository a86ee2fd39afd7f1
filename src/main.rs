use std::io;
use std::path::PathBuf;

use clap::Parser;
use tracing_subscriber::EnvFilter;

/// Plays a game of chess in the terminal: reads commands from stdin and
/// prints the responses to stdout. Logs go to stderr and are controlled by
/// `RUST_LOG`.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Config {
    /// Resume the game saved in this file.
    #[arg(long, value_name = "PATH")]
    game: Option<PathBuf>,
    /// File that `save` writes to when it is given no path.
    #[arg(long, value_name = "PATH")]
    save: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    let config = Config::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    gambit::print_engine_info();

    let mut input = io::stdin().lock();
    let mut output = io::stdout().lock();
    let mut engine = gambit::Engine::new(&mut input, &mut output);
    if let Some(path) = config.game {
        engine = engine.with_game(gambit::load_game(&path)?);
    }
    if let Some(path) = config.save {
        engine = engine.with_save_path(path);
    }
    engine.run()
}

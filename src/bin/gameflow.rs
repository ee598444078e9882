use clap::{Parser, ValueEnum};
use gameflow::console::{ConsoleResult, TerminalConsole};
use gameflow::flow::GameFlow;
use gameflow::games::{guesses, seconds};
use gameflow::random::Randomizer;
use gameflow::ux::ConsoleUx;
use std::io::{self, IsTerminal};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum GameKind {
    /// Guess a number from 1 to 10 in three tries.
    Guesses,
    /// Stop the clock at three seconds flat.
    Seconds,
}

#[derive(Debug, Parser)]
#[command(name = "gameflow", version, about = "Turn-based console games")]
struct Cli {
    #[arg(long, value_enum, default_value_t = GameKind::Guesses)]
    game: GameKind,
    /// Seed for reproducible secrets.
    #[arg(long)]
    seed: Option<u64>,
    /// Do not exit when [Esc] is pressed.
    #[arg(long)]
    no_esc_exit: bool,
}

fn play(cli: &Cli) -> ConsoleResult<()> {
    let console = TerminalConsole::new()?;
    let ux = ConsoleUx::new(!cli.no_esc_exit);
    match cli.game {
        GameKind::Guesses => {
            let rng = cli.seed.map(Randomizer::seeded).unwrap_or_default();
            guesses::game(console, rng, ux).play()
        }
        GameKind::Seconds => seconds::game(console, ux).play(),
    }
}

fn main() -> io::Result<()> {
    let cli = Cli::parse();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("off")),
        )
        .with_writer(io::stderr)
        .init();

    if !io::stdout().is_terminal() {
        println!(
            "gameflow requires a real terminal (TTY).\nRun in Terminal and press Esc to quit. Version: {}",
            gameflow::VERSION
        );
        return Ok(());
    }

    // The console is dropped inside `play`, so the terminal is restored on every path.
    match play(&cli) {
        Ok(()) => Ok(()),
        Err(err) if err.is_cancelled() => {
            info!("cancelled");
            Ok(())
        }
        Err(err) => Err(io::Error::other(err)),
    }
}

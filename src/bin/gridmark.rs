//! gridmark CLI - play and analyze generalized tic-tac-toe
//!
//! This CLI provides:
//! - Interactive games against the minimax computer player
//! - Single-position decisions with search diagnostics
//! - Side-by-side comparison of the pruning settings

use anyhow::Result;
use clap::{ArgAction, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "gridmark")]
#[command(version, about = "Generalized tic-tac-toe with an exhaustive search opponent", long_about = None)]
struct Cli {
    /// Raise log verbosity (-v debug, -vv trace); RUST_LOG takes precedence
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Play an interactive game
    Play(gridmark::cli::commands::play::PlayArgs),

    /// Choose a move for one position
    Decide(gridmark::cli::commands::decide::DecideArgs),

    /// Run every pruning combination on one position
    Compare(gridmark::cli::commands::compare::CompareArgs),
}

fn init_tracing(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "warn,gridmark=debug",
        _ => "warn,gridmark=trace",
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default)),
        )
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Commands::Play(args) => gridmark::cli::commands::play::execute(args),
        Commands::Decide(args) => gridmark::cli::commands::decide::execute(args),
        Commands::Compare(args) => gridmark::cli::commands::compare::execute(args),
    }
}

//! tactician CLI - train, evaluate and analyze Tic-Tac-Toe Q-learning agents
//!
//! This CLI provides:
//! - Training an agent against a random or perfect-play opponent
//! - Held-out evaluation of a saved Q-table, optionally against an untrained baseline
//! - Game-tree, minimax and Q-table analysis

use anyhow::Result;
use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "tactician")]
#[command(version, about = "Q-learning agents for N×N Tic-Tac-Toe", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Train an agent and save its Q-table
    Train(Box<tactician::cli::commands::train::TrainArgs>),

    /// Evaluate a trained agent against an opponent
    Evaluate(Box<tactician::cli::commands::evaluate::EvaluateArgs>),

    /// Analyze game trees, perfect play and Q-tables
    Analyze(tactician::cli::commands::analyze::AnalyzeArgs),
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Train(args) => tactician::cli::commands::train::execute(*args),
        Commands::Evaluate(args) => tactician::cli::commands::evaluate::execute(*args),
        Commands::Analyze(args) => tactician::cli::commands::analyze::execute(args),
    }
}

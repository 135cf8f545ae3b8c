//! Analyze command - Game-tree facts, perfect-play values and Q-table statistics

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use log::warn;

use crate::{
    adapters::{JsonRepository, MsgPackRepository},
    cli::{
        config::QTableFormat,
        output::{create_spinner, format_number, print_kv, print_section},
    },
    minimax::MinimaxEvaluator,
    ports::QTableRepository,
    q_learning::{EXHAUSTIVE_SEARCH_CELL_LIMIT, QTable},
    tictactoe::{Board, GameOutcome, Geometry, Player, count_games, reachable_states},
};

#[derive(Parser, Debug)]
#[command(about = "Analyze game trees, perfect play and learned Q-tables")]
pub struct AnalyzeArgs {
    #[command(subcommand)]
    pub command: AnalyzeCommand,
}

/// Board shared by the game-tree subcommands
#[derive(Args, Debug, Clone)]
pub struct BoardArgs {
    /// Board side length
    #[arg(long, default_value_t = 3)]
    pub size: usize,

    /// Marks in a row needed to win
    #[arg(long, default_value_t = 3)]
    pub win_length: usize,

    /// Which symbol moves first
    #[arg(long, default_value = "x")]
    pub first_player: Player,
}

impl BoardArgs {
    fn geometry(&self) -> Result<Geometry> {
        let geometry =
            Geometry::new(self.size, self.win_length).context("invalid board geometry")?;
        if geometry.cell_count() > EXHAUSTIVE_SEARCH_CELL_LIMIT {
            warn!("exhaustive analysis of a {geometry} board may take a very long time");
        }
        Ok(geometry)
    }
}

#[derive(Subcommand, Debug)]
pub enum AnalyzeCommand {
    /// Count reachable positions and complete games
    GameTree {
        #[command(flatten)]
        board: BoardArgs,
    },

    /// Perfect-play value of a position and its best moves
    Minimax {
        #[command(flatten)]
        board: BoardArgs,

        /// Position to analyze, one character per cell (X, O, '.' for empty)
        #[arg(long)]
        state: Option<String>,
    },

    /// Statistics of a saved Q-table
    QTable {
        /// Q-table file
        path: PathBuf,

        /// File format
        #[arg(long, value_enum, default_value_t)]
        format: QTableFormat,

        /// Show the values stored for this position (X, O, '.' for empty)
        #[arg(long)]
        state: Option<String>,

        /// Board side length used to read --state
        #[arg(long, default_value_t = 3)]
        size: usize,
    },
}

pub fn execute(args: AnalyzeArgs) -> Result<()> {
    match args.command {
        AnalyzeCommand::GameTree { board } => analyze_game_tree(&board),
        AnalyzeCommand::Minimax { board, state } => analyze_minimax(&board, state.as_deref()),
        AnalyzeCommand::QTable {
            path,
            format,
            state,
            size,
        } => analyze_q_table(&path, format, state.as_deref(), size),
    }
}

fn analyze_game_tree(args: &BoardArgs) -> Result<()> {
    let geometry = args.geometry()?;
    let spinner = create_spinner("Enumerating game tree...")?;

    let states = reachable_states(geometry, args.first_player);
    let terminal = states.iter().filter(|s| s.board.is_terminal()).count();
    let counts = count_games(geometry, args.first_player);
    spinner.finish_and_clear();

    print_section(&format!(
        "Game tree: {geometry}, {} moves first",
        args.first_player
    ));
    print_kv("Reachable states", &format_number(states.len()));
    print_kv("Terminal states", &format_number(terminal));
    print_kv("Decision states", &format_number(states.len() - terminal));
    print_kv("Complete games", &counts.total().to_string());
    print_kv("X wins", &counts.x_wins.to_string());
    print_kv("O wins", &counts.o_wins.to_string());
    print_kv("Draws", &counts.draws.to_string());
    Ok(())
}

fn analyze_minimax(args: &BoardArgs, state: Option<&str>) -> Result<()> {
    let geometry = args.geometry()?;
    let board = match state {
        Some(text) => Board::parse(text, geometry).context("invalid --state")?,
        None => Board::empty(geometry),
    };

    let to_move = side_to_move(&board, args.first_player);
    print_section(&format!("Position ({to_move} to move)"));
    println!("{board}");

    if let Some(outcome) = GameOutcome::of(&board) {
        print_kv("Result", &format!("{outcome:?}"));
        return Ok(());
    }

    let mut evaluator = MinimaxEvaluator::new(to_move);
    let score = evaluator.evaluate(&board, to_move);
    print_kv(
        "Value",
        match score {
            1 => "forced win",
            -1 => "forced loss",
            _ => "draw",
        },
    );
    if let Some(best) = evaluator.best_moves(&board) {
        print_kv("Best moves", &format!("{:?}", best.moves));
    }
    print_kv("Positions cached", &format_number(evaluator.len()));
    Ok(())
}

fn analyze_q_table(
    path: &std::path::Path,
    format: QTableFormat,
    state: Option<&str>,
    size: usize,
) -> Result<()> {
    let q_table: QTable = match format {
        QTableFormat::Json => JsonRepository::new().load(path),
        QTableFormat::Msgpack => MsgPackRepository::new().load(path),
    }
    .with_context(|| format!("failed to load {}", path.display()))?;

    let values: Vec<f64> = q_table
        .iter()
        .flat_map(|(_, actions)| actions.values().copied())
        .collect();

    print_section(&format!("Q-table {}", path.display()));
    print_kv("States", &format_number(q_table.len()));
    print_kv("Values", &format_number(values.len()));
    if !values.is_empty() {
        let min = values.iter().copied().fold(f64::INFINITY, f64::min);
        let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        let mean = values.iter().sum::<f64>() / values.len() as f64;
        let trained = values.iter().filter(|&&v| v != QTable::INITIAL_VALUE).count();
        print_kv("Trained values", &format_number(trained));
        print_kv("Min", &format!("{min:.4}"));
        print_kv("Max", &format!("{max:.4}"));
        print_kv("Mean", &format!("{mean:.4}"));
    }

    if let Some(text) = state {
        // the win length does not affect how a position is read
        let geometry = Geometry::new(size, size).context("invalid --size")?;
        let board = Board::parse(text, geometry).context("invalid --state")?;
        println!("\n{board}\n");
        match q_table.actions(&board.state_key()) {
            Some(actions) => {
                let mut sorted: Vec<_> = actions.iter().collect();
                sorted.sort_by_key(|(action, _)| **action);
                for (action, value) in sorted {
                    print_kv(&format!("move {action}"), &format!("{value:.4}"));
                }
            }
            None => println!("  (state not in table)"),
        }
    }
    Ok(())
}

/// Side to move given who opened the game.
fn side_to_move(board: &Board, first_player: Player) -> Player {
    if board.occupied_count().is_multiple_of(2) {
        first_player
    } else {
        first_player.opponent()
    }
}

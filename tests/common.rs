//! Shared helpers for the integration tests.

#![allow(dead_code)]

use tactician::{
    AgentConfig, Board, Geometry, Player, QLearningAgent, adapters::InMemoryRepository,
};

/// Parse a classic 3×3 board, one character per cell.
pub fn classic(text: &str) -> Board {
    Board::parse(text, Geometry::classic()).expect("test board should parse")
}

/// Agent with an empty Q-table that never touches the filesystem.
pub fn untrained_agent(config: AgentConfig) -> QLearningAgent {
    QLearningAgent::with_repository(config, InMemoryRepository::new())
        .expect("agent config should be valid")
}

/// Side to move on a board where `first` opened the game.
pub fn side_to_move(board: &Board, first: Player) -> Player {
    if board.occupied_count().is_multiple_of(2) {
        first
    } else {
        first.opponent()
    }
}

/// Plain recursive minimax with no caching, scored from `perspective`.
pub fn brute_force(board: &Board, to_move: Player, perspective: Player) -> i8 {
    if board.is_terminal() {
        return board.outcome(perspective);
    }
    let scores = board.available_moves().into_iter().map(|pos| {
        let next = board.apply_move(pos, to_move).expect("move is available");
        brute_force(&next, to_move.opponent(), perspective)
    });
    if to_move == perspective {
        scores.max().unwrap_or(0)
    } else {
        scores.min().unwrap_or(0)
    }
}

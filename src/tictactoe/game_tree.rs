//! Enumeration of the positions reachable by alternating play

use std::{
    collections::{HashMap, HashSet, VecDeque},
    ops::AddAssign,
};

use serde::{Deserialize, Serialize};

use super::{
    board::{Board, Geometry, Player},
    game::GameOutcome,
};
use crate::types::StateKey;

/// A position together with the side to move.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ReachableState {
    pub board: Board,
    pub to_move: Player,
}

/// Collect every position reachable from the empty board with `first_player`
/// to move, stopping at terminal boards. Terminal positions are included.
///
/// The classic 3×3 board with X opening has 5 478 such positions. The count
/// grows combinatorially with the board size, so this is only practical for
/// the small boards exhaustive search is meant for.
pub fn reachable_states(geometry: Geometry, first_player: Player) -> Vec<ReachableState> {
    let root = ReachableState {
        board: Board::empty(geometry),
        to_move: first_player,
    };

    let mut visited = HashSet::new();
    let mut queue = VecDeque::new();
    let mut states = Vec::new();

    visited.insert((root.board.state_key(), root.to_move));
    queue.push_back(root);

    while let Some(state) = queue.pop_front() {
        if !state.board.is_terminal() {
            for pos in state.board.available_moves() {
                let next = ReachableState {
                    board: state.board.place(pos, state.to_move),
                    to_move: state.to_move.opponent(),
                };
                if visited.insert((next.board.state_key(), next.to_move)) {
                    queue.push_back(next);
                }
            }
        }
        states.push(state);
    }

    states
}

/// Number of distinct complete games, by result
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameCounts {
    pub x_wins: u64,
    pub o_wins: u64,
    pub draws: u64,
}

impl GameCounts {
    pub fn total(&self) -> u64 {
        self.x_wins + self.o_wins + self.draws
    }

    fn of(outcome: GameOutcome) -> Self {
        let mut counts = Self::default();
        match outcome {
            GameOutcome::Win(Player::X) => counts.x_wins = 1,
            GameOutcome::Win(Player::O) => counts.o_wins = 1,
            GameOutcome::Draw => counts.draws = 1,
        }
        counts
    }
}

impl AddAssign for GameCounts {
    fn add_assign(&mut self, rhs: Self) {
        self.x_wins += rhs.x_wins;
        self.o_wins += rhs.o_wins;
        self.draws += rhs.draws;
    }
}

/// Count every distinct move sequence from the empty board to a terminal
/// board. Classic 3×3 with X opening has 255 168 games.
pub fn count_games(geometry: Geometry, first_player: Player) -> GameCounts {
    fn count(
        board: &Board,
        to_move: Player,
        memo: &mut HashMap<(StateKey, Player), GameCounts>,
    ) -> GameCounts {
        if let Some(outcome) = GameOutcome::of(board) {
            return GameCounts::of(outcome);
        }
        let key = (board.state_key(), to_move);
        if let Some(&counts) = memo.get(&key) {
            return counts;
        }

        let mut total = GameCounts::default();
        for pos in board.available_moves() {
            total += count(&board.place(pos, to_move), to_move.opponent(), memo);
        }
        memo.insert(key, total);
        total
    }

    count(&Board::empty(geometry), first_player, &mut HashMap::new())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classic_board_has_5478_reachable_states() {
        let states = reachable_states(Geometry::classic(), Player::X);
        assert_eq!(states.len(), 5_478);
    }

    #[test]
    fn every_state_has_consistent_turn() {
        for state in reachable_states(Geometry::classic(), Player::X) {
            let x = state
                .board
                .cells()
                .iter()
                .filter(|c| c.to_player() == Some(Player::X))
                .count();
            let o = state.board.occupied_count() - x;
            let expected = if x == o { Player::X } else { Player::O };
            assert_eq!(state.to_move, expected, "bad turn for {}", state.board);
        }
    }

    #[test]
    fn classic_game_counts() {
        let counts = count_games(Geometry::classic(), Player::X);
        assert_eq!(counts.total(), 255_168);
        assert_eq!(counts.x_wins, 131_184);
        assert_eq!(counts.o_wins, 77_904);
        assert_eq!(counts.draws, 46_080);
    }

    #[test]
    fn tiny_board_enumeration() {
        // 2x2 with two in a row: X always wins on its second move
        let geometry = Geometry::new(2, 2).unwrap();
        let states = reachable_states(geometry, Player::X);
        assert!(states.iter().all(|s| s.board.occupied_count() <= 3));
    }
}

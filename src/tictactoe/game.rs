//! Game outcomes

use serde::{Deserialize, Serialize};

use super::board::{Board, Player};

/// Outcome of a finished game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameOutcome {
    Win(Player),
    Draw,
}

impl GameOutcome {
    /// Outcome of a board, or `None` while the game is still in play.
    pub fn of(board: &Board) -> Option<Self> {
        if let Some(winner) = board.winner() {
            Some(GameOutcome::Win(winner))
        } else if board.is_full() {
            Some(GameOutcome::Draw)
        } else {
            None
        }
    }

    /// Terminal reward from `player`'s perspective: +1 win, 0 draw, -1 loss.
    pub fn reward_for(self, player: Player) -> f64 {
        match self {
            GameOutcome::Win(winner) if winner == player => 1.0,
            GameOutcome::Win(_) => -1.0,
            GameOutcome::Draw => 0.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tictactoe::Geometry;

    #[test]
    fn outcome_of_boards() {
        let geometry = Geometry::classic();
        assert_eq!(GameOutcome::of(&Board::empty(geometry)), None);
        assert_eq!(
            GameOutcome::of(&Board::parse("OOOXX.X..", geometry).unwrap()),
            Some(GameOutcome::Win(Player::O))
        );
        assert_eq!(
            GameOutcome::of(&Board::parse("XOXXOOOXX", geometry).unwrap()),
            Some(GameOutcome::Draw)
        );
    }

    #[test]
    fn rewards_follow_perspective() {
        let x_wins = GameOutcome::Win(Player::X);
        assert_eq!(x_wins.reward_for(Player::X), 1.0);
        assert_eq!(x_wins.reward_for(Player::O), -1.0);
        assert_eq!(GameOutcome::Draw.reward_for(Player::O), 0.0);
    }
}

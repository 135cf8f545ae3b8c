//! Observer port - abstraction for training observation and reporting
//!
//! Observers collect data during a training or evaluation run without
//! coupling the pipeline to any output format.

use crate::{
    Result,
    tictactoe::{Board, GameOutcome, Player},
};

/// Observer trait for monitoring training
///
/// # Event Sequence
///
/// 1. `on_training_start(total_games)` - once at the beginning
/// 2. For each game:
///    - `on_game_start(game_num)`
///    - `on_move(...)` - for each move in the game
///    - `on_game_end(game_num, outcome)`
/// 3. `on_training_end()` - once at the end
///
/// Every method defaults to doing nothing.
///
/// # Examples
///
/// ```
/// use tactician::{Result, ports::Observer, tictactoe::GameOutcome};
///
/// struct GameCounter {
///     games: usize,
/// }
///
/// impl Observer for GameCounter {
///     fn on_game_end(&mut self, _game_num: usize, _outcome: GameOutcome) -> Result<()> {
///         self.games += 1;
///         Ok(())
///     }
/// }
/// ```
pub trait Observer: Send {
    /// Called when training starts.
    fn on_training_start(&mut self, _total_games: usize) -> Result<()> {
        Ok(())
    }

    /// Called when a game starts (`game_num` is 0-based).
    fn on_game_start(&mut self, _game_num: usize) -> Result<()> {
        Ok(())
    }

    /// Called for each move, after it is chosen and before it is applied.
    ///
    /// `board` is the position the move was chosen on.
    fn on_move(
        &mut self,
        _game_num: usize,
        _step_num: usize,
        _board: &Board,
        _player: Player,
        _move_pos: usize,
    ) -> Result<()> {
        Ok(())
    }

    /// Called when a game reaches a terminal board, after both sides learned.
    fn on_game_end(&mut self, _game_num: usize, _outcome: GameOutcome) -> Result<()> {
        Ok(())
    }

    /// Called when training completes.
    fn on_training_end(&mut self) -> Result<()> {
        Ok(())
    }
}

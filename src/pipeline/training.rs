//! Training pipeline: plays full games between two learners

use std::{fs::File, io::BufWriter, path::Path};

use log::debug;
use serde::{Deserialize, Serialize};

use crate::{
    Error, Result,
    ports::{Learner, Observer},
    tictactoe::{Board, GameOutcome, Geometry, Player},
};

/// Training configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrainingConfig {
    /// Number of games to play
    pub num_games: usize,

    /// Random seed handed to both learners before the first game
    pub seed: Option<u64>,

    /// Whether the agent plays as X or O
    pub agent_player: Player,

    /// Which player opens every game
    pub first_player: Player,

    /// Board the games are played on
    pub geometry: Geometry,

    /// Ask learners to drop their search caches before every game
    pub clear_memo_each_game: bool,
}

impl Default for TrainingConfig {
    fn default() -> Self {
        Self {
            num_games: 10_000,
            seed: None,
            agent_player: Player::X,
            first_player: Player::X,
            geometry: Geometry::classic(),
            clear_memo_each_game: false,
        }
    }
}

/// Result of a training or evaluation run, from the agent's perspective
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrainingResult {
    /// Total games played
    pub total_games: usize,

    /// Number of wins
    pub wins: usize,

    /// Number of draws
    pub draws: usize,

    /// Number of losses
    pub losses: usize,

    /// Win rate
    pub win_rate: f64,

    /// Draw rate
    pub draw_rate: f64,

    /// Loss rate
    pub loss_rate: f64,
}

impl TrainingResult {
    /// Create a new training result
    pub fn new(total_games: usize, wins: usize, draws: usize, losses: usize) -> Self {
        let rate = |count: usize| {
            if total_games > 0 {
                count as f64 / total_games as f64
            } else {
                0.0
            }
        };

        Self {
            total_games,
            wins,
            draws,
            losses,
            win_rate: rate(wins),
            draw_rate: rate(draws),
            loss_rate: rate(losses),
        }
    }

    /// Wins minus losses
    pub fn margin(&self) -> i64 {
        self.wins as i64 - self.losses as i64
    }

    /// Save result to JSON file
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let file = File::create(path).map_err(|source| Error::Io {
            operation: "create result file".to_string(),
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::to_writer_pretty(BufWriter::new(file), self).map_err(|e| {
            Error::SerializationContext {
                operation: "serialize training result".to_string(),
                message: e.to_string(),
            }
        })
    }
}

/// Training pipeline for a single learner against an opponent
pub struct TrainingPipeline {
    config: TrainingConfig,
    observers: Vec<Box<dyn Observer>>,
}

impl TrainingPipeline {
    /// Create a new training pipeline
    pub fn new(config: TrainingConfig) -> Self {
        Self {
            config,
            observers: Vec::new(),
        }
    }

    /// Add an observer to the pipeline
    pub fn with_observer(mut self, observer: Box<dyn Observer>) -> Self {
        self.observers.push(observer);
        self
    }

    pub fn config(&self) -> &TrainingConfig {
        &self.config
    }

    /// Play `num_games` games between `agent` and `opponent`.
    ///
    /// Both sides learn after every game; wrap a side in a frozen adapter to
    /// evaluate without learning.
    pub fn run(
        &mut self,
        agent: &mut dyn Learner,
        opponent: &mut dyn Learner,
    ) -> Result<TrainingResult> {
        if let Some(seed) = self.config.seed {
            agent.set_rng_seed(seed)?;
            opponent.set_rng_seed(seed.wrapping_add(1))?;
        }

        let mut wins = 0;
        let mut draws = 0;
        let mut losses = 0;

        for observer in &mut self.observers {
            observer.on_training_start(self.config.num_games)?;
        }

        for game_num in 0..self.config.num_games {
            let outcome = self.play_game(game_num, agent, opponent)?;

            match outcome {
                GameOutcome::Win(winner) if winner == self.config.agent_player => wins += 1,
                GameOutcome::Win(_) => losses += 1,
                GameOutcome::Draw => draws += 1,
            }

            for observer in &mut self.observers {
                observer.on_game_end(game_num, outcome)?;
            }
        }

        for observer in &mut self.observers {
            observer.on_training_end()?;
        }

        Ok(TrainingResult::new(
            self.config.num_games,
            wins,
            draws,
            losses,
        ))
    }

    fn play_game(
        &mut self,
        game_num: usize,
        agent: &mut dyn Learner,
        opponent: &mut dyn Learner,
    ) -> Result<GameOutcome> {
        for observer in &mut self.observers {
            observer.on_game_start(game_num)?;
        }

        let clear = self.config.clear_memo_each_game;
        agent.begin_game(clear)?;
        opponent.begin_game(clear)?;

        let mut board = Board::empty(self.config.geometry);
        let mut to_move = self.config.first_player;
        let mut step_num = 0;

        let outcome = loop {
            if let Some(outcome) = GameOutcome::of(&board) {
                break outcome;
            }

            let learner: &mut dyn Learner = if to_move == self.config.agent_player {
                &mut *agent
            } else {
                &mut *opponent
            };
            let move_pos = learner.select_move(&board, to_move)?;

            for observer in &mut self.observers {
                observer.on_move(game_num, step_num, &board, to_move, move_pos)?;
            }

            board = board.apply_move(move_pos, to_move)?;
            to_move = to_move.opponent();
            step_num += 1;
        };

        debug!("game {game_num} ended after {step_num} moves: {outcome:?}");

        let agent_player = self.config.agent_player;
        agent.learn(outcome, agent_player)?;
        opponent.learn(outcome, agent_player.opponent())?;

        Ok(outcome)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use super::*;
    use crate::pipeline::learners::{MinimaxLearner, RandomLearner};

    #[derive(Default)]
    struct Recorder {
        events: Arc<Mutex<Vec<String>>>,
    }

    impl Observer for Recorder {
        fn on_training_start(&mut self, total_games: usize) -> Result<()> {
            self.events.lock().unwrap().push(format!("start {total_games}"));
            Ok(())
        }

        fn on_game_start(&mut self, game_num: usize) -> Result<()> {
            self.events.lock().unwrap().push(format!("game {game_num}"));
            Ok(())
        }

        fn on_game_end(&mut self, game_num: usize, _outcome: GameOutcome) -> Result<()> {
            self.events.lock().unwrap().push(format!("end {game_num}"));
            Ok(())
        }

        fn on_training_end(&mut self) -> Result<()> {
            self.events.lock().unwrap().push("done".to_string());
            Ok(())
        }
    }

    #[test]
    fn test_training_pipeline() {
        let config = TrainingConfig {
            num_games: 10,
            seed: Some(42),
            ..TrainingConfig::default()
        };

        let mut pipeline = TrainingPipeline::new(config);
        let mut agent = RandomLearner::new("Agent".to_string());
        let mut opponent = RandomLearner::new("Opponent".to_string());

        let result = pipeline.run(&mut agent, &mut opponent).unwrap();

        assert_eq!(result.total_games, 10);
        assert_eq!(result.wins + result.draws + result.losses, 10);
    }

    #[test]
    fn test_observer_event_order() {
        let recorder = Recorder::default();
        let events = Arc::clone(&recorder.events);
        let config = TrainingConfig {
            num_games: 2,
            seed: Some(1),
            ..TrainingConfig::default()
        };

        let mut pipeline = TrainingPipeline::new(config).with_observer(Box::new(recorder));
        let mut agent = RandomLearner::new("a".to_string());
        let mut opponent = RandomLearner::new("b".to_string());
        pipeline.run(&mut agent, &mut opponent).unwrap();

        assert_eq!(
            *events.lock().unwrap(),
            vec!["start 2", "game 0", "end 0", "game 1", "end 1", "done"]
        );
    }

    #[test]
    fn test_minimax_self_play_always_draws() {
        let config = TrainingConfig {
            num_games: 5,
            seed: Some(3),
            agent_player: Player::O,
            ..TrainingConfig::default()
        };

        let mut pipeline = TrainingPipeline::new(config);
        let mut agent = MinimaxLearner::new("o".to_string());
        let mut opponent = MinimaxLearner::new("x".to_string());
        let result = pipeline.run(&mut agent, &mut opponent).unwrap();

        assert_eq!(result.draws, 5);
        assert_eq!(result.margin(), 0);
    }

    #[test]
    fn test_rates_and_margin() {
        let result = TrainingResult::new(8, 4, 2, 2);
        assert_eq!(result.win_rate, 0.5);
        assert_eq!(result.draw_rate, 0.25);
        assert_eq!(result.margin(), 2);
        assert_eq!(TrainingResult::new(0, 0, 0, 0).loss_rate, 0.0);
    }
}

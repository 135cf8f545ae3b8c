//! Learner adapters: the Q-learning agent and the opponents it plays
//!
//! - [`TrainingLearner`]: drives a [`QLearningAgent`] in training mode
//! - [`FrozenLearner`]: drives a [`QLearningAgent`] greedily, never learning
//! - [`RandomLearner`]: uniform random baseline
//! - [`MinimaxLearner`]: perfect play with uniform tie-breaking

use std::{fmt, str::FromStr};

use log::warn;
use rand::{SeedableRng, random, rngs::StdRng, seq::IndexedRandom};
use serde::{Deserialize, Serialize};

use crate::{
    Error, Result,
    minimax::MinimaxEvaluator,
    ports::Learner,
    q_learning::{EXHAUSTIVE_SEARCH_CELL_LIMIT, QLearningAgent},
    tictactoe::{Board, GameOutcome, Geometry, Player},
};

fn check_seat(agent: &QLearningAgent, to_move: Player) -> Result<()> {
    if agent.symbol() == to_move {
        Ok(())
    } else {
        Err(Error::InvalidConfiguration {
            message: format!(
                "agent plays {} but was asked to move for {to_move}",
                agent.symbol()
            ),
        })
    }
}

/// Q-learning agent in training mode
///
/// Explores with the agent's ε, records its decisions and applies the
/// terminal-reward update after each game.
pub struct TrainingLearner<'a> {
    agent: &'a mut QLearningAgent,
}

impl<'a> TrainingLearner<'a> {
    pub fn new(agent: &'a mut QLearningAgent) -> Self {
        Self { agent }
    }

    pub fn agent(&self) -> &QLearningAgent {
        self.agent
    }
}

impl Learner for TrainingLearner<'_> {
    fn select_move(&mut self, board: &Board, to_move: Player) -> Result<usize> {
        check_seat(self.agent, to_move)?;
        self.agent
            .select_move(board, true)
            .ok_or(Error::NoValidMoves)
    }

    fn begin_game(&mut self, clear_caches: bool) -> Result<()> {
        self.agent.begin_game(clear_caches);
        Ok(())
    }

    fn learn(&mut self, outcome: GameOutcome, _role: Player) -> Result<()> {
        let reward = outcome.reward_for(self.agent.symbol());
        self.agent.record_outcome(reward);
        Ok(())
    }

    fn name(&self) -> &str {
        "Q-Learning"
    }

    fn set_rng_seed(&mut self, seed: u64) -> Result<()> {
        self.agent.set_rng_seed(seed);
        Ok(())
    }
}

/// Q-learning agent with learning disabled
///
/// Used for held-out evaluation: no exploration, no trajectory, no updates.
/// Unseen states are still entered into the Q-table at `0.0`.
pub struct FrozenLearner<'a> {
    agent: &'a mut QLearningAgent,
}

impl<'a> FrozenLearner<'a> {
    pub fn new(agent: &'a mut QLearningAgent) -> Self {
        Self { agent }
    }
}

impl Learner for FrozenLearner<'_> {
    fn select_move(&mut self, board: &Board, to_move: Player) -> Result<usize> {
        check_seat(self.agent, to_move)?;
        self.agent
            .select_move(board, false)
            .ok_or(Error::NoValidMoves)
    }

    fn begin_game(&mut self, clear_caches: bool) -> Result<()> {
        self.agent.begin_game(clear_caches);
        Ok(())
    }

    fn name(&self) -> &str {
        "Q-Learning (frozen)"
    }

    fn set_rng_seed(&mut self, seed: u64) -> Result<()> {
        self.agent.set_rng_seed(seed);
        Ok(())
    }
}

/// Random policy learner (baseline)
pub struct RandomLearner {
    name: String,
    rng: StdRng,
}

impl RandomLearner {
    /// Create a new random learner
    pub fn new(name: String) -> Self {
        Self {
            name,
            rng: StdRng::seed_from_u64(random()),
        }
    }

    /// Create a new random learner with a deterministic seed
    pub fn with_seed(name: String, seed: u64) -> Self {
        Self {
            name,
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Learner for RandomLearner {
    fn select_move(&mut self, board: &Board, _to_move: Player) -> Result<usize> {
        if board.is_terminal() {
            return Err(Error::NoValidMoves);
        }
        board
            .available_moves()
            .choose(&mut self.rng)
            .copied()
            .ok_or(Error::NoValidMoves)
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn set_rng_seed(&mut self, seed: u64) -> Result<()> {
        self.rng = StdRng::seed_from_u64(seed);
        Ok(())
    }
}

/// Perfect-play opponent
///
/// Plays uniformly among the moves with the best minimax score for the side
/// to move, which is how an untrained agent with ε = 0 behaves.
pub struct MinimaxLearner {
    name: String,
    evaluator: Option<MinimaxEvaluator>,
    rng: StdRng,
}

impl MinimaxLearner {
    pub fn new(name: String) -> Self {
        Self {
            name,
            evaluator: None,
            rng: StdRng::seed_from_u64(random()),
        }
    }

    pub fn with_seed(name: String, seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
            ..Self::new(name)
        }
    }

    fn evaluator_for(&mut self, player: Player) -> &mut MinimaxEvaluator {
        if self
            .evaluator
            .as_ref()
            .is_some_and(|evaluator| evaluator.perspective() != player)
        {
            self.evaluator = None;
        }
        self.evaluator.get_or_insert_with(|| MinimaxEvaluator::new(player))
    }
}

impl Learner for MinimaxLearner {
    fn select_move(&mut self, board: &Board, to_move: Player) -> Result<usize> {
        if board.is_terminal() {
            return Err(Error::NoValidMoves);
        }
        let best = self
            .evaluator_for(to_move)
            .best_moves(board)
            .ok_or(Error::NoValidMoves)?;
        best.moves
            .choose(&mut self.rng)
            .copied()
            .ok_or(Error::NoValidMoves)
    }

    fn begin_game(&mut self, clear_caches: bool) -> Result<()> {
        if clear_caches && let Some(evaluator) = &mut self.evaluator {
            evaluator.clear();
        }
        Ok(())
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn set_rng_seed(&mut self, seed: u64) -> Result<()> {
        self.rng = StdRng::seed_from_u64(seed);
        Ok(())
    }
}

/// Opponent kinds selectable from the command line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OpponentKind {
    /// Uniform random moves
    Random,
    /// Perfect play
    Minimax,
}

impl OpponentKind {
    /// Get short label
    pub fn label(&self) -> &'static str {
        match self {
            OpponentKind::Random => "random",
            OpponentKind::Minimax => "minimax",
        }
    }

    /// Build a fresh opponent of this kind for boards of `geometry`.
    pub fn create(self, geometry: Geometry, seed: Option<u64>) -> Box<dyn Learner> {
        let name = format!("{}-opponent", self.label());
        match (self, seed) {
            (OpponentKind::Random, Some(seed)) => Box::new(RandomLearner::with_seed(name, seed)),
            (OpponentKind::Random, None) => Box::new(RandomLearner::new(name)),
            (OpponentKind::Minimax, seed) => {
                if geometry.cell_count() > EXHAUSTIVE_SEARCH_CELL_LIMIT {
                    warn!(
                        "the minimax opponent searches the full game tree of a {geometry} board; \
                         expect very slow games"
                    );
                }
                match seed {
                    Some(seed) => Box::new(MinimaxLearner::with_seed(name, seed)),
                    None => Box::new(MinimaxLearner::new(name)),
                }
            }
        }
    }
}

impl fmt::Display for OpponentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for OpponentKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "random" => Ok(OpponentKind::Random),
            "minimax" | "optimal" => Ok(OpponentKind::Minimax),
            _ => Err(Error::ParseOpponent {
                input: s.to_string(),
                expected: "random, minimax".to_string(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{adapters::InMemoryRepository, app::AgentConfig};

    fn classic(text: &str) -> Board {
        Board::parse(text, Geometry::classic()).unwrap()
    }

    #[test]
    fn random_learner_picks_available_moves() {
        let mut learner = RandomLearner::with_seed("r".to_string(), 1);
        let board = classic("XOX.O.X..");
        for _ in 0..30 {
            let pos = learner.select_move(&board, Player::O).unwrap();
            assert!(board.available_moves().contains(&pos));
        }
    }

    #[test]
    fn random_learner_rejects_finished_board() {
        let mut learner = RandomLearner::with_seed("r".to_string(), 1);
        let result = learner.select_move(&classic("XXXOO...."), Player::O);
        assert!(matches!(result, Err(Error::NoValidMoves)));
    }

    #[test]
    fn minimax_learner_blocks_and_wins() {
        let mut learner = MinimaxLearner::with_seed("m".to_string(), 5);
        assert_eq!(learner.select_move(&classic("XX..O...."), Player::O).unwrap(), 2);
        assert_eq!(learner.select_move(&classic("XX.OO...."), Player::X).unwrap(), 2);
    }

    #[test]
    fn minimax_learner_switches_perspective() {
        let mut learner = MinimaxLearner::with_seed("m".to_string(), 5);
        learner.select_move(&Board::default(), Player::X).unwrap();
        // O to move must not reuse X's scores
        assert_eq!(learner.select_move(&classic("OO.XX.X.."), Player::O).unwrap(), 2);
    }

    #[test]
    fn training_learner_rejects_wrong_seat() {
        let config = AgentConfig::new(Player::X).with_seed(1);
        let mut agent = QLearningAgent::with_repository(config, InMemoryRepository::new()).unwrap();
        let mut learner = TrainingLearner::new(&mut agent);
        let result = learner.select_move(&classic("X........"), Player::O);
        assert!(matches!(result, Err(Error::InvalidConfiguration { .. })));
    }

    #[test]
    fn frozen_learner_never_records() {
        let config = AgentConfig::new(Player::X).with_epsilon(1.0).with_seed(1);
        let mut agent = QLearningAgent::with_repository(config, InMemoryRepository::new()).unwrap();
        {
            let mut frozen = FrozenLearner::new(&mut agent);
            frozen.select_move(&Board::default(), Player::X).unwrap();
            frozen.learn(GameOutcome::Win(Player::X), Player::X).unwrap();
        }
        assert!(agent.trajectory().is_empty());
        assert!(agent.q_table().max_value(&Board::default().state_key()) == 0.0);
    }

    #[test]
    fn opponent_kind_parsing() {
        assert_eq!("random".parse::<OpponentKind>().unwrap(), OpponentKind::Random);
        assert_eq!("Minimax".parse::<OpponentKind>().unwrap(), OpponentKind::Minimax);
        assert!(matches!(
            "greedy".parse::<OpponentKind>(),
            Err(Error::ParseOpponent { .. })
        ));
    }
}

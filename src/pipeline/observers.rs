//! Observer implementations for training runs

use indicatif::{ProgressBar, ProgressStyle};
use log::info;
use serde::{Deserialize, Serialize};

use crate::{
    Result,
    ports::Observer,
    tictactoe::{Board, GameOutcome, Player},
};

/// Win/draw/loss tally from one player's perspective
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tally {
    pub wins: usize,
    pub draws: usize,
    pub losses: usize,
}

impl Tally {
    pub fn record(&mut self, outcome: GameOutcome, perspective: Player) {
        match outcome {
            GameOutcome::Win(winner) if winner == perspective => self.wins += 1,
            GameOutcome::Win(_) => self.losses += 1,
            GameOutcome::Draw => self.draws += 1,
        }
    }

    pub fn total(&self) -> usize {
        self.wins + self.draws + self.losses
    }
}

/// Progress bar observer - Shows training progress
pub struct ProgressObserver {
    perspective: Player,
    progress_bar: Option<ProgressBar>,
    tally: Tally,
}

impl ProgressObserver {
    /// Create a progress observer counting results for `perspective`
    pub fn new(perspective: Player) -> Self {
        Self {
            perspective,
            progress_bar: None,
            tally: Tally::default(),
        }
    }

    fn message(&self) -> String {
        format!(
            "{} D:{} L:{}",
            self.tally.wins, self.tally.draws, self.tally.losses
        )
    }
}

impl Observer for ProgressObserver {
    fn on_training_start(&mut self, total_games: usize) -> Result<()> {
        let pb = ProgressBar::new(total_games as u64);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("[{elapsed_precise}] {bar:40.cyan/blue} {pos}/{len} games (W:{msg})")
                .map_err(|e| crate::Error::ProgressBarTemplate {
                    message: e.to_string(),
                })?
                .progress_chars("=>-"),
        );
        self.progress_bar = Some(pb);
        Ok(())
    }

    fn on_game_end(&mut self, game_num: usize, outcome: GameOutcome) -> Result<()> {
        self.tally.record(outcome, self.perspective);

        if let Some(pb) = &self.progress_bar {
            pb.set_position(game_num as u64 + 1);
            pb.set_message(self.message());
        }
        Ok(())
    }

    fn on_training_end(&mut self) -> Result<()> {
        if let Some(pb) = &self.progress_bar {
            pb.finish_with_message(self.message());
        }
        Ok(())
    }
}

/// Logs the results of every block of `interval` games, then starts a new block
pub struct BatchReportObserver {
    perspective: Player,
    interval: usize,
    batch: Tally,
}

impl BatchReportObserver {
    /// Games per report in long training runs
    pub const DEFAULT_INTERVAL: usize = 10_000;

    pub fn new(perspective: Player, interval: usize) -> Self {
        Self {
            perspective,
            interval: interval.max(1),
            batch: Tally::default(),
        }
    }

    /// Results of the block in progress
    pub fn current_batch(&self) -> Tally {
        self.batch
    }
}

impl Observer for BatchReportObserver {
    fn on_game_end(&mut self, game_num: usize, outcome: GameOutcome) -> Result<()> {
        self.batch.record(outcome, self.perspective);

        if (game_num + 1).is_multiple_of(self.interval) {
            info!(
                "games {}-{}: {} won {}, drew {}, lost {}",
                game_num + 2 - self.interval,
                game_num + 1,
                self.perspective,
                self.batch.wins,
                self.batch.draws,
                self.batch.losses
            );
            self.batch = Tally::default();
        }
        Ok(())
    }
}

/// Metrics observer - Tracks training metrics
pub struct MetricsObserver {
    perspective: Player,
    tally: Tally,
    games_started: usize,
    total_moves: usize,
}

impl MetricsObserver {
    /// Create a new metrics observer
    pub fn new(perspective: Player) -> Self {
        Self {
            perspective,
            tally: Tally::default(),
            games_started: 0,
            total_moves: 0,
        }
    }

    fn rate(&self, count: usize) -> f64 {
        match self.tally.total() {
            0 => 0.0,
            total => count as f64 / total as f64,
        }
    }

    /// Get current win rate
    pub fn win_rate(&self) -> f64 {
        self.rate(self.tally.wins)
    }

    /// Get current draw rate
    pub fn draw_rate(&self) -> f64 {
        self.rate(self.tally.draws)
    }

    /// Get current loss rate
    pub fn loss_rate(&self) -> f64 {
        self.rate(self.tally.losses)
    }

    /// Get average game length
    pub fn avg_game_length(&self) -> f64 {
        match self.games_started {
            0 => 0.0,
            games => self.total_moves as f64 / games as f64,
        }
    }

    /// Get metrics summary
    pub fn summary(&self) -> MetricsSummary {
        MetricsSummary {
            total_games: self.tally.total(),
            wins: self.tally.wins,
            draws: self.tally.draws,
            losses: self.tally.losses,
            win_rate: self.win_rate(),
            draw_rate: self.draw_rate(),
            loss_rate: self.loss_rate(),
            avg_game_length: self.avg_game_length(),
        }
    }
}

/// Summary of training metrics
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MetricsSummary {
    pub total_games: usize,
    pub wins: usize,
    pub draws: usize,
    pub losses: usize,
    pub win_rate: f64,
    pub draw_rate: f64,
    pub loss_rate: f64,
    pub avg_game_length: f64,
}

impl Observer for MetricsObserver {
    fn on_game_start(&mut self, _game_num: usize) -> Result<()> {
        self.games_started += 1;
        Ok(())
    }

    fn on_move(
        &mut self,
        _game_num: usize,
        _step_num: usize,
        _board: &Board,
        _player: Player,
        _move_pos: usize,
    ) -> Result<()> {
        self.total_moves += 1;
        Ok(())
    }

    fn on_game_end(&mut self, _game_num: usize, outcome: GameOutcome) -> Result<()> {
        self.tally.record(outcome, self.perspective);
        Ok(())
    }

    fn on_training_end(&mut self) -> Result<()> {
        let summary = self.summary();
        info!(
            "{} games, win rate {:.3}, draw rate {:.3}, loss rate {:.3}, {:.2} moves per game",
            summary.total_games,
            summary.win_rate,
            summary.draw_rate,
            summary.loss_rate,
            summary.avg_game_length
        );
        Ok(())
    }
}

//! Train command - Train a Q-learning agent against a fixed opponent

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use log::info;
use serde::Serialize;

use crate::{
    app::AgentConfig,
    cli::{
        config::AgentArgs,
        output::{print_result, print_section},
    },
    pipeline::{
        BatchReportObserver, MetricsObserver, OpponentKind, ProgressObserver, TrainingConfig,
        TrainingLearner, TrainingPipeline, TrainingResult,
    },
    tictactoe::Player,
};

#[derive(Debug, Serialize)]
struct TrainingSummaryFile<'a> {
    training: &'a TrainingResult,
    opponent: OpponentKind,
    first_player: Player,
    agent: &'a AgentConfig,
    states_learned: usize,
}

fn sanitize_summary_path(raw: &Path) -> PathBuf {
    let mut normalized = raw.to_path_buf();
    let raw_str = raw.as_os_str().to_string_lossy();

    // Treat trailing separators or missing filename as a directory target.
    if raw_str.ends_with(std::path::MAIN_SEPARATOR) || normalized.file_name().is_none() {
        normalized.push("training_summary.json");
        return normalized;
    }

    match normalized.extension().and_then(|ext| ext.to_str()) {
        Some(ext) if ext.eq_ignore_ascii_case("json") => normalized,
        _ => {
            normalized.set_extension("json");
            normalized
        }
    }
}

#[derive(Parser, Debug)]
#[command(about = "Train a Q-learning agent")]
pub struct TrainArgs {
    #[command(flatten)]
    pub agent: AgentArgs,

    /// Opponent to train against (random or minimax)
    #[arg(long, short = 'o', default_value = "random")]
    pub opponent: OpponentKind,

    /// Number of training games
    #[arg(long, short = 'g', default_value_t = 100_000)]
    pub games: usize,

    /// Which symbol makes the first move
    #[arg(long, default_value = "x")]
    pub first_player: Player,

    /// Drop minimax caches before every game
    #[arg(long)]
    pub clear_memo: bool,

    /// Log win/draw/loss counts every this many games
    #[arg(long, default_value_t = BatchReportObserver::DEFAULT_INTERVAL)]
    pub report_interval: usize,

    /// Hide the progress bar
    #[arg(long)]
    pub no_progress: bool,

    /// Optional path for writing a summary JSON file
    #[arg(long)]
    pub summary: Option<PathBuf>,
}

pub fn execute(args: TrainArgs) -> Result<()> {
    let mut agent = args.agent.build_agent()?;
    let player = agent.symbol();
    let geometry = agent.config().geometry;

    print_section(&format!(
        "Training {player} on {geometry} for {} games against {} opponent",
        args.games, args.opponent
    ));

    let config = TrainingConfig {
        num_games: args.games,
        seed: args.agent.seed,
        agent_player: player,
        first_player: args.first_player,
        geometry,
        clear_memo_each_game: args.clear_memo,
    };

    let mut pipeline = TrainingPipeline::new(config)
        .with_observer(Box::new(BatchReportObserver::new(
            player,
            args.report_interval,
        )))
        .with_observer(Box::new(MetricsObserver::new(player)));
    if !args.no_progress {
        pipeline = pipeline.with_observer(Box::new(ProgressObserver::new(player)));
    }

    let mut opponent = args.opponent.create(geometry, None);
    let result = {
        let mut learner = TrainingLearner::new(&mut agent);
        pipeline
            .run(&mut learner, opponent.as_mut())
            .context("training failed")?
    };

    agent.save().with_context(|| {
        format!(
            "failed to save Q-table to {}",
            agent.persistence_path().display()
        )
    })?;

    print_section("Training complete");
    print_result(&result);
    println!(
        "\nQ-table: {} states, {} values -> {}",
        agent.q_table().len(),
        agent.q_table().entry_count(),
        agent.persistence_path().display()
    );

    if let Some(raw) = &args.summary {
        let path = sanitize_summary_path(raw);
        let summary = TrainingSummaryFile {
            training: &result,
            opponent: args.opponent,
            first_player: args.first_player,
            agent: agent.config(),
            states_learned: agent.q_table().len(),
        };
        let file = std::fs::File::create(&path)
            .with_context(|| format!("failed to create {}", path.display()))?;
        serde_json::to_writer_pretty(file, &summary)
            .with_context(|| format!("failed to write {}", path.display()))?;
        info!("training summary written to {}", path.display());
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn summary_path_gets_json_extension() {
        assert_eq!(
            sanitize_summary_path(Path::new("run1")),
            PathBuf::from("run1.json")
        );
        assert_eq!(
            sanitize_summary_path(Path::new("out/run.JSON")),
            PathBuf::from("out/run.JSON")
        );
    }

    #[test]
    fn directory_target_gets_default_file_name() {
        let dir = format!("out{}", std::path::MAIN_SEPARATOR);
        assert_eq!(
            sanitize_summary_path(Path::new(&dir)),
            Path::new("out").join("training_summary.json")
        );
    }

    #[test]
    fn parses_command_line() {
        let args = TrainArgs::try_parse_from([
            "train",
            "--player",
            "o",
            "--opponent",
            "minimax",
            "--games",
            "20",
            "--epsilon",
            "0.3",
            "--no-progress",
        ])
        .unwrap();

        assert_eq!(args.agent.player, Player::O);
        assert_eq!(args.opponent, OpponentKind::Minimax);
        assert_eq!(args.games, 20);
        assert_eq!(args.agent.agent_config().unwrap().epsilon, 0.3);
        assert!(args.no_progress);
    }
}

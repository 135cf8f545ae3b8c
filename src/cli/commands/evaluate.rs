//! Evaluate command - Play a trained agent greedily against an opponent

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use serde::Serialize;

use crate::{
    adapters::InMemoryRepository,
    cli::{
        config::AgentArgs,
        output::{print_kv, print_result, print_section},
    },
    pipeline::{
        FrozenLearner, MetricsObserver, OpponentKind, TrainingConfig, TrainingPipeline,
        TrainingResult,
    },
    q_learning::QLearningAgent,
    tictactoe::Player,
};

#[derive(Parser, Debug)]
#[command(about = "Evaluate a trained agent")]
pub struct EvaluateArgs {
    #[command(flatten)]
    pub agent: AgentArgs,

    /// Opponent to evaluate against (random or minimax)
    #[arg(long, short = 'o', default_value = "random")]
    pub opponent: OpponentKind,

    /// Number of evaluation games
    #[arg(long, short = 'g', default_value_t = 1_000)]
    pub games: usize,

    /// Which symbol makes the first move
    #[arg(long, default_value = "x")]
    pub first_player: Player,

    /// Also play an untrained agent under the same seed and report the difference
    #[arg(long)]
    pub baseline: bool,

    /// Export results to a JSON file
    #[arg(long)]
    pub export: Option<PathBuf>,
}

#[derive(Debug, Serialize)]
struct EvaluationReport {
    opponent: OpponentKind,
    seed: u64,
    trained: TrainingResult,
    baseline: Option<TrainingResult>,
}

/// Play `agent` greedily (no exploration, no learning) for the configured games.
pub fn evaluate_agent(
    agent: &mut QLearningAgent,
    opponent: OpponentKind,
    config: TrainingConfig,
) -> crate::Result<TrainingResult> {
    let mut opponent = opponent.create(config.geometry, config.seed);
    let perspective = config.agent_player;
    let mut pipeline =
        TrainingPipeline::new(config).with_observer(Box::new(MetricsObserver::new(perspective)));
    let mut frozen = FrozenLearner::new(agent);
    pipeline.run(&mut frozen, opponent.as_mut())
}

pub fn execute(args: EvaluateArgs) -> Result<()> {
    let mut agent = args.agent.build_agent()?;
    if agent.q_table().is_empty() {
        log::warn!(
            "no learned values at {}; evaluating an untrained agent",
            agent.persistence_path().display()
        );
    }

    let seed = args.agent.seed.unwrap_or_else(rand::random);
    let config = TrainingConfig {
        num_games: args.games,
        seed: Some(seed),
        agent_player: agent.symbol(),
        first_player: args.first_player,
        geometry: agent.config().geometry,
        clear_memo_each_game: false,
    };

    print_section(&format!(
        "Evaluating {} ({} states) against {} opponent",
        agent.symbol(),
        agent.q_table().len(),
        args.opponent
    ));

    let trained = evaluate_agent(&mut agent, args.opponent, config.clone())
        .context("evaluation failed")?;
    print_result(&trained);

    let baseline = if args.baseline {
        let mut untrained =
            QLearningAgent::with_repository(agent.config().clone(), InMemoryRepository::new())
                .context("failed to create baseline agent")?;
        let baseline = evaluate_agent(&mut untrained, args.opponent, config)
            .context("baseline evaluation failed")?;

        print_section("Untrained baseline (same seed)");
        print_result(&baseline);
        print_kv(
            "Margin gain",
            &(trained.margin() - baseline.margin()).to_string(),
        );
        Some(baseline)
    } else {
        None
    };

    if let Some(path) = &args.export {
        let report = EvaluationReport {
            opponent: args.opponent,
            seed,
            trained,
            baseline,
        };
        let file = std::fs::File::create(path)
            .with_context(|| format!("failed to create {}", path.display()))?;
        serde_json::to_writer_pretty(file, &report)
            .with_context(|| format!("failed to write {}", path.display()))?;
        println!("\nResults exported to {}", path.display());
    }

    Ok(())
}

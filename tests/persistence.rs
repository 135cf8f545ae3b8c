//! Q-table files on disk, read back through a fresh agent

mod common;

use common::classic;
use tactician::{
    AgentConfig, Error, Player, QLearningAgent,
    adapters::MsgPackRepository,
    pipeline::{RandomLearner, TrainingConfig, TrainingLearner, TrainingPipeline},
};
use tempfile::tempdir;

fn trained_agent(config: AgentConfig) -> QLearningAgent {
    let mut agent = QLearningAgent::new(config).unwrap();
    let mut opponent = RandomLearner::with_seed("random".to_string(), 8);
    {
        let mut learner = TrainingLearner::new(&mut agent);
        TrainingPipeline::new(TrainingConfig {
            num_games: 200,
            seed: Some(7),
            ..TrainingConfig::default()
        })
        .run(&mut learner, &mut opponent)
        .unwrap();
    }
    agent
}

#[test]
fn json_round_trip_restores_every_value() {
    let tmp = tempdir().unwrap();
    let path = tmp.path().join("agent_q_values.json");
    let config = AgentConfig::new(Player::X).with_persistence_path(&path);

    let agent = trained_agent(config.clone());
    assert!(!agent.q_table().is_empty());
    agent.save().unwrap();

    let reloaded = QLearningAgent::new(config).unwrap();
    assert_eq!(reloaded.q_table(), agent.q_table());
}

#[test]
fn json_file_uses_text_keys() {
    let tmp = tempdir().unwrap();
    let path = tmp.path().join("values.json");
    let mut agent =
        QLearningAgent::new(AgentConfig::new(Player::X).with_persistence_path(&path)).unwrap();
    agent
        .q_table_mut()
        .set(&classic("X   O    ").state_key(), 2, 0.1);
    agent.save().unwrap();

    let raw: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
    assert_eq!(raw["X   O    "]["2"], 0.1);
}

#[test]
fn missing_file_starts_empty() {
    let tmp = tempdir().unwrap();
    let config =
        AgentConfig::new(Player::O).with_persistence_path(tmp.path().join("never_written.json"));

    let agent = QLearningAgent::new(config).unwrap();
    assert!(agent.q_table().is_empty());
}

#[test]
fn malformed_file_starts_empty_and_is_overwritten() {
    let tmp = tempdir().unwrap();
    let path = tmp.path().join("broken.json");
    std::fs::write(&path, "{ not json").unwrap();
    let config = AgentConfig::new(Player::X).with_persistence_path(&path);

    let mut agent = QLearningAgent::new(config.clone()).unwrap();
    assert!(agent.q_table().is_empty());
    assert!(agent.try_load().unwrap_err().is_persistence());

    agent.q_table_mut().set(&classic("         ").state_key(), 4, 0.25);
    assert!(agent.save_or_warn());

    let reloaded = QLearningAgent::new(config).unwrap();
    assert_eq!(reloaded.q_table().len(), 1);
}

#[test]
fn unwritable_path_is_reported_not_fatal() {
    let tmp = tempdir().unwrap();
    let path = tmp.path().join("missing_dir").join("values.json");
    let agent =
        QLearningAgent::new(AgentConfig::new(Player::X).with_persistence_path(path)).unwrap();

    assert!(agent.save().is_err());
    assert!(!agent.save_or_warn());
}

#[test]
fn msgpack_round_trip() {
    let tmp = tempdir().unwrap();
    let path = tmp.path().join("values.msgpack");
    let config = AgentConfig::new(Player::X).with_persistence_path(&path);

    let json_trained = trained_agent(
        config
            .clone()
            .with_persistence_path(tmp.path().join("unused.json")),
    );
    let mut agent =
        QLearningAgent::with_repository(config.clone(), MsgPackRepository::new()).unwrap();
    *agent.q_table_mut() = json_trained.q_table().clone();
    agent.save().unwrap();

    let reloaded = QLearningAgent::with_repository(config, MsgPackRepository::new()).unwrap();
    assert_eq!(reloaded.q_table(), json_trained.q_table());
}

#[test]
fn malformed_files_are_classified_alike_in_every_format() {
    let tmp = tempdir().unwrap();
    let json_path = tmp.path().join("broken.json");
    let msgpack_path = tmp.path().join("broken.msgpack");
    std::fs::write(&json_path, "[1, 2").unwrap();
    std::fs::write(&msgpack_path, [0xc1, 0x00, 0xff]).unwrap();

    let json_config = AgentConfig::new(Player::X).with_persistence_path(&json_path);
    let msgpack_config = AgentConfig::new(Player::X).with_persistence_path(&msgpack_path);

    let json = QLearningAgent::new(json_config).unwrap();
    let msgpack =
        QLearningAgent::with_repository(msgpack_config, MsgPackRepository::new()).unwrap();

    assert!(json.q_table().is_empty());
    assert!(msgpack.q_table().is_empty());
    assert!(matches!(
        json.try_load(),
        Err(Error::MalformedQTable { format: "JSON", .. })
    ));
    assert!(matches!(
        msgpack.try_load(),
        Err(Error::MalformedQTable {
            format: "MessagePack",
            ..
        })
    ));
}

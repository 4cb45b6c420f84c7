use std::io::Write;

use pretty_assertions::assert_eq;

use fedvote_common::QuorumSetError;
use fedvote_config::{load_config, ConfigError, NodeConfig};

use fedvote_test::{flat, pk, qset, stmt, NonEmptyStatement, TestContext};

type Config = NodeConfig<TestContext>;

const CONFIG: &str = r#"
public_key = "A"

[quorum_set]
threshold = 2
validators = ["A", "B"]

[[quorum_set.inner_quorum_sets]]
threshold = 1
validators = ["C", "D"]

[peers.B]
threshold = 1
validators = ["A"]
"#;

#[test]
fn parse() {
    let config = Config::from_toml_str(CONFIG).unwrap();

    let expected = Config::new(pk("A"), qset(2, &["A", "B"], vec![flat(1, &["C", "D"])]))
        .with_peer(pk("B"), flat(1, &["A"]));

    assert_eq!(config, expected);
}

#[test]
fn round_trip() {
    let config = Config::new(pk("A"), qset(2, &["A", "B"], vec![flat(1, &["C", "D"])]))
        .with_peer(pk("B"), flat(1, &["A"]))
        .with_peer(pk("C"), qset(1, &[], vec![flat(1, &["D"])]));

    let toml = config.to_toml_string().unwrap();
    assert_eq!(Config::from_toml_str(&toml).unwrap(), config);
}

#[test]
fn peers_are_optional() {
    let config = Config::from_toml_str(
        r#"
        public_key = "A"

        [quorum_set]
        threshold = 1
        validators = ["A"]
        "#,
    )
    .unwrap();

    assert!(config.peers.is_empty());
}

#[test]
fn invalid_quorum_set_is_rejected() {
    let result = Config::from_toml_str(
        r#"
        public_key = "A"

        [quorum_set]
        threshold = 1
        validators = ["A"]

        [peers.B]
        threshold = 3
        validators = ["A", "C"]
        "#,
    );

    match result {
        Err(ConfigError::InvalidQuorumSet { node, source }) => {
            assert_eq!(node, "B");
            assert_eq!(
                source,
                QuorumSetError::ThresholdTooHigh {
                    path: "root".to_string(),
                    threshold: 3,
                    children: 2,
                }
            );
        }
        other => panic!("unexpected result: {other:?}"),
    }
}

#[test]
fn duplicate_validator_is_rejected() {
    let config = Config::new(pk("A"), qset(2, &["A"], vec![flat(1, &["A", "B"])]));

    assert!(matches!(
        config.validate(),
        Err(ConfigError::InvalidQuorumSet {
            source: QuorumSetError::DuplicateValidator { .. },
            ..
        })
    ));
}

#[test]
fn malformed_toml_is_a_parse_error() {
    let result = Config::from_toml_str("public_key = ");
    assert!(matches!(result, Err(ConfigError::Parse(_))));
}

#[test]
fn load_from_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(CONFIG.as_bytes()).unwrap();

    let config = load_config::<TestContext>(file.path()).unwrap();
    assert_eq!(config.public_key, pk("A"));
}

#[test]
fn missing_file_is_an_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let result = load_config::<TestContext>(dir.path().join("missing.toml"));

    assert!(matches!(result, Err(ConfigError::Io { .. })));
}

#[test_log::test]
fn engine_from_config() {
    let config = Config::new(pk("A"), flat(1, &["A"])).with_peer(pk("B"), flat(1, &["A"]));

    let mut engine = config.into_engine(NonEmptyStatement);

    assert_eq!(engine.public_key(), &pk("A"));
    assert_eq!(engine.peer_quorum_sets().get(&pk("B")), Some(&flat(1, &["A"])));

    assert!(engine.vote_for_statement(stmt("x")).is_some());
    assert!(engine.has_consensus());
}

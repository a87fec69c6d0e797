//! Replay verification tests.

use proleague_core::{
    config::FixtureConfig,
    engine::MatchEngine,
    event::EventType,
    replay::{outcome_digest, verify_outcome, RecordedOutcome},
    rng::MatchRng,
    team::TeamDescriptor,
    Seed, SimError,
};
use rand::RngCore;
use serde_json::json;

fn fixture() -> FixtureConfig {
    FixtureConfig::reference("fixture-1", 0x3E2D_1C0B_9A8F_7E6Du64)
}

#[test]
fn genuine_outcome_verifies() {
    let fixture = fixture();
    let outcome = MatchEngine::build(&fixture).unwrap().run();
    verify_outcome(&fixture, &outcome).expect("genuine outcome must verify");
}

#[test]
fn tampered_event_is_pinpointed() {
    let fixture = fixture();
    let mut outcome = MatchEngine::build(&fixture).unwrap().run();

    let index = 100;
    let minute = outcome.event_log[index].minute();
    outcome.event_log[index].event_type = EventType::Goal;
    outcome.event_log[index].player_index = (outcome.event_log[index].player_index + 1) % 23;

    match verify_outcome(&fixture, &outcome) {
        Err(SimError::DeterminismViolation { index: at, minute: m }) => {
            assert_eq!(at, index);
            assert_eq!(m, minute);
        }
        other => panic!("expected DeterminismViolation, got {other:?}"),
    }
}

#[test]
fn truncated_log_is_rejected() {
    let fixture = fixture();
    let mut outcome = MatchEngine::build(&fixture).unwrap().run();
    let full_len = outcome.event_log.len();
    outcome.event_log.truncate(full_len - 3);

    match verify_outcome(&fixture, &outcome) {
        Err(SimError::DeterminismViolation { index, .. }) => assert_eq!(index, full_len - 3),
        other => panic!("expected DeterminismViolation, got {other:?}"),
    }
}

#[test]
fn edited_report_is_rejected() {
    let fixture = fixture();
    let mut outcome = MatchEngine::build(&fixture).unwrap().run();
    outcome.match_report.away_score += 1;

    match verify_outcome(&fixture, &outcome) {
        Err(SimError::DeterminismViolation { index, minute }) => {
            assert_eq!(index, outcome.event_log.len());
            assert_eq!(minute, 90);
        }
        other => panic!("expected DeterminismViolation, got {other:?}"),
    }
}

#[test]
fn wrong_seed_does_not_verify() {
    let recorded = MatchEngine::build(&fixture()).unwrap().run();
    let other = FixtureConfig::reference("fixture-1", 0x4F5E_6D7C_8B9A_0F1Eu64);
    assert!(matches!(
        verify_outcome(&other, &recorded),
        Err(SimError::DeterminismViolation { .. })
    ));
}

#[test]
fn invalid_descriptors_are_rejected_before_replay() {
    let mut bad = fixture();
    bad.home = TeamDescriptor::new("Broken", 120, 80, 80, 90);
    let outcome = MatchEngine::build(&fixture()).unwrap().run();
    assert!(matches!(verify_outcome(&bad, &outcome), Err(SimError::InvalidInput(_))));
}

#[test]
fn digest_is_stable_and_seed_sensitive() {
    let a = MatchEngine::build(&fixture()).unwrap().run();
    let b = MatchEngine::build(&fixture()).unwrap().run();
    let c = MatchEngine::build(&FixtureConfig::reference("fixture-1", 42u64)).unwrap().run();

    let digest_a = outcome_digest(&a).unwrap();
    assert_eq!(digest_a.len(), 64);
    assert!(digest_a.chars().all(|ch| ch.is_ascii_hexdigit() && !ch.is_ascii_uppercase()));
    assert_eq!(digest_a, outcome_digest(&b).unwrap());
    assert_ne!(digest_a, outcome_digest(&c).unwrap());
}

#[test]
fn outcome_survives_a_json_round_trip_for_verification() {
    let mut seeds = MatchRng::new(0x5EED);
    for _ in 0..200 {
        let fixture = FixtureConfig::reference("fixture-1", RngCore::next_u64(&mut seeds));
        let outcome = MatchEngine::build(&fixture).unwrap().run();
        let stored = serde_json::to_string(&outcome).unwrap();
        let restored = serde_json::from_str(&stored).unwrap();
        assert_eq!(outcome, restored, "seed {} changed across JSON", fixture.seed);
        verify_outcome(&fixture, &restored)
            .unwrap_or_else(|e| panic!("seed {}: restored outcome must verify: {e}", fixture.seed));
    }
}

fn enveloped(fixture: &FixtureConfig) -> serde_json::Value {
    let outcome = MatchEngine::build(fixture).unwrap().run();
    json!({
        "runnerVersion": "0.1.0",
        "generatedAt": "2026-01-01T00:00:00+00:00",
        "seed": fixture.seed,
        "digest": outcome_digest(&outcome).unwrap(),
        "outcome": outcome,
    })
}

#[test]
fn envelope_supplies_the_seed_for_verification() {
    let text = enveloped(&fixture()).to_string();
    let recorded = RecordedOutcome::from_json_str(&text).unwrap();
    assert_eq!(recorded.seed, Some(Seed(0x3E2D_1C0B_9A8F_7E6D)));

    let replay = recorded.fixture(None, None).unwrap();
    assert_eq!(replay.fixture_id, "fixture-1");
    verify_outcome(&replay, &recorded.outcome).expect("enveloped outcome must verify");
}

#[test]
fn bare_outcome_needs_an_explicit_seed() {
    let outcome = MatchEngine::build(&fixture()).unwrap().run();
    let recorded = RecordedOutcome::from_json_str(&serde_json::to_string(&outcome).unwrap()).unwrap();
    assert_eq!(recorded.seed, None);
    assert!(matches!(recorded.fixture(None, None), Err(SimError::InvalidInput(_))));

    let replay = recorded.fixture(None, Some(Seed(0x3E2D_1C0B_9A8F_7E6D))).unwrap();
    verify_outcome(&replay, &recorded.outcome).expect("bare outcome verifies with its seed");
}

#[test]
fn explicit_seed_overrides_the_recorded_one() {
    let text = enveloped(&fixture()).to_string();
    let recorded = RecordedOutcome::from_json_str(&text).unwrap();
    let replay = recorded.fixture(Some("derby"), Some(Seed(42))).unwrap();
    assert_eq!(replay.seed, Seed(42));
    assert_eq!(replay.fixture_id, "derby");
    assert!(matches!(
        verify_outcome(&replay, &recorded.outcome),
        Err(SimError::DeterminismViolation { .. })
    ));
}

#[test]
fn batch_output_verifies_line_by_line() {
    let fixtures: Vec<FixtureConfig> = [1u64, 2, 3]
        .into_iter()
        .map(|seed| FixtureConfig::reference(format!("fixture-{seed}"), seed))
        .collect();
    let lines: Vec<String> = fixtures.iter().map(|f| enveloped(f).to_string()).collect();

    let recorded = RecordedOutcome::parse_all(&format!("{}\n", lines.join("\n"))).unwrap();
    assert_eq!(recorded.len(), fixtures.len());
    for (entry, fixture) in recorded.iter().zip(&fixtures) {
        assert_eq!(entry.seed, Some(fixture.seed));
        let replay = entry.fixture(None, None).unwrap();
        verify_outcome(&replay, &entry.outcome).expect("each batch line must verify");
    }
}

#[test]
fn missing_outcome_file_is_an_io_error() {
    let missing = std::env::temp_dir().join("proleague-no-such-outcome.json");
    let result = RecordedOutcome::load(missing.to_str().unwrap());
    assert!(matches!(result, Err(SimError::Io(_))), "got {result:?}");
}

//! match-runner: headless match simulator for ProLeague.
//!
//! Usage:
//!   match-runner --fixture fixture-1 --seed 0x3E2D1C0B9A8F7E6D
//!   match-runner --fixtures fixtures.json --json
//!   match-runner --verify outcome.json            (seed read from the --json envelope)
//!   match-runner --seed 0x3E2D1C0B9A8F7E6D --verify bare-outcome.json
//!   match-runner --ipc-mode

use anyhow::Result;
use proleague_core::{
    batch::simulate_batch,
    config::{FixtureConfig, FixtureSet},
    engine::{MatchEngine, MatchOutcome},
    event::EventType,
    replay::{outcome_digest, verify_outcome, RecordedOutcome},
    Seed, SimError,
};
use std::env;
use std::io::{self, BufRead, Write};
use std::process::ExitCode;

const DEFAULT_FIXTURE: &str = "fixture-1";
const DEFAULT_SEED: &str = "0x3E2D1C0B9A8F7E6D";

#[derive(serde::Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum IpcCommand {
    Simulate(FixtureConfig),
    Verify {
        fixture: FixtureConfig,
        outcome: MatchOutcome,
    },
    Quit,
}

/// Output wrapper. Wall-clock time lives here only, never in the core.
#[derive(serde::Serialize)]
#[serde(rename_all = "camelCase")]
struct OutcomeEnvelope<'a> {
    runner_version: &'static str,
    generated_at:   String,
    seed:           Seed,
    digest:         String,
    outcome:        &'a MatchOutcome,
}

fn main() -> Result<ExitCode> {
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    let as_json = args.iter().any(|a| a == "--json");

    if args.iter().any(|a| a == "--ipc-mode") {
        run_ipc_loop()?;
        return Ok(ExitCode::SUCCESS);
    }

    if let Some(path) = flag_value(&args, "--fixtures") {
        let set = FixtureSet::load(path)?;
        let outcomes = simulate_batch(&set.fixtures)?;
        for (fixture, outcome) in set.fixtures.iter().zip(&outcomes) {
            emit(fixture, outcome, as_json)?;
        }
        return Ok(ExitCode::SUCCESS);
    }

    if let Some(path) = flag_value(&args, "--verify") {
        return verify_file(&args, path);
    }

    let fixture_id = flag_value(&args, "--fixture").unwrap_or(DEFAULT_FIXTURE);
    let seed: Seed = flag_value(&args, "--seed").unwrap_or(DEFAULT_SEED).parse()?;
    let fixture = FixtureConfig::reference(fixture_id, seed);

    if !as_json {
        println!("ProLeague — match-runner");
        println!("  fixture:   {}", fixture.fixture_id);
        println!("  seed:      {}", fixture.seed);
        println!();
    }

    let outcome = MatchEngine::build(&fixture)?.run();
    emit(&fixture, &outcome, as_json)?;
    Ok(ExitCode::SUCCESS)
}

/// Verify every outcome in `path`. `--fixture` / `--seed` override what the
/// file recorded.
fn verify_file(args: &[String], path: &str) -> Result<ExitCode> {
    let fixture_id = flag_value(args, "--fixture");
    let seed = flag_value(args, "--seed").map(str::parse::<Seed>).transpose()?;

    let mut code = ExitCode::SUCCESS;
    for recorded in RecordedOutcome::load(path)? {
        let fixture = recorded.fixture(fixture_id, seed)?;
        match verify_outcome(&fixture, &recorded.outcome) {
            Ok(()) => println!("VERIFIED  {} seed={}", fixture.fixture_id, fixture.seed),
            Err(e @ SimError::DeterminismViolation { .. }) => {
                println!("MISMATCH  {} seed={}: {e}", fixture.fixture_id, fixture.seed);
                code = ExitCode::FAILURE;
            }
            Err(e) => return Err(e.into()),
        }
    }
    Ok(code)
}

fn run_ipc_loop() -> Result<()> {
    let stdin = io::stdin();
    let mut stdout = io::stdout();
    let mut handle = stdin.lock();
    let mut buffer = String::new();

    loop {
        buffer.clear();
        let bytes_read = handle.read_line(&mut buffer)?;
        if bytes_read == 0 {
            break; // EOF
        }
        if buffer.trim().is_empty() {
            continue;
        }

        let cmd: IpcCommand = match serde_json::from_str(&buffer) {
            Ok(c) => c,
            Err(e) => {
                log::warn!("Unreadable IPC command: {e}");
                writeln!(stdout, "{}", serde_json::json!({ "error": e.to_string() }))?;
                stdout.flush()?;
                continue;
            }
        };

        let reply = match cmd {
            IpcCommand::Quit => break,
            IpcCommand::Simulate(fixture) => match MatchEngine::build(&fixture) {
                Ok(engine) => {
                    let outcome = engine.run();
                    serde_json::to_value(envelope(&fixture, &outcome)?)?
                }
                Err(e) => serde_json::json!({ "error": e.to_string() }),
            },
            IpcCommand::Verify { fixture, outcome } => match verify_outcome(&fixture, &outcome) {
                Ok(()) => serde_json::json!({ "verified": true, "fixtureId": fixture.fixture_id }),
                Err(e) => serde_json::json!({
                    "verified": false,
                    "fixtureId": fixture.fixture_id,
                    "error": e.to_string(),
                }),
            },
        };
        writeln!(stdout, "{reply}")?;
        stdout.flush()?;
    }
    Ok(())
}

fn envelope<'a>(fixture: &FixtureConfig, outcome: &'a MatchOutcome) -> Result<OutcomeEnvelope<'a>> {
    Ok(OutcomeEnvelope {
        runner_version: env!("CARGO_PKG_VERSION"),
        generated_at:   chrono::Utc::now().to_rfc3339(),
        seed:           fixture.seed,
        digest:         outcome_digest(outcome)?,
        outcome,
    })
}

fn emit(fixture: &FixtureConfig, outcome: &MatchOutcome, as_json: bool) -> Result<()> {
    if as_json {
        println!("{}", serde_json::to_string(&envelope(fixture, outcome)?)?);
    } else {
        print_summary(fixture, outcome)?;
    }
    Ok(())
}

fn print_summary(fixture: &FixtureConfig, outcome: &MatchOutcome) -> Result<()> {
    let report = &outcome.match_report;

    println!("=== {} ===", fixture.fixture_id);
    println!("  {} {} - {} {}", fixture.home.name, report.home_score, report.away_score, fixture.away.name);
    println!("  seed:        {}", fixture.seed);
    println!("  events:      {}", outcome.event_log.len());
    println!("  possession:  {}% / {}%", report.possession.home, report.possession.away);
    println!("  shots:       {} / {}", report.shots.home, report.shots.away);
    println!("  corners:     {} / {}", report.corners.home, report.corners.away);
    println!("  fouls:       {} / {}", report.fouls.home, report.fouls.away);
    println!("  yellow:      {} / {}", report.yellow_cards.home, report.yellow_cards.away);
    println!("  red:         {} / {}", report.red_cards.home, report.red_cards.away);
    println!("  digest:      {}", outcome_digest(outcome)?);

    let highlights: Vec<_> = report
        .events
        .iter()
        .filter(|line| !matches!(line.event_type, EventType::Possession | EventType::Pass | EventType::Tackle))
        .collect();
    if !highlights.is_empty() {
        println!();
        for line in highlights {
            println!(
                "  {:>2}' {:<4} {:<10} {}",
                line.minute,
                line.team.label(),
                line.event_type.name(),
                line.player
            );
        }
    }
    println!();
    Ok(())
}

fn flag_value<'a>(args: &'a [String], flag: &str) -> Option<&'a str> {
    args.windows(2)
        .find(|w| w[0] == flag)
        .map(|w| w[1].as_str())
}

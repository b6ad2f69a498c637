//! buildspeed -- estimate how many turns until a player can afford a target.
//!
//! Reads a JSON scenario, runs the configured estimator, and writes a JSON
//! report to stdout. Log output goes to stderr (see `BUILDSPEED_LOG`).
//!
//! Usage:
//!   buildspeed --scenario FILE [--estimator NAME] [--cutoff N]

use std::collections::BTreeMap;
use std::env;
use std::process;

use serde::Serialize;

use buildspeed::config::{ConfigError, Scenario};
use buildspeed::estimate::{estimates_from_now, EstimatorKind, SpeedEstimate};
use buildspeed::logging::init_tracing;
use buildspeed::plan::ALL_PIECE_KINDS;
use buildspeed::resources::ResourceSet;

/// Command-line options layered over the scenario file.
#[derive(Debug, Default)]
struct Options {
    scenario: Option<String>,
    estimator: Option<String>,
    cutoff: Option<u32>,
}

/// What gets printed for one scenario.
#[derive(Debug, Serialize)]
struct Report {
    estimator: &'static str,
    target: ResourceSet,
    cutoff: u32,
    converged: bool,
    turns: Option<u32>,
    resources: Option<ResourceSet>,
    #[serde(skip_serializing_if = "Option::is_none")]
    plan_depth: Option<usize>,
    pieces: BTreeMap<&'static str, u32>,
}

fn main() {
    let args: Vec<String> = env::args().collect();
    let mut options = Options::default();

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--scenario" => {
                i += 1;
                options.scenario = Some(flag_value(&args, i, "--scenario").to_string());
            }
            "--estimator" => {
                i += 1;
                options.estimator = Some(flag_value(&args, i, "--estimator").to_string());
            }
            "--cutoff" => {
                i += 1;
                match flag_value(&args, i, "--cutoff").parse() {
                    Ok(n) => options.cutoff = Some(n),
                    Err(_) => usage_error(&format!("invalid --cutoff value: {}", args[i])),
                }
            }
            "--help" | "-h" => {
                print_usage();
                return;
            }
            other => usage_error(&format!("Unknown argument: {}", other)),
        }
        i += 1;
    }

    init_tracing();

    match run(&options) {
        Ok(report) => match serde_json::to_string_pretty(&report) {
            Ok(json) => println!("{}", json),
            Err(e) => {
                eprintln!("error: failed to encode report: {}", e);
                process::exit(1);
            }
        },
        Err(e) => {
            eprintln!("error: {}", e);
            process::exit(1);
        }
    }
}

fn run(options: &Options) -> Result<Report, ConfigError> {
    let path = match &options.scenario {
        Some(path) => path,
        None => usage_error("--scenario is required"),
    };
    let mut scenario = Scenario::load(path)?;
    if let Some(name) = &options.estimator {
        scenario.estimator = name
            .parse::<EstimatorKind>()
            .map_err(ConfigError::UnknownEstimator)?;
    }
    if let Some(cutoff) = options.cutoff {
        scenario.cutoff = cutoff;
    }

    let target = scenario.target()?;
    let estimator = scenario.estimator()?;
    tracing::debug!(
        estimator = estimator.kind().name(),
        cutoff = scenario.cutoff,
        "estimating {} from {}",
        target,
        scenario.current
    );

    let outcome =
        estimator.estimate_turns(&scenario.current, &target, scenario.cutoff, &scenario.ports);
    if let Err(e) = &outcome {
        tracing::info!("{}", e);
    }

    let table = estimates_from_now(
        &estimator,
        &scenario.current,
        &scenario.ports,
        scenario.cutoff,
    );
    let pieces = ALL_PIECE_KINDS
        .iter()
        .map(|&kind| (kind.name(), table.get(kind)))
        .collect();

    Ok(Report {
        estimator: estimator.kind().name(),
        target,
        cutoff: scenario.cutoff,
        converged: outcome.is_ok(),
        turns: outcome.as_ref().ok().map(|r| r.turns),
        resources: outcome.as_ref().ok().map(|r| r.resources),
        plan_depth: scenario.plan.as_ref().map(|p| p.depth()),
        pieces,
    })
}

fn flag_value<'a>(args: &'a [String], i: usize, flag: &str) -> &'a str {
    match args.get(i) {
        Some(value) => value,
        None => usage_error(&format!("{} needs a value", flag)),
    }
}

fn usage_error(message: &str) -> ! {
    eprintln!("{}", message);
    print_usage();
    process::exit(1);
}

fn print_usage() {
    eprintln!("Usage: buildspeed --scenario FILE [OPTIONS]");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  --scenario FILE   JSON scenario to estimate (required)");
    eprintln!("  --estimator NAME  discrete, fractional, or probabilistic");
    eprintln!("                    (default: the scenario's, else fractional)");
    eprintln!("  --cutoff N        Maximum turns to simulate (default: the scenario's, else 40)");
    eprintln!("  --help            Show this help");
}

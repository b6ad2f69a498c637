//! Calibration CLI.
//!
//! Plays a scenario out many times with random dice and prints the observed
//! turn counts next to each estimator's prediction as JSON.
//!
//! Usage:
//!   cargo run --release --bin calibrate -- --scenario FILE [OPTIONS]
//!
//! Options:
//!   --scenario FILE JSON scenario with board numbers (required)
//!   --trials N      Number of play-outs (default: 1000)
//!   --threads N     Number of parallel threads (default: 4)
//!   --seed N        Random seed, 0 for entropy (default: 0)
//!   --quiet         Suppress progress output

use std::env;
use std::process;
use std::time::Instant;

use buildspeed::calibrate::{run_calibration, CalibrationConfig};
use buildspeed::config::Scenario;
use buildspeed::logging::init_tracing;

fn main() {
    let args: Vec<String> = env::args().collect();
    let mut config = CalibrationConfig::default();
    let mut scenario_path: Option<String> = None;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--scenario" => {
                i += 1;
                scenario_path = Some(value(&args, i).to_string());
            }
            "--trials" => {
                i += 1;
                config.trials = parse(&args, i, "--trials");
            }
            "--threads" => {
                i += 1;
                config.threads = parse(&args, i, "--threads");
            }
            "--seed" => {
                i += 1;
                config.seed = parse(&args, i, "--seed");
            }
            "--quiet" => {
                config.quiet = true;
            }
            "--help" | "-h" => {
                print_usage();
                return;
            }
            other => {
                eprintln!("Unknown argument: {}", other);
                print_usage();
                process::exit(1);
            }
        }
        i += 1;
    }

    let Some(path) = scenario_path else {
        eprintln!("--scenario is required");
        print_usage();
        process::exit(1);
    };

    init_tracing();

    let scenario = match Scenario::load(&path) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("error: {}", e);
            process::exit(1);
        }
    };

    if !config.quiet {
        tracing::info!(
            "calibrating {}: {} trials, {} threads, cutoff {}",
            path,
            config.trials,
            config.threads,
            scenario.cutoff
        );
    }

    let start = Instant::now();
    let report = match run_calibration(&config, &scenario) {
        Ok(r) => r,
        Err(e) => {
            eprintln!("error: {}", e);
            process::exit(1);
        }
    };

    if !config.quiet {
        tracing::info!(
            "completed {} trials in {:.1}s ({} did not converge)",
            report.trials,
            start.elapsed().as_secs_f64(),
            report.non_converged
        );
    }

    match serde_json::to_string_pretty(&report) {
        Ok(json) => println!("{}", json),
        Err(e) => {
            eprintln!("error: failed to encode report: {}", e);
            process::exit(1);
        }
    }
}

fn value(args: &[String], i: usize) -> &str {
    match args.get(i) {
        Some(v) => v,
        None => {
            eprintln!("{} needs a value", args[i - 1]);
            process::exit(1);
        }
    }
}

fn parse<T: std::str::FromStr>(args: &[String], i: usize, flag: &str) -> T {
    match value(args, i).parse() {
        Ok(v) => v,
        Err(_) => {
            eprintln!("invalid {} value: {}", flag, args[i]);
            process::exit(1);
        }
    }
}

fn print_usage() {
    eprintln!("Usage: calibrate --scenario FILE [OPTIONS]");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  --scenario FILE  JSON scenario with board numbers (required)");
    eprintln!("  --trials N       Number of play-outs (default: 1000)");
    eprintln!("  --threads N      Number of parallel threads (default: 4)");
    eprintln!("  --seed N         Random seed, 0 for entropy (default: 0)");
    eprintln!("  --quiet          Suppress progress output");
    eprintln!("  --help           Show this help");
}

//! eval-runner: headless driver for the fee & compliance evaluator.
//!
//! Usage:
//!   eval-runner --request request.json --standards NACHA,SOX --db evals.db
//!   eval-runner --seed 12345 --count 200
//!   eval-runner --config overrides.json --seed 7

use anyhow::{Context, Result};
use feeops_core::{
    config::EvaluatorConfig,
    evaluator::FeeEvaluator,
    fee::FeeRequest,
    scenario::ScenarioGenerator,
    store::EvalStore,
};
use std::env;

fn main() -> Result<()> {
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    let seed = parse_arg(&args, "--seed", 42u64);
    let count = parse_arg(&args, "--count", 25u64);
    let request_path = flag_value(&args, "--request");
    let config_path = flag_value(&args, "--config");
    let db_path = flag_value(&args, "--db");
    let standards: Vec<String> = flag_value(&args, "--standards")
        .unwrap_or("NACHA,PCI_DSS,SOX,TILA")
        .split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect();

    let config = match config_path {
        Some(path) => EvaluatorConfig::load(path)?,
        None => EvaluatorConfig::default(),
    };
    let evaluator = FeeEvaluator::new(config);

    let store = match db_path {
        Some(path) => {
            let store = EvalStore::open(path)?;
            store.migrate()?;
            Some(store)
        }
        None => None,
    };

    let as_of = chrono::Utc::now().date_naive();

    match request_path {
        Some(path) => run_single(&evaluator, store.as_ref(), path, &standards, as_of),
        None => run_batch(&evaluator, store.as_ref(), seed, count, &standards, as_of),
    }
}

/// Evaluate one request read from a JSON file and print the report.
fn run_single(
    evaluator: &FeeEvaluator,
    store: Option<&EvalStore>,
    path: &str,
    standards: &[String],
    as_of: chrono::NaiveDate,
) -> Result<()> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Cannot read request file {path}"))?;
    let request: FeeRequest = serde_json::from_str(&content)
        .with_context(|| format!("Cannot parse request file {path}"))?;

    let report = evaluator.evaluate(&request, standards, None, as_of)?;
    println!("{}", serde_json::to_string_pretty(&report)?);

    if let Some(store) = store {
        let id = store.save_evaluation(&report)?;
        log::info!("saved evaluation {id}");
    }
    Ok(())
}

/// Evaluate a seeded batch of generated requests and print a summary.
fn run_batch(
    evaluator: &FeeEvaluator,
    store: Option<&EvalStore>,
    seed: u64,
    count: u64,
    standards: &[String],
    as_of: chrono::NaiveDate,
) -> Result<()> {
    println!("eval-runner — seeded batch");
    println!("  seed:      {seed}");
    println!("  count:     {count}");
    println!("  standards: {}", standards.join(","));
    println!();

    let mut generator = ScenarioGenerator::new(seed);
    let mut compliant = 0u64;
    let mut violations = 0usize;
    let mut warnings = 0usize;
    let mut invalid = 0u64;
    let mut total_fees = 0i64;

    for _ in 0..count {
        let request = generator.next_request();
        let report = evaluator.evaluate(&request, standards, None, as_of)?;

        if report.verdict.compliant {
            compliant += 1;
        }
        violations += report.verdict.violations.len();
        warnings += report.verdict.warnings.len();
        if !report.validation.valid {
            invalid += 1;
        }
        total_fees += report.breakdown.total_cents;

        if let Some(store) = store {
            store.save_evaluation(&report)?;
        }
    }

    println!("=== BATCH SUMMARY ===");
    println!("  evaluations:     {count}");
    println!("  compliant:       {compliant}");
    println!("  violations:      {violations}");
    println!("  warnings:        {warnings}");
    println!("  invalid:         {invalid}");
    println!("  total fees:      ${:.2}", total_fees as f64 / 100.0);
    if let Some(store) = store {
        let recent = store.list_evaluations(5)?;
        println!("  persisted (showing {}):", recent.len());
        for record in recent {
            println!(
                "    {} | {} | ${:.2} | score {}",
                record.evaluation_id,
                record.category,
                record.total_fee_cents as f64 / 100.0,
                record.score
            );
        }
    }
    Ok(())
}

fn parse_arg<T: std::str::FromStr + Copy>(args: &[String], flag: &str, default: T) -> T {
    args.windows(2)
        .find(|w| w[0] == flag)
        .and_then(|w| w[1].parse().ok())
        .unwrap_or(default)
}

fn flag_value<'a>(args: &'a [String], flag: &str) -> Option<&'a str> {
    args.windows(2)
        .find(|w| w[0] == flag)
        .map(|w| w[1].as_str())
}

/*!
 * Arena Heap - Workload Driver
 *
 * Runs a seeded alloc/free workload against one or all placement strategies
 * and prints the reports as JSON.
 *
 * Environment variables:
 * - ARENA_CAPACITY, ARENA_STRATEGY (`all` runs every strategy)
 * - ARENA_WORKLOAD_OPS, ARENA_MAX_REQUEST, ARENA_SEED
 * - RUST_LOG, ARENA_TRACE_JSON
 */

use std::process::ExitCode;
use tracing::{error, info};

use arena_heap::core::config::ENV_STRATEGY;
use arena_heap::{init_tracing, ArenaConfig, ArenaResult, Strategy, Workload, WorkloadReport};

fn main() -> ExitCode {
    // Initialize structured tracing
    init_tracing();

    match run() {
        Ok(reports) => match serde_json::to_string_pretty(&reports) {
            Ok(json) => {
                println!("{}", json);
                ExitCode::SUCCESS
            }
            Err(e) => {
                error!(error = %e, "Failed to serialize workload reports");
                ExitCode::FAILURE
            }
        },
        Err(e) => {
            let report = miette::Report::new(e);
            eprintln!("{:?}", report);
            ExitCode::FAILURE
        }
    }
}

fn run() -> ArenaResult<Vec<WorkloadReport>> {
    let run_all = std::env::var(ENV_STRATEGY)
        .map(|v| v.trim().eq_ignore_ascii_case("all"))
        .unwrap_or(false);

    // ARENA_STRATEGY=all is not a strategy name; only the capacity applies
    let (base, strategies) = if run_all {
        let mut base = ArenaConfig::default();
        if let Some(capacity) = ArenaConfig::capacity_from_env()? {
            base.capacity = capacity;
        }
        (base, Strategy::ALL.to_vec())
    } else {
        let base = ArenaConfig::from_env()?;
        (base, vec![base.strategy])
    };

    let workload = Workload::from_env()?;
    info!(
        capacity = base.capacity,
        operations = workload.operations,
        max_request = workload.max_request,
        seed = workload.seed,
        strategies = strategies.len(),
        "Running arena workload"
    );

    strategies
        .into_iter()
        .map(|strategy| workload.run(&base.with_strategy(strategy)))
        .collect()
}

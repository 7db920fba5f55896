/*!
 * Workload Driver
 * Seeded random alloc/free sequences for comparing placement strategies
 */

use crate::core::config::ArenaConfig;
use crate::core::errors::{ArenaError, ArenaResult};
use crate::core::limits::{
    DEFAULT_WORKLOAD_MAX_REQUEST, DEFAULT_WORKLOAD_OPS, DEFAULT_WORKLOAD_SEED,
};
use crate::memory::{Arena, ArenaStats, Pointer, Strategy};
use crate::monitoring::span_workload;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use tracing::info;

pub const ENV_WORKLOAD_OPS: &str = "ARENA_WORKLOAD_OPS";
pub const ENV_WORKLOAD_MAX_REQUEST: &str = "ARENA_MAX_REQUEST";
pub const ENV_WORKLOAD_SEED: &str = "ARENA_SEED";

/// Workload parameters
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Workload {
    /// Number of alloc/free operations to issue
    pub operations: usize,
    /// Requests are drawn uniformly from `1..=max_request`
    pub max_request: usize,
    /// Probability that an operation frees a live allocation instead of allocating
    pub free_ratio: f64,
    pub seed: u64,
}

impl Default for Workload {
    fn default() -> Self {
        Self {
            operations: DEFAULT_WORKLOAD_OPS,
            max_request: DEFAULT_WORKLOAD_MAX_REQUEST,
            free_ratio: 0.4,
            seed: DEFAULT_WORKLOAD_SEED,
        }
    }
}

/// Outcome of one workload run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkloadReport {
    pub strategy: Strategy,
    pub capacity: usize,
    pub operations: usize,
    pub allocations: usize,
    pub frees: usize,
    pub exhausted: usize,
    pub peak_chunks: usize,
    /// Statistics before the remaining allocations were released
    pub final_stats: ArenaStats,
    /// Whether releasing everything left a single free chunk
    pub drained: bool,
}

impl Workload {
    /// Load workload parameters from the environment, falling back to defaults
    ///
    /// Environment variables:
    /// - ARENA_WORKLOAD_OPS: number of operations
    /// - ARENA_MAX_REQUEST: largest request in bytes
    /// - ARENA_SEED: RNG seed
    pub fn from_env() -> ArenaResult<Self> {
        let mut workload = Self::default();
        if let Some(ops) = env_parse(ENV_WORKLOAD_OPS)? {
            workload.operations = ops;
        }
        if let Some(max_request) = env_parse(ENV_WORKLOAD_MAX_REQUEST)? {
            workload.max_request = max_request;
        }
        if let Some(seed) = env_parse(ENV_WORKLOAD_SEED)? {
            workload.seed = seed;
        }
        Ok(workload)
    }

    /// Run the workload against a fresh arena built from `config`
    pub fn run(&self, config: &ArenaConfig) -> ArenaResult<WorkloadReport> {
        if self.max_request == 0 {
            return Err(ArenaError::Configuration(
                "workload max_request must be positive".to_string(),
            ));
        }
        if !(0.0..=1.0).contains(&self.free_ratio) {
            return Err(ArenaError::Configuration(format!(
                "workload free_ratio {} is outside 0..=1",
                self.free_ratio
            )));
        }

        let mut arena = Arena::from_config(config)?;
        let span = span_workload(config.strategy.name(), arena.capacity());
        let _entered = span.span().enter();

        let mut rng = StdRng::seed_from_u64(self.seed);
        let mut live: Vec<Pointer> = Vec::new();
        let mut allocations = 0;
        let mut frees = 0;
        let mut exhausted = 0;
        let mut peak_chunks = arena.size();

        for _ in 0..self.operations {
            if !live.is_empty() && rng.gen_bool(self.free_ratio) {
                let victim = live.swap_remove(rng.gen_range(0..live.len()));
                arena.free(victim)?;
                frees += 1;
            } else {
                let request = rng.gen_range(1..=self.max_request);
                match arena.try_alloc(request) {
                    Ok(ptr) => {
                        live.push(ptr);
                        allocations += 1;
                    }
                    Err(e) if e.is_recoverable() => exhausted += 1,
                    Err(e) => return Err(e),
                }
            }
            peak_chunks = peak_chunks.max(arena.size());
        }

        arena.validate()?;
        let final_stats = arena.stats();

        for ptr in live.drain(..) {
            arena.free(ptr)?;
        }
        let drained = arena.size() == 1;

        drop(_entered);
        span.finish(self.operations, exhausted);

        info!(
            strategy = %config.strategy,
            allocations,
            frees,
            exhausted,
            peak_chunks,
            fragmentation = final_stats.fragmentation,
            "Workload complete"
        );

        let report = WorkloadReport {
            strategy: config.strategy,
            capacity: arena.capacity(),
            operations: self.operations,
            allocations,
            frees,
            exhausted,
            peak_chunks,
            final_stats,
            drained,
        };
        arena.destroy();
        Ok(report)
    }
}

fn env_parse<T: FromStr>(key: &str) -> ArenaResult<Option<T>> {
    match std::env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| ArenaError::Configuration(format!("{} has invalid value {:?}", key, raw))),
        Err(_) => Ok(None),
    }
}

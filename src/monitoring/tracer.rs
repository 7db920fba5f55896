/*!
 * Structured Tracing
 * Subscriber setup and workload spans using the tracing crate
 */

use std::time::Instant;
use tracing::{debug, info, span, Level, Span};
use tracing_subscriber::{
    fmt::format::FmtSpan, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter,
};

/// Environment variable switching the subscriber to JSON output
pub const ENV_TRACE_JSON: &str = "ARENA_TRACE_JSON";

/// Initialize structured tracing
///
/// Environment variables:
/// - RUST_LOG: Set log level (default: info)
/// - ARENA_TRACE_JSON: Enable JSON output (default: false)
///
/// Calling this more than once is harmless; only the first subscriber wins.
pub fn init_tracing() {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let use_json = std::env::var(ENV_TRACE_JSON)
        .map(|v| v == "1" || v == "true")
        .unwrap_or(false);

    let registry = tracing_subscriber::registry().with(env_filter);

    let installed = if use_json {
        // JSON output for production/parsing
        registry
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_target(true)
                    .with_line_number(true)
                    .with_file(true)
                    .with_current_span(true)
                    .with_span_list(true)
                    .with_span_events(FmtSpan::CLOSE),
            )
            .try_init()
    } else {
        // Human-readable output for development
        registry
            .with(
                tracing_subscriber::fmt::layer()
                    .with_target(true)
                    .with_line_number(true)
                    .with_span_events(FmtSpan::CLOSE)
                    .compact(),
            )
            .try_init()
    };

    if installed.is_ok() {
        info!(json = use_json, "Structured tracing initialized");
    }
}

/// Span covering one workload run against one arena
pub struct WorkloadSpan {
    span: Span,
    start: Instant,
}

impl WorkloadSpan {
    pub fn new(strategy: &str, capacity: usize) -> Self {
        let span = span!(
            Level::INFO,
            "workload",
            strategy = strategy,
            capacity = capacity,
            duration_us = tracing::field::Empty,
            operations = tracing::field::Empty,
            exhausted = tracing::field::Empty,
        );

        let _entered = span.enter();
        debug!(strategy, capacity, "workload started");
        drop(_entered);

        Self {
            span,
            start: Instant::now(),
        }
    }

    pub fn span(&self) -> &Span {
        &self.span
    }

    /// Record the outcome and close the span
    pub fn finish(self, operations: usize, exhausted: usize) {
        let elapsed = self.start.elapsed();
        self.span.record("duration_us", elapsed.as_micros() as u64);
        self.span.record("operations", operations as u64);
        self.span.record("exhausted", exhausted as u64);

        let _entered = self.span.enter();
        debug!(
            operations,
            exhausted,
            duration_us = elapsed.as_micros() as u64,
            "workload finished"
        );
    }
}

/// Helper to create a workload span
#[inline]
pub fn span_workload(strategy: &str, capacity: usize) -> WorkloadSpan {
    WorkloadSpan::new(strategy, capacity)
}

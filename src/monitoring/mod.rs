/*!
 * Monitoring
 * Structured tracing for the allocator and its workloads
 */

mod tracer;

pub use tracer::{init_tracing, span_workload, WorkloadSpan, ENV_TRACE_JSON};

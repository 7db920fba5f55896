/*!
 * Arena Limits and Constants
 *
 * Centralized location for allocator-wide limits and thresholds.
 */

// =============================================================================
// ALIGNMENT
// =============================================================================

/// Every chunk size and offset is a multiple of this
pub const ALIGNMENT: usize = 4;

// =============================================================================
// CAPACITY
// =============================================================================

/// Default arena capacity (64KB)
/// Used when no capacity is configured
pub const DEFAULT_ARENA_CAPACITY: usize = 64 * 1024;

/// Largest capacity an arena may be initialised with
/// The backing `Vec<u8>` cannot exceed `isize::MAX` bytes
pub const MAX_ARENA_CAPACITY: usize = (isize::MAX as usize) & !(ALIGNMENT - 1);

// =============================================================================
// MEMORY PRESSURE THRESHOLDS (fraction of capacity held by used chunks)
// =============================================================================

pub const PRESSURE_MEDIUM: f64 = 0.60;
pub const PRESSURE_HIGH: f64 = 0.80;
pub const PRESSURE_CRITICAL: f64 = 0.95;

// =============================================================================
// WORKLOAD DEFAULTS
// =============================================================================

/// Operations issued by the workload driver when none are configured
pub const DEFAULT_WORKLOAD_OPS: usize = 10_000;

/// Largest single request issued by the workload driver by default (1KB)
pub const DEFAULT_WORKLOAD_MAX_REQUEST: usize = 1024;

/// Fixed seed so default workload runs are reproducible
pub const DEFAULT_WORKLOAD_SEED: u64 = 0x5EED_A7E4;

/*!
 * Arena Heap Library
 * Simulated heap manager over a single fixed-size byte pool
 *
 * One [`Arena`] carves its pool into variable-sized chunks with a
 * first-fit, next-fit, best-fit or worst-fit [`Strategy`], splitting
 * chunks on allocation and coalescing neighbouring free chunks on release.
 */

pub mod core;
pub mod memory;
pub mod monitoring;
pub mod workload;

// Re-exports
pub use crate::core::{ArenaConfig, ArenaError, ArenaResult};
pub use memory::{
    Allocator, Arena, ArenaId, ArenaStats, Chunk, ChunkState, MemoryInfo, MemoryPressure, Pointer,
    Strategy,
};
pub use monitoring::init_tracing;
pub use workload::{Workload, WorkloadReport};

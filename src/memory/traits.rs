/*!
 * Memory Traits
 * Allocator abstractions
 */

use super::types::*;
use crate::core::errors::ArenaResult;
use crate::core::types::Size;

/// Allocator interface
pub trait Allocator {
    /// Allocate `size` bytes
    fn allocate(&mut self, size: Size) -> ArenaResult<Pointer>;

    /// Release a previous allocation
    fn deallocate(&mut self, ptr: Pointer) -> ArenaResult<()>;

    /// Check if a pointer names a live allocation
    fn is_valid(&self, ptr: Pointer) -> bool;

    /// Get the size of an allocated block
    fn block_size(&self, ptr: Pointer) -> Option<Size>;
}

/// Memory statistics provider
pub trait MemoryInfo {
    /// Get overall arena statistics
    fn stats(&self) -> ArenaStats;

    /// Number of chunks in the ledger
    fn chunk_count(&self) -> usize;

    /// Get memory pressure level
    fn pressure(&self) -> MemoryPressure {
        self.stats().memory_pressure()
    }
}

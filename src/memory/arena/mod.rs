/*!
 * Arena Allocator Context
 *
 * Owns one fixed-capacity byte pool, the chunk ledger that partitions it,
 * the active placement strategy and the next-fit cursor.
 *
 * ## Lifecycle
 *
 * - [`Arena::init`] reserves the pool and creates a single free chunk
 * - [`Arena::alloc`] / [`Arena::free`] split and coalesce chunks
 * - [`Arena::destroy`] releases the pool and the ledger
 *
 * `destroy` consumes the context, so use-after-destroy does not compile, and
 * every `init` yields an independent context.
 *
 * ## Concurrency
 *
 * An `Arena` is plain mutable state. Callers that share one across threads
 * must serialize access themselves (one arena per worker, or a mutex).
 */

mod allocator;
mod stats;

use super::ledger::Ledger;
use super::strategy::Strategy;
use super::traits::{Allocator, MemoryInfo};
use super::types::{ArenaId, ArenaStats, Chunk, Pointer};
use crate::core::config::ArenaConfig;
use crate::core::errors::{ArenaError, ArenaResult};
use crate::core::limits::MAX_ARENA_CAPACITY;
use crate::core::types::{align4, Offset, Size};
use tracing::info;

/// Arena allocator context
#[derive(Debug)]
pub struct Arena {
    id: ArenaId,
    buffer: Vec<u8>,
    ledger: Ledger,
    strategy: Strategy,
    // Offset of the chunk that satisfied the last allocation
    cursor: Offset,
}

impl Arena {
    /// Reserve a pool of `capacity` bytes (rounded up to 4) managed by `strategy`
    ///
    /// # Errors
    /// - `InvalidSize` if `capacity` is zero or too large once aligned
    /// - `OutOfMemory` if the backing buffer cannot be reserved
    pub fn init(capacity: Size, strategy: Strategy) -> ArenaResult<Self> {
        let aligned = match align4(capacity) {
            Some(aligned) if capacity > 0 && aligned <= MAX_ARENA_CAPACITY => aligned,
            _ => {
                return Err(ArenaError::InvalidSize {
                    requested: capacity,
                })
            }
        };

        let mut buffer = Vec::new();
        buffer
            .try_reserve_exact(aligned)
            .map_err(|_| ArenaError::OutOfMemory { requested: aligned })?;
        buffer.resize(aligned, 0);

        let arena = Self {
            id: ArenaId::next(),
            buffer,
            ledger: Ledger::new(aligned),
            strategy,
            cursor: 0,
        };

        info!(
            arena = %arena.id,
            capacity = aligned,
            strategy = %strategy,
            "Arena initialized"
        );
        Ok(arena)
    }

    /// Initialise an arena from a loaded configuration
    pub fn from_config(config: &ArenaConfig) -> ArenaResult<Self> {
        Self::init(config.capacity, config.strategy)
    }

    /// Release the pool and every chunk
    pub fn destroy(self) {
        info!(
            arena = %self.id,
            capacity = self.capacity(),
            chunks = self.ledger.len(),
            "Arena destroyed"
        );
    }

    /// Number of chunks (free and used) currently in the ledger
    pub fn size(&self) -> usize {
        self.ledger.len()
    }

    pub fn id(&self) -> ArenaId {
        self.id
    }

    /// Aligned capacity in bytes
    pub fn capacity(&self) -> Size {
        self.buffer.len()
    }

    pub fn strategy(&self) -> Strategy {
        self.strategy
    }

    /// Ledger entries in offset order
    pub fn chunks(&self) -> impl Iterator<Item = &Chunk> + '_ {
        self.ledger.iter()
    }
}

// Implement trait interfaces
impl Allocator for Arena {
    fn allocate(&mut self, size: Size) -> ArenaResult<Pointer> {
        Arena::try_alloc(self, size)
    }

    fn deallocate(&mut self, ptr: Pointer) -> ArenaResult<()> {
        Arena::free(self, ptr)
    }

    fn is_valid(&self, ptr: Pointer) -> bool {
        Arena::is_valid(self, ptr)
    }

    fn block_size(&self, ptr: Pointer) -> Option<Size> {
        Arena::block_size(self, ptr)
    }
}

impl MemoryInfo for Arena {
    fn stats(&self) -> ArenaStats {
        Arena::stats(self)
    }

    fn chunk_count(&self) -> usize {
        Arena::size(self)
    }
}

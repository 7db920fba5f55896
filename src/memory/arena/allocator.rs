/*!
 * Arena Allocation
 * Allocation, release and byte access
 */

use super::Arena;
use crate::core::errors::{ArenaError, ArenaResult};
use crate::core::types::{align4, Size};
use crate::memory::types::{Chunk, ChunkId, Pointer};
use tracing::{debug, warn};

impl Arena {
    /// Allocate `size` bytes with the arena's strategy
    ///
    /// Requests are rounded up to a multiple of 4. Zero-byte requests are
    /// rejected with `InvalidSize`. `Exhausted` is a normal condition and
    /// leaves the ledger untouched.
    pub fn try_alloc(&mut self, size: Size) -> ArenaResult<Pointer> {
        let aligned = match align4(size) {
            Some(aligned) if size > 0 => aligned,
            _ => return Err(ArenaError::InvalidSize { requested: size }),
        };

        let cursor = self.ledger.locate(self.cursor);
        let Some(id) = self.strategy.select(&self.ledger, aligned, cursor) else {
            let largest_free = self.ledger.largest_free();
            debug!(
                arena = %self.id,
                requested = size,
                aligned,
                largest_free,
                strategy = %self.strategy,
                "Allocation request exhausted arena"
            );
            return Err(ArenaError::Exhausted {
                requested: size,
                largest_free,
            });
        };

        self.ledger.split(id, aligned)?;
        let offset = self.ledger.as_slice()[id].offset;
        self.cursor = offset;

        debug!(
            arena = %self.id,
            offset,
            requested = size,
            aligned,
            chunks = self.ledger.len(),
            "Allocated chunk"
        );
        Ok(Pointer::new(self.id, offset))
    }

    /// Allocate `size` bytes, returning `None` on exhaustion or an invalid size
    pub fn alloc(&mut self, size: Size) -> Option<Pointer> {
        self.try_alloc(size).ok()
    }

    /// Release the allocation at `ptr` and merge it with free neighbours
    ///
    /// # Errors
    /// `InvalidPointer` if `ptr` belongs to another arena, does not start a
    /// chunk, or names a chunk that is already free.
    pub fn free(&mut self, ptr: Pointer) -> ArenaResult<()> {
        let id = self.used_chunk_id(ptr)?;
        let size = self.ledger.as_slice()[id].size;

        if !self.ledger.release(id) {
            return Err(self.invalid_pointer(ptr, "chunk is not in use"));
        }
        self.ledger.coalesce();

        debug_assert!(self.ledger.validate(self.capacity()).is_ok());
        debug!(
            arena = %self.id,
            offset = ptr.offset(),
            size,
            chunks = self.ledger.len(),
            "Freed chunk"
        );
        Ok(())
    }

    /// Whether `ptr` names a live allocation of this arena
    pub fn is_valid(&self, ptr: Pointer) -> bool {
        self.lookup(ptr).is_some_and(|(_, chunk)| !chunk.is_free())
    }

    /// Aligned size of the allocation at `ptr`
    pub fn block_size(&self, ptr: Pointer) -> Option<Size> {
        self.lookup(ptr)
            .filter(|(_, chunk)| !chunk.is_free())
            .map(|(_, chunk)| chunk.size)
    }

    /// Borrow the bytes of the allocation at `ptr`
    pub fn bytes(&self, ptr: Pointer) -> ArenaResult<&[u8]> {
        let id = self.used_chunk_id(ptr)?;
        let chunk = self.ledger.as_slice()[id];
        Ok(&self.buffer[chunk.offset..chunk.end()])
    }

    /// Mutably borrow the bytes of the allocation at `ptr`
    pub fn bytes_mut(&mut self, ptr: Pointer) -> ArenaResult<&mut [u8]> {
        let id = self.used_chunk_id(ptr)?;
        let chunk = self.ledger.as_slice()[id];
        Ok(&mut self.buffer[chunk.offset..chunk.end()])
    }

    fn lookup(&self, ptr: Pointer) -> Option<(ChunkId, Chunk)> {
        if ptr.arena() != self.id {
            return None;
        }
        let id = self.ledger.find(ptr.offset())?;
        self.ledger.get(id).map(|chunk| (id, *chunk))
    }

    fn used_chunk_id(&self, ptr: Pointer) -> ArenaResult<ChunkId> {
        if ptr.arena() != self.id {
            return Err(self.invalid_pointer(ptr, "pointer belongs to another arena"));
        }
        match self.lookup(ptr) {
            Some((id, chunk)) if !chunk.is_free() => Ok(id),
            Some(_) => Err(self.invalid_pointer(ptr, "chunk is already free")),
            None => Err(self.invalid_pointer(ptr, "no chunk starts at this offset")),
        }
    }

    fn invalid_pointer(&self, ptr: Pointer, reason: &str) -> ArenaError {
        warn!(arena = %self.id, pointer = %ptr, reason, "Invalid pointer");
        ArenaError::InvalidPointer {
            offset: ptr.offset(),
        }
    }
}

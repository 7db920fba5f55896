/*!
 * Chunk Ledger
 * Ordered, index-addressed partition of the arena into free and used chunks
 */

use super::types::{Chunk, ChunkId, ChunkState};
use crate::core::errors::{ArenaError, ArenaResult};
use crate::core::limits::ALIGNMENT;
use crate::core::types::{Offset, Size};
use tracing::debug;

/// Chunk ledger
///
/// Chunks are kept sorted by offset and tile `0..capacity` exactly:
/// `chunks[i].end() == chunks[i + 1].offset`. After every [`Ledger::coalesce`]
/// no two neighbours are both free.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ledger {
    chunks: Vec<Chunk>,
}

impl Ledger {
    /// One free chunk spanning the whole (already aligned) capacity
    pub fn new(capacity: Size) -> Self {
        Self {
            chunks: vec![Chunk::free(0, capacity)],
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.chunks.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.chunks.is_empty()
    }

    #[inline]
    pub fn get(&self, id: ChunkId) -> Option<&Chunk> {
        self.chunks.get(id)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Chunk> {
        self.chunks.iter()
    }

    pub fn as_slice(&self) -> &[Chunk] {
        &self.chunks
    }

    /// Chunk starting exactly at `offset`
    pub fn find(&self, offset: Offset) -> Option<ChunkId> {
        self.chunks
            .binary_search_by_key(&offset, |chunk| chunk.offset)
            .ok()
    }

    /// Chunk whose range contains `offset`, clamped to the last chunk
    pub fn locate(&self, offset: Offset) -> ChunkId {
        self.chunks
            .partition_point(|chunk| chunk.end() <= offset)
            .min(self.chunks.len().saturating_sub(1))
    }

    /// Size of the largest free chunk, 0 when none is free
    pub fn largest_free(&self) -> Size {
        self.chunks
            .iter()
            .filter(|chunk| chunk.is_free())
            .map(|chunk| chunk.size)
            .max()
            .unwrap_or(0)
    }

    /// Mark the free chunk `id` used with exactly `aligned` bytes, inserting
    /// the remainder as a new free chunk right after it.
    ///
    /// The remainder starts at `offset + aligned` so the partition stays
    /// contiguous.
    pub fn split(&mut self, id: ChunkId, aligned: Size) -> ArenaResult<ChunkId> {
        let chunk = *self.chunks.get(id).ok_or_else(|| ArenaError::Corrupted {
            offset: 0,
            detail: format!("split of missing chunk #{}", id),
        })?;

        if !chunk.is_free() || aligned == 0 || chunk.size < aligned || aligned % ALIGNMENT != 0 {
            return Err(ArenaError::Corrupted {
                offset: chunk.offset,
                detail: format!(
                    "cannot carve {} bytes from {:?} chunk of {} bytes",
                    aligned, chunk.state, chunk.size
                ),
            });
        }

        let leftover = chunk.size - aligned;
        self.chunks[id] = Chunk::used(chunk.offset, aligned);

        if leftover > 0 {
            self.chunks
                .insert(id + 1, Chunk::free(chunk.offset + aligned, leftover));
            debug!(
                offset = chunk.offset,
                used = aligned,
                leftover,
                "Split chunk"
            );
        }

        Ok(id)
    }

    /// Mark a used chunk free. Returns `false` if it was already free.
    pub fn release(&mut self, id: ChunkId) -> bool {
        match self.chunks.get_mut(id) {
            Some(chunk) if chunk.state == ChunkState::Used => {
                chunk.state = ChunkState::Free;
                true
            }
            _ => false,
        }
    }

    /// Merge every run of consecutive free chunks into one chunk in a single
    /// pass. Returns the number of merges performed.
    pub fn coalesce(&mut self) -> usize {
        if self.chunks.len() < 2 {
            return 0;
        }

        let mut i = 0;
        let mut coalesced_count = 0;
        while i < self.chunks.len() - 1 {
            if self.chunks[i].is_free() && self.chunks[i + 1].is_free() {
                let next_size = self.chunks[i + 1].size;
                self.chunks[i].size += next_size;
                self.chunks.remove(i + 1);
                coalesced_count += 1;
            } else {
                i += 1;
            }
        }

        if coalesced_count > 0 {
            debug!(
                merged = coalesced_count,
                chunks = self.chunks.len(),
                "Coalesced adjacent free chunks"
            );
        }

        coalesced_count
    }

    /// Check the partition and no-adjacent-free invariants against `capacity`
    pub fn validate(&self, capacity: Size) -> ArenaResult<()> {
        let mut expected = 0;
        let mut previous_free = false;

        for chunk in &self.chunks {
            if chunk.offset != expected {
                return Err(ArenaError::Corrupted {
                    offset: chunk.offset,
                    detail: format!("expected chunk at 0x{:x}", expected),
                });
            }
            if chunk.size == 0 || chunk.size % ALIGNMENT != 0 {
                return Err(ArenaError::Corrupted {
                    offset: chunk.offset,
                    detail: format!(
                        "chunk size {} is not a positive multiple of {}",
                        chunk.size, ALIGNMENT
                    ),
                });
            }
            if previous_free && chunk.is_free() {
                return Err(ArenaError::Corrupted {
                    offset: chunk.offset,
                    detail: "two adjacent free chunks".to_string(),
                });
            }
            previous_free = chunk.is_free();
            expected = chunk.end();
        }

        if expected != capacity {
            return Err(ArenaError::Corrupted {
                offset: expected,
                detail: format!("ledger ends at 0x{:x}, capacity is 0x{:x}", expected, capacity),
            });
        }

        Ok(())
    }
}

#[cfg(test)]
impl Ledger {
    pub(crate) fn from_chunks(chunks: Vec<Chunk>) -> Self {
        Self { chunks }
    }
}

/*!
 * Memory Types
 * Common types for arena management
 */

use crate::core::limits::{PRESSURE_CRITICAL, PRESSURE_HIGH, PRESSURE_MEDIUM};
use crate::core::types::{Offset, Size};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

/// Process-unique identity of an arena, embedded in every pointer it hands out
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ArenaId(pub u64);

static NEXT_ARENA_ID: AtomicU64 = AtomicU64::new(1);

impl ArenaId {
    pub(crate) fn next() -> Self {
        Self(NEXT_ARENA_ID.fetch_add(1, Ordering::Relaxed))
    }
}

impl fmt::Display for ArenaId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Opaque handle to an allocation
///
/// Only meaningful to the arena that returned it; the offset is exposed for
/// diagnostics, not for arithmetic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Pointer {
    arena: ArenaId,
    offset: Offset,
}

impl Pointer {
    pub(crate) fn new(arena: ArenaId, offset: Offset) -> Self {
        Self { arena, offset }
    }

    pub fn arena(&self) -> ArenaId {
        self.arena
    }

    pub fn offset(&self) -> Offset {
        self.offset
    }
}

impl fmt::Display for Pointer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:0x{:x}", self.arena, self.offset)
    }
}

/// Position of a chunk in ledger order
pub type ChunkId = usize;

/// Chunk state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChunkState {
    Free,
    Used,
}

/// Ledger entry: one contiguous region of the arena
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Chunk {
    pub offset: Offset,
    pub size: Size,
    pub state: ChunkState,
}

impl Chunk {
    pub fn free(offset: Offset, size: Size) -> Self {
        Self {
            offset,
            size,
            state: ChunkState::Free,
        }
    }

    pub fn used(offset: Offset, size: Size) -> Self {
        Self {
            offset,
            size,
            state: ChunkState::Used,
        }
    }

    #[inline]
    pub fn is_free(&self) -> bool {
        self.state == ChunkState::Free
    }

    /// One past the last byte of the chunk
    #[inline]
    pub fn end(&self) -> Offset {
        self.offset + self.size
    }
}

/// Arena statistics
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArenaStats {
    pub capacity: Size,
    pub used_bytes: Size,
    pub free_bytes: Size,
    pub used_chunks: usize,
    pub free_chunks: usize,
    pub largest_free: Size,
    pub usage_percentage: f64,
    /// `1 - largest_free / free_bytes`; 0 when everything free is in one chunk
    pub fragmentation: f64,
}

impl ArenaStats {
    pub fn chunk_count(&self) -> usize {
        self.used_chunks + self.free_chunks
    }

    pub fn memory_pressure(&self) -> MemoryPressure {
        MemoryPressure::from_usage(self.usage_percentage / 100.0)
    }
}

/// Memory pressure levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum MemoryPressure {
    Low,
    Medium,
    High,
    Critical,
}

impl MemoryPressure {
    /// Classify a usage ratio in `0.0..=1.0`
    pub fn from_usage(ratio: f64) -> Self {
        if ratio >= PRESSURE_CRITICAL {
            MemoryPressure::Critical
        } else if ratio >= PRESSURE_HIGH {
            MemoryPressure::High
        } else if ratio >= PRESSURE_MEDIUM {
            MemoryPressure::Medium
        } else {
            MemoryPressure::Low
        }
    }
}

impl fmt::Display for MemoryPressure {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            MemoryPressure::Low => write!(f, "LOW"),
            MemoryPressure::Medium => write!(f, "MEDIUM"),
            MemoryPressure::High => write!(f, "HIGH"),
            MemoryPressure::Critical => write!(f, "CRITICAL"),
        }
    }
}

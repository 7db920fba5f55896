/*!
 * Arena Statistics
 * Usage, fragmentation and ledger validation
 */

use super::Arena;
use crate::core::errors::ArenaResult;
use crate::memory::types::{ArenaStats, MemoryPressure};

impl Arena {
    /// Snapshot of arena usage
    pub fn stats(&self) -> ArenaStats {
        let capacity = self.capacity();
        let mut used_bytes = 0;
        let mut used_chunks = 0;
        let mut free_chunks = 0;
        let mut largest_free = 0;

        for chunk in self.ledger.iter() {
            if chunk.is_free() {
                free_chunks += 1;
                largest_free = largest_free.max(chunk.size);
            } else {
                used_chunks += 1;
                used_bytes += chunk.size;
            }
        }

        let free_bytes = capacity - used_bytes;
        let fragmentation = if free_bytes == 0 {
            0.0
        } else {
            1.0 - largest_free as f64 / free_bytes as f64
        };

        ArenaStats {
            capacity,
            used_bytes,
            free_bytes,
            used_chunks,
            free_chunks,
            largest_free,
            usage_percentage: used_bytes as f64 / capacity as f64 * 100.0,
            fragmentation,
        }
    }

    pub fn pressure(&self) -> MemoryPressure {
        self.stats().memory_pressure()
    }

    /// Verify that the ledger tiles the arena and holds no adjacent free chunks
    pub fn validate(&self) -> ArenaResult<()> {
        self.ledger.validate(self.capacity())
    }
}

/*!
 * Placement Strategies
 * First-fit, next-fit, best-fit and worst-fit chunk selection
 */

use super::ledger::Ledger;
use super::types::{Chunk, ChunkId};
use crate::core::errors::ArenaError;
use crate::core::types::Size;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Placement strategy selection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", try_from = "String")]
pub enum Strategy {
    /// First free chunk from the head of the ledger
    FirstFit,
    /// First free chunk from the cursor, wrapping to the head
    NextFit,
    /// Free chunk leaving the smallest leftover
    BestFit,
    /// Largest free chunk
    WorstFit,
}

impl Strategy {
    pub const ALL: [Strategy; 4] = [
        Strategy::FirstFit,
        Strategy::NextFit,
        Strategy::BestFit,
        Strategy::WorstFit,
    ];

    pub const fn name(&self) -> &'static str {
        match self {
            Strategy::FirstFit => "first_fit",
            Strategy::NextFit => "next_fit",
            Strategy::BestFit => "best_fit",
            Strategy::WorstFit => "worst_fit",
        }
    }

    /// Pick the free chunk that satisfies `aligned` bytes.
    ///
    /// `cursor` is the chunk the previous allocation was satisfied from; only
    /// next-fit reads it. Ties go to the chunk met first in scan order.
    pub fn select(&self, ledger: &Ledger, aligned: Size, cursor: ChunkId) -> Option<ChunkId> {
        let fits = |chunk: &Chunk| chunk.is_free() && chunk.size >= aligned;
        let chunks = ledger.as_slice();

        match self {
            Strategy::FirstFit => chunks.iter().position(fits),
            Strategy::NextFit => {
                if ledger.is_empty() {
                    return None;
                }
                let start = cursor.min(ledger.len() - 1);
                (start..ledger.len())
                    .chain(0..start)
                    .find(|&id| ledger.get(id).is_some_and(fits))
            }
            Strategy::BestFit => {
                let mut best: Option<(ChunkId, Size)> = None;
                for (id, chunk) in chunks.iter().enumerate().filter(|&(_, c)| fits(c)) {
                    let leftover = chunk.size - aligned;
                    if best.map_or(true, |(_, smallest)| leftover < smallest) {
                        best = Some((id, leftover));
                    }
                }
                best.map(|(id, _)| id)
            }
            Strategy::WorstFit => {
                let mut worst: Option<(ChunkId, Size)> = None;
                for (id, chunk) in chunks.iter().enumerate().filter(|&(_, c)| fits(c)) {
                    if worst.map_or(true, |(_, largest)| chunk.size > largest) {
                        worst = Some((id, chunk.size));
                    }
                }
                worst.map(|(id, _)| id)
            }
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Strategy {
    type Err = ArenaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s
            .trim()
            .chars()
            .filter(|c| !matches!(*c, '_' | '-' | ' '))
            .collect::<String>()
            .to_ascii_lowercase();

        match normalized.as_str() {
            "first" | "firstfit" => Ok(Strategy::FirstFit),
            "next" | "nextfit" => Ok(Strategy::NextFit),
            "best" | "bestfit" => Ok(Strategy::BestFit),
            "worst" | "worstfit" => Ok(Strategy::WorstFit),
            _ => Err(ArenaError::Configuration(format!(
                "unknown allocation strategy {:?}",
                s
            ))),
        }
    }
}

impl TryFrom<String> for Strategy {
    type Error = ArenaError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// Numeric strategy codes, in table order
impl TryFrom<u32> for Strategy {
    type Error = ArenaError;

    fn try_from(code: u32) -> Result<Self, Self::Error> {
        match code {
            0 => Ok(Strategy::FirstFit),
            1 => Ok(Strategy::NextFit),
            2 => Ok(Strategy::BestFit),
            3 => Ok(Strategy::WorstFit),
            other => Err(ArenaError::Configuration(format!(
                "unknown allocation strategy code {}",
                other
            ))),
        }
    }
}

/*!
 * Error Types
 * Centralized error handling with thiserror, miette, and serde support
 */

use super::types::{Offset, Size};
use miette::Diagnostic;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Arena operation result
pub type ArenaResult<T> = Result<T, ArenaError>;

/// Arena errors with serialization support
#[derive(Error, Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Diagnostic)]
#[serde(tag = "error_type", content = "details", rename_all = "snake_case")]
pub enum ArenaError {
    #[error("Invalid size: {requested} bytes")]
    #[diagnostic(
        code(arena::invalid_size),
        help("Capacities and requests must be positive and fit in the address space once aligned to 4 bytes.")
    )]
    InvalidSize { requested: Size },

    #[error("Out of memory: could not reserve a {requested} byte arena")]
    #[diagnostic(
        code(arena::out_of_memory),
        help("The host refused the backing buffer. Try a smaller capacity.")
    )]
    OutOfMemory { requested: Size },

    #[error("Arena exhausted: no free chunk holds {requested} bytes (largest free chunk: {largest_free} bytes)")]
    #[diagnostic(
        code(arena::exhausted),
        help("Free an allocation, request fewer bytes, or initialise a larger arena.")
    )]
    Exhausted { requested: Size, largest_free: Size },

    #[error("Invalid pointer: offset 0x{offset:x} is not a live allocation of this arena")]
    #[diagnostic(
        code(arena::invalid_pointer),
        help("The pointer was already freed, never returned by this arena, or belongs to another arena.")
    )]
    InvalidPointer { offset: Offset },

    #[error("Configuration error: {0}")]
    #[diagnostic(
        code(arena::configuration),
        help("Valid strategies are first_fit, next_fit, best_fit and worst_fit.")
    )]
    Configuration(String),

    #[error("Ledger corruption detected at offset 0x{offset:x}: {detail}")]
    #[diagnostic(
        code(arena::corrupted),
        help("The chunk ledger no longer tiles the arena. This is an allocator bug.")
    )]
    Corrupted { offset: Offset, detail: String },
}

impl ArenaError {
    /// Whether the caller can reasonably retry after changing its request or freeing memory
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            ArenaError::Exhausted { .. } | ArenaError::InvalidPointer { .. }
        )
    }
}

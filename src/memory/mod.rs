/*!
 * Memory Module
 * Arena allocation over a fixed byte pool
 */

pub mod arena;
pub mod ledger;
pub mod strategy;
pub mod traits;
pub mod types;

// Re-export for convenience
pub use arena::Arena;
pub use ledger::Ledger;
pub use strategy::Strategy;
pub use traits::*;
pub use types::*;

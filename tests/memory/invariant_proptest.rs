/*!
 * Ledger Invariant Property Tests
 * Random alloc/free sequences must keep the arena tiled and coalesced
 */

use arena_heap::{Arena, Chunk, ChunkState, Pointer, Strategy as Placement};
use proptest::prelude::*;

#[derive(Debug, Clone)]
enum Op {
    Alloc(usize),
    Free(usize),
}

fn op() -> impl Strategy<Value = Op> {
    prop_oneof![
        3 => (1usize..=256).prop_map(Op::Alloc),
        2 => any::<usize>().prop_map(Op::Free),
    ]
}

fn placement() -> impl Strategy<Value = Placement> {
    prop::sample::select(Placement::ALL.to_vec())
}

/// Apply `ops`, checking invariants after every step; returns the live pointers
fn replay(arena: &mut Arena, ops: &[Op]) -> Result<Vec<Pointer>, TestCaseError> {
    let mut live: Vec<Pointer> = Vec::new();

    for op in ops {
        match *op {
            Op::Alloc(size) => {
                let before: Vec<Chunk> = arena.chunks().copied().collect();
                match arena.alloc(size) {
                    Some(ptr) => {
                        prop_assert_eq!(ptr.offset() % 4, 0);
                        prop_assert!(arena.block_size(ptr).unwrap() >= size);
                        live.push(ptr);
                    }
                    None => {
                        let after: Vec<Chunk> = arena.chunks().copied().collect();
                        prop_assert_eq!(before, after);
                    }
                }
            }
            Op::Free(pick) => {
                if live.is_empty() {
                    continue;
                }
                let ptr = live.swap_remove(pick % live.len());
                prop_assert!(arena.free(ptr).is_ok());
                prop_assert!(arena.free(ptr).is_err());
            }
        }

        prop_assert!(arena.validate().is_ok());

        let used = arena
            .chunks()
            .filter(|chunk| chunk.state == ChunkState::Used)
            .count();
        prop_assert_eq!(used, live.len());
        prop_assert!(arena.size() <= 2 * used + 1);
    }

    Ok(live)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(128))]

    #[test]
    fn prop_partition_and_coalescing_hold(
        capacity in 4usize..4096,
        strategy in placement(),
        ops in prop::collection::vec(op(), 0..200),
    ) {
        let mut arena = Arena::init(capacity, strategy).unwrap();
        let live = replay(&mut arena, &ops)?;

        for ptr in live {
            prop_assert!(arena.free(ptr).is_ok());
        }
        prop_assert_eq!(arena.size(), 1);
        let chunks: Vec<Chunk> = arena.chunks().copied().collect();
        prop_assert_eq!(chunks, vec![Chunk::free(0, arena.capacity())]);
    }

    #[test]
    fn prop_strategies_are_deterministic(
        strategy in placement(),
        ops in prop::collection::vec(op(), 0..120),
    ) {
        let mut first = Arena::init(2048, strategy).unwrap();
        let mut second = Arena::init(2048, strategy).unwrap();
        replay(&mut first, &ops)?;
        replay(&mut second, &ops)?;

        let left: Vec<Chunk> = first.chunks().copied().collect();
        let right: Vec<Chunk> = second.chunks().copied().collect();
        prop_assert_eq!(left, right);
    }
}

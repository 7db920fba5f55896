/*!
 * Allocator Scenario Tests
 * Placement, split, coalesce, exhaustion and double-free walkthroughs
 */

use arena_heap::{Arena, ArenaError, Chunk, Pointer, Strategy};
use pretty_assertions::assert_eq;

fn ledger(arena: &Arena) -> Vec<Chunk> {
    arena.chunks().copied().collect()
}

/// Free chunks of 200, 52 and 300 bytes at offsets 0, 208 and 268, each
/// followed by an 8-byte used chunk
fn scattered(strategy: Strategy) -> Arena {
    let mut arena = Arena::init(576, strategy).unwrap();
    let sizes = [200, 8, 52, 8, 300, 8];
    let ptrs: Vec<Pointer> = sizes
        .iter()
        .map(|&size| arena.alloc(size).expect("setup allocation"))
        .collect();
    assert_eq!(arena.alloc(1), None);

    for idx in [0, 2, 4] {
        arena.free(ptrs[idx]).unwrap();
    }
    assert_eq!(
        ledger(&arena),
        vec![
            Chunk::free(0, 200),
            Chunk::used(200, 8),
            Chunk::free(208, 52),
            Chunk::used(260, 8),
            Chunk::free(268, 300),
            Chunk::used(568, 8),
        ]
    );
    arena
}

#[test]
fn test_first_fit_splits_from_head() {
    let mut arena = Arena::init(1024, Strategy::FirstFit).unwrap();

    let first = arena.alloc(100).unwrap();
    assert_eq!(first.offset(), 0);
    assert_eq!(ledger(&arena), vec![Chunk::used(0, 100), Chunk::free(100, 924)]);

    let second = arena.alloc(50).unwrap();
    assert_eq!(second.offset(), 100);
    assert_eq!(
        ledger(&arena),
        vec![Chunk::used(0, 100), Chunk::used(100, 52), Chunk::free(152, 872)]
    );
    assert!(arena.validate().is_ok());
}

#[test]
fn test_best_fit_prefers_tightest_chunk() {
    let mut arena = scattered(Strategy::BestFit);

    let ptr = arena.alloc(40).unwrap();
    assert_eq!(ptr.offset(), 208);
    assert_eq!(arena.block_size(ptr), Some(40));
    assert!(ledger(&arena).contains(&Chunk::free(248, 12)));
    assert!(arena.validate().is_ok());
}

#[test]
fn test_worst_fit_prefers_largest_chunk() {
    let mut arena = scattered(Strategy::WorstFit);

    let ptr = arena.alloc(40).unwrap();
    assert_eq!(ptr.offset(), 268);
    assert!(ledger(&arena).contains(&Chunk::free(308, 260)));
    assert!(arena.validate().is_ok());
}

#[test]
fn test_first_fit_on_scattered_ledger() {
    let mut arena = scattered(Strategy::FirstFit);
    assert_eq!(arena.alloc(40).unwrap().offset(), 0);
    assert_eq!(arena.alloc(250).unwrap().offset(), 268);
}

#[test]
fn test_coalesce_after_middle_first_last() {
    let mut arena = Arena::init(300, Strategy::FirstFit).unwrap();
    let a = arena.alloc(100).unwrap();
    let b = arena.alloc(100).unwrap();
    let c = arena.alloc(100).unwrap();
    assert_eq!(arena.size(), 3);

    arena.free(b).unwrap();
    assert_eq!(arena.size(), 3);
    arena.free(a).unwrap();
    assert_eq!(arena.size(), 2);
    arena.free(c).unwrap();

    assert_eq!(arena.size(), 1);
    assert_eq!(ledger(&arena), vec![Chunk::free(0, arena.capacity())]);
}

#[test]
fn test_coalesce_with_trailing_free_space() {
    let mut arena = Arena::init(1024, Strategy::FirstFit).unwrap();
    let ptrs: Vec<Pointer> = (0..3).map(|_| arena.alloc(64).unwrap()).collect();
    assert_eq!(arena.size(), 4);

    for idx in [1, 0, 2] {
        arena.free(ptrs[idx]).unwrap();
        assert!(arena.validate().is_ok());
    }
    assert_eq!(ledger(&arena), vec![Chunk::free(0, 1024)]);
}

#[test]
fn test_exhaustion_leaves_ledger_unchanged() {
    let mut arena = Arena::init(64, Strategy::FirstFit).unwrap();
    let before = ledger(&arena);

    assert_eq!(arena.alloc(100), None);
    assert_eq!(
        arena.try_alloc(100),
        Err(ArenaError::Exhausted {
            requested: 100,
            largest_free: 64
        })
    );
    assert_eq!(ledger(&arena), before);
}

#[test]
fn test_exhaustion_under_every_strategy() {
    for strategy in Strategy::ALL {
        let mut arena = scattered(strategy);
        let before = ledger(&arena);
        assert_eq!(arena.alloc(301), None, "{}", strategy);
        assert_eq!(ledger(&arena), before);
    }
}

#[test]
fn test_double_free_is_reported() {
    let mut arena = Arena::init(256, Strategy::FirstFit).unwrap();
    let keep = arena.alloc(16).unwrap();
    let ptr = arena.alloc(32).unwrap();

    arena.free(ptr).unwrap();
    assert_eq!(
        arena.free(ptr),
        Err(ArenaError::InvalidPointer {
            offset: ptr.offset()
        })
    );
    assert!(arena.validate().is_ok());
    assert_eq!(ledger(&arena), vec![Chunk::used(0, 16), Chunk::free(16, 240)]);

    arena.free(keep).unwrap();
    assert_eq!(arena.size(), 1);
}

#[test]
fn test_full_arena_round_trip() {
    let mut arena = Arena::init(1000, Strategy::BestFit).unwrap();
    let ptr = arena.alloc(1000).unwrap();
    assert_eq!(arena.size(), 1);
    assert_eq!(arena.alloc(1), None);

    arena.free(ptr).unwrap();
    assert_eq!(arena.size(), 1);
    assert_eq!(ledger(&arena), vec![Chunk::free(0, 1000)]);
}

#[test]
fn test_next_fit_resumes_after_last_allocation() {
    let mut next = Arena::init(1024, Strategy::NextFit).unwrap();
    let mut first = Arena::init(1024, Strategy::FirstFit).unwrap();

    for arena in [&mut next, &mut first] {
        let a = arena.alloc(100).unwrap();
        arena.alloc(100).unwrap();
        arena.alloc(100).unwrap();
        arena.free(a).unwrap();
    }

    assert_eq!(next.alloc(40).unwrap().offset(), 300);
    assert_eq!(first.alloc(40).unwrap().offset(), 0);
}

#[test]
fn test_next_fit_wraps_to_head() {
    let mut arena = Arena::init(300, Strategy::NextFit).unwrap();
    let a = arena.alloc(100).unwrap();
    arena.alloc(100).unwrap();
    arena.alloc(100).unwrap();
    arena.free(a).unwrap();

    assert_eq!(arena.alloc(40).unwrap().offset(), 0);
    assert_eq!(arena.alloc(60).unwrap().offset(), 40);
    assert_eq!(arena.alloc(4), None);
}

#[test]
fn test_next_fit_cursor_survives_coalescing() {
    let mut arena = Arena::init(512, Strategy::NextFit).unwrap();
    let a = arena.alloc(64).unwrap();
    let b = arena.alloc(64).unwrap();
    let c = arena.alloc(64).unwrap();

    // c's chunk merges with the trailing free space
    arena.free(c).unwrap();
    arena.free(b).unwrap();
    assert_eq!(ledger(&arena), vec![Chunk::used(0, 64), Chunk::free(64, 448)]);

    assert_eq!(arena.alloc(32).unwrap().offset(), 64);
    arena.free(a).unwrap();
    assert!(arena.validate().is_ok());
}

//! Determinism Test - Golden Master verification.
//!
//! Matching is a pure function of current state and input: the same order
//! sequence must produce bit-identical report streams and book state across
//! runs.

use ladder_lob::{ExecutionReport, LimitOrder, OrderBook, Side};
use rand::prelude::*;
use rand_chacha::ChaCha8Rng;
use std::cell::RefCell;
use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};
use std::rc::Rc;

/// Generate a deterministic sequence of orders
fn generate_orders(seed: u64, count: usize) -> Vec<LimitOrder> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    (0..count)
        .map(|_| LimitOrder {
            side: if rng.gen_bool(0.5) { Side::Buy } else { Side::Sell },
            price: rng.gen_range(9_500..10_500),
            size: rng.gen_range(1..500),
        })
        .collect()
}

/// Hash of all emitted report legs, in emission order
fn hash_reports(reports: &[ExecutionReport]) -> u64 {
    let mut hasher = DefaultHasher::new();
    for r in reports {
        r.order_id.hash(&mut hasher);
        r.size.hash(&mut hasher);
        (r.side as u8).hash(&mut hasher);
    }
    hasher.finish()
}

/// Hash of the final book state: frontiers, counts and full depth
fn hash_state(book: &OrderBook) -> u64 {
    let mut hasher = DefaultHasher::new();
    book.max_bid().hash(&mut hasher);
    book.min_ask().hash(&mut hasher);
    book.bid_level_count().hash(&mut hasher);
    book.ask_level_count().hash(&mut hasher);
    book.get_order_book(|level, bid, bid_size, ask, ask_size| {
        (level, bid, bid_size, ask, ask_size).hash(&mut hasher);
    });
    hasher.finish()
}

/// Run the engine over an order sequence and return (report, state) hashes
fn run_engine(orders: &[LimitOrder]) -> (u64, u64) {
    let reports = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&reports);
    let mut book = OrderBook::new(
        9_000,
        11_000,
        orders.len() as u32,
        Box::new(move |r| sink.borrow_mut().push(r)),
    );

    for order in orders {
        book.limit_order(*order);
    }

    let report_hash = hash_reports(&reports.borrow());
    let state_hash = hash_state(&book);
    (report_hash, state_hash)
}

#[test]
fn determinism_small() {
    const SEED: u64 = 0xDEADBEEF;
    const COUNT: usize = 1_000;
    const RUNS: usize = 10;

    let orders = generate_orders(SEED, COUNT);
    let (first_report_hash, first_state_hash) = run_engine(&orders);

    for run in 1..RUNS {
        let (report_hash, state_hash) = run_engine(&orders);
        assert_eq!(report_hash, first_report_hash, "report hash mismatch on run {}", run);
        assert_eq!(state_hash, first_state_hash, "state hash mismatch on run {}", run);
    }
}

#[test]
fn determinism_large() {
    const SEED: u64 = 0xCAFEBABE;
    const COUNT: usize = 100_000;
    const RUNS: usize = 3;

    let orders = generate_orders(SEED, COUNT);
    let (first_report_hash, first_state_hash) = run_engine(&orders);

    for run in 1..RUNS {
        let (report_hash, state_hash) = run_engine(&orders);
        assert_eq!(report_hash, first_report_hash, "report hash mismatch on run {}", run);
        assert_eq!(state_hash, first_state_hash, "state hash mismatch on run {}", run);
    }
}

#[test]
fn different_seeds_produce_different_results() {
    let orders1 = generate_orders(1, 1_000);
    let orders2 = generate_orders(2, 1_000);

    let (hash1, _) = run_engine(&orders1);
    let (hash2, _) = run_engine(&orders2);

    assert_ne!(hash1, hash2, "different seeds should produce different results");
}

#[test]
fn ids_are_deterministic_and_monotonic() {
    let orders = generate_orders(0xA11CE, 2_000);

    let mut book = OrderBook::new(9_000, 11_000, 2_000, Box::new(|_| {}));
    for (expected_id, order) in orders.iter().enumerate() {
        assert_eq!(book.limit_order(*order), expected_id as u64);
    }
}

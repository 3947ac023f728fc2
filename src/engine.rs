//! Engine - thin host-facing facade over the order book.
//!
//! Behaviorally identical to calling the book directly; adds the process-
//! level conveniences a host wires up at startup: CPU pinning and page
//! warm-up. Single-threaded like the book it wraps.

use crate::book::OrderBook;
use crate::order::{LimitOrder, OrderId};
use crate::report::ExecutionHandler;

/// Host facade. Owns the book; submission delegates 1:1.
pub struct Engine {
    /// The underlying order book
    pub book: OrderBook,
}

impl Engine {
    /// Create an engine over a book spanning `[min_price, max_price]` with
    /// capacity for `max_orders` accepted orders.
    pub fn new(
        min_price: i64,
        max_price: i64,
        max_orders: u32,
        on_execution: ExecutionHandler,
    ) -> Self {
        Self {
            book: OrderBook::new(min_price, max_price, max_orders, on_execution),
        }
    }

    /// Submit a typed limit order. Identical to `OrderBook::limit_order`.
    #[inline]
    pub fn limit_order(&mut self, order: LimitOrder) -> OrderId {
        self.book.limit_order(order)
    }

    /// Submit with a wire-encoded side byte; `None` rejects unknown sides.
    #[inline]
    pub fn limit_order_raw(&mut self, side: u8, price: i64, size: u64) -> Option<OrderId> {
        self.book.limit_order_raw(side, price, size)
    }

    /// Pin the current thread to the last available CPU core.
    ///
    /// The last core is typically isolated from OS interrupts.
    pub fn pin_to_core(&self) {
        if let Some(core_ids) = core_affinity::get_core_ids() {
            if let Some(last_core) = core_ids.last() {
                core_affinity::set_for_current(*last_core);
            }
        }
    }

    /// Warm up the engine by pre-faulting memory pages.
    pub fn warm_up(&mut self) {
        self.book.warm_up();
    }

    /// Number of non-empty bid levels.
    #[inline]
    pub fn bid_level_count(&self) -> u64 {
        self.book.bid_level_count()
    }

    /// Number of non-empty ask levels.
    #[inline]
    pub fn ask_level_count(&self) -> u64 {
        self.book.ask_level_count()
    }

    /// Best resting buy price, if any.
    #[inline]
    pub fn best_bid(&self) -> Option<i64> {
        self.book.best_bid()
    }

    /// Best resting sell price, if any.
    #[inline]
    pub fn best_ask(&self) -> Option<i64> {
        self.book.best_ask()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::order::Side;

    fn engine() -> Engine {
        Engine::new(10000, 20000, 10_000, Box::new(|_| {}))
    }

    #[test]
    fn test_engine_creation() {
        let engine = engine();
        assert_eq!(engine.best_bid(), None);
        assert_eq!(engine.best_ask(), None);
    }

    #[test]
    fn test_facade_matches_book_behavior() {
        let mut engine = engine();

        assert_eq!(engine.limit_order(LimitOrder::new(Side::Buy, 11012, 30)), 0);
        assert_eq!(engine.limit_order_raw(1, 11020, 50), Some(1));
        assert_eq!(engine.limit_order_raw(7, 11020, 50), None);

        assert_eq!(engine.best_bid(), Some(11012));
        assert_eq!(engine.best_ask(), Some(11020));
        assert_eq!(engine.bid_level_count(), 1);
        assert_eq!(engine.ask_level_count(), 1);
    }

    #[test]
    fn test_engine_warm_up() {
        let mut engine = engine();
        engine.warm_up(); // Should not panic
    }
}

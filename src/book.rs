//! Order Book - dense-ladder matching core.
//!
//! Implements the cross/rest algorithm over the price ladder:
//! 1. CROSSING: walk the opposite frontier price-by-price, consuming
//!    resting FIFO queues nearest the incoming price first
//! 2. RESTING: append any residual quantity to the arena and enqueue it
//!    at its price level
//!
//! Single-writer, synchronous: callers serialize all access externally, and
//! execution reports fire inline during the `limit_order` call.

use crate::arena::{OrderArena, RestingOrder, NULL_INDEX};
use crate::ladder::PriceLadder;
use crate::order::{LimitOrder, OrderId, Side};
use crate::report::{ExecutionHandler, ExecutionReporter};

/// The central limit order book.
///
/// Owns the price ladder, the order arena and the execution reporter; all
/// three buffers are pre-allocated at construction and released together when
/// the book drops.
pub struct OrderBook {
    pub(crate) ladder: PriceLadder,
    pub(crate) arena: OrderArena,
    reporter: ExecutionReporter,
    /// Best resting buy price; `min_price - 1` when no bids rest
    pub(crate) max_bid: i64,
    /// Best resting sell price; `max_price + 1` when no asks rest
    pub(crate) min_ask: i64,
    /// Non-empty bid levels reachable from `max_bid` downward
    pub(crate) bid_level_count: u64,
    /// Non-empty ask levels reachable from `min_ask` upward
    pub(crate) ask_level_count: u64,
}

impl OrderBook {
    /// Create a book covering the inclusive price range
    /// `[min_price, max_price]` with room for `max_orders` accepted orders.
    ///
    /// All buffers are allocated and zeroed here; `limit_order` never
    /// allocates except through ladder growth.
    pub fn new(
        min_price: i64,
        max_price: i64,
        max_orders: u32,
        on_execution: ExecutionHandler,
    ) -> Self {
        Self {
            ladder: PriceLadder::new(min_price, max_price),
            arena: OrderArena::new(max_orders),
            reporter: ExecutionReporter::new(on_execution),
            max_bid: min_price - 1,
            min_ask: max_price + 1,
            bid_level_count: 0,
            ask_level_count: 0,
        }
    }

    /// Submit a limit order and return its id.
    ///
    /// Crosses against the opposite side first; any residual quantity rests
    /// in the book. Every call consumes exactly one id, including orders that
    /// cross away completely or carry zero size.
    ///
    /// # Algorithm (buy side; sell is the mirror)
    /// 1. Grow the ladder if the price is out of range
    /// 2. While size remains and the price reaches `min_ask`: skip empty
    ///    levels; drain levels whose aggregate fits; stop inside the first
    ///    level whose aggregate exceeds the remainder
    /// 3. Rest the residual at its level's tail and advance `max_bid`
    pub fn limit_order(&mut self, order: LimitOrder) -> OrderId {
        let LimitOrder { side, price, mut size } = order;

        if !self.ladder.contains(price) {
            self.ladder.grow(price);
        }

        match side {
            Side::Buy => {
                while size > 0 && price >= self.min_ask {
                    let aggregate = self.ladder.get(self.min_ask).aggregate_size;
                    if aggregate > 0 {
                        if aggregate > size {
                            return self.execute_partial_level(self.min_ask, size, Side::Buy);
                        }
                        size -= aggregate;
                        self.drain_level(self.min_ask, Side::Buy);
                        self.ask_level_count -= 1;
                    }
                    self.min_ask += 1;
                }

                if size > 0 {
                    if self.enqueue_resting(price, size) {
                        self.bid_level_count += 1;
                    }
                    if self.max_bid < price {
                        self.max_bid = price;
                    }
                }
            }
            Side::Sell => {
                while size > 0 && price <= self.max_bid {
                    let aggregate = self.ladder.get(self.max_bid).aggregate_size;
                    if aggregate > 0 {
                        if aggregate > size {
                            return self.execute_partial_level(self.max_bid, size, Side::Sell);
                        }
                        size -= aggregate;
                        self.drain_level(self.max_bid, Side::Sell);
                        self.bid_level_count -= 1;
                    }
                    self.max_bid -= 1;
                }

                if size > 0 {
                    if self.enqueue_resting(price, size) {
                        self.ask_level_count += 1;
                    }
                    if self.min_ask > price {
                        self.min_ask = price;
                    }
                }
            }
        }

        debug_assert!(self.max_bid < self.min_ask, "book crossed");
        self.arena.consume_id()
    }

    /// Raw-byte boundary entry, for callers feeding wire-encoded sides.
    ///
    /// An unrecognized side byte is a soft rejection: `None`, no id consumed,
    /// no state touched.
    pub fn limit_order_raw(&mut self, side: u8, price: i64, size: u64) -> Option<OrderId> {
        let side = Side::from_raw(side)?;
        Some(self.limit_order(LimitOrder { side, price, size }))
    }

    /// Fill part of a level whose aggregate exceeds the incoming remainder.
    ///
    /// Consumes whole resting orders from the head until the remainder fits
    /// inside the next one, which is shrunk in place (no new id) and becomes
    /// the new head. Aggregate, frontier and level counts stay consistent:
    /// the level survives, so neither the frontier nor the counts move.
    fn execute_partial_level(&mut self, level_price: i64, mut size: u64, taker_side: Side) -> OrderId {
        let taker_id = self.arena.peek_next_id();

        let level = self.ladder.get_mut(level_price);
        debug_assert!(level.aggregate_size > size);
        level.aggregate_size -= size;
        let mut index = level.head;

        loop {
            debug_assert!(index != NULL_INDEX, "aggregate out of sync with queue");
            let remaining = self.arena.get(index).remaining;

            if remaining > size {
                // The requirement ends inside this order: shrink it in place
                // and re-head the level at it.
                self.reporter.trade(self.arena.id_of(index), taker_id, size, taker_side);
                self.arena.get_mut(index).remaining = remaining - size;
                break;
            }

            // Whole-order consumption: report, zero the slot, walk on.
            self.reporter.trade(self.arena.id_of(index), taker_id, remaining, taker_side);
            size -= remaining;
            let next = self.arena.get(index).next;
            *self.arena.get_mut(index) = RestingOrder::empty();
            index = next;

            if size == 0 {
                // Exact boundary: the next live order becomes the head.
                break;
            }
        }

        self.ladder.get_mut(level_price).head = index;
        debug_assert!(self.max_bid < self.min_ask, "book crossed");
        self.arena.consume_id()
    }

    /// Drain an entire level in FIFO order, reporting one maker+taker pair
    /// per resting order, then zero the level. The caller adjusts the level
    /// count and advances the frontier.
    fn drain_level(&mut self, level_price: i64, taker_side: Side) {
        let taker_id = self.arena.peek_next_id();

        let mut index = self.ladder.get(level_price).head;
        while index != NULL_INDEX {
            let RestingOrder { remaining, next } = *self.arena.get(index);
            self.reporter.trade(self.arena.id_of(index), taker_id, remaining, taker_side);
            *self.arena.get_mut(index) = RestingOrder::empty();
            index = next;
        }

        self.ladder.get_mut(level_price).clear();
    }

    /// Append the residual to the arena and enqueue it at its level's tail.
    ///
    /// Returns `true` if this created a brand-new non-empty level (the
    /// caller then bumps the side's level count; merging into a live level
    /// does not).
    fn enqueue_resting(&mut self, price: i64, size: u64) -> bool {
        let index = self.arena.stage(size);

        let level = self.ladder.get_mut(price);
        level.aggregate_size += size;

        if level.head == NULL_INDEX {
            level.head = index;
            level.tail = index;
            true
        } else {
            let prev_tail = level.tail;
            level.tail = index;
            self.arena.get_mut(prev_tail).next = index;
            false
        }
    }

    /// Best resting buy frontier; `min_price - 1` when no bids rest.
    #[inline]
    pub fn max_bid(&self) -> i64 {
        self.max_bid
    }

    /// Best resting sell frontier; `max_price + 1` when no asks rest.
    #[inline]
    pub fn min_ask(&self) -> i64 {
        self.min_ask
    }

    /// Ids handed out so far (equals the id the next accepted order gets).
    #[inline]
    pub fn accepted_orders(&self) -> u64 {
        self.arena.accepted() as u64
    }

    /// Pre-fault the ladder and arena pages before steady-state use.
    pub fn warm_up(&mut self) {
        self.arena.warm_up();
        self.ladder.warm_up();
    }
}

impl std::fmt::Debug for OrderBook {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OrderBook")
            .field("max_bid", &self.max_bid)
            .field("min_ask", &self.min_ask)
            .field("bid_level_count", &self.bid_level_count)
            .field("ask_level_count", &self.ask_level_count)
            .field("accepted", &self.arena.accepted())
            .finish()
    }
}

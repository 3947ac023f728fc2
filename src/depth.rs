//! Depth-of-book queries - read-only level aggregation over the ladder.
//!
//! Level indices are 0-based ranks among NON-EMPTY price levels, best price
//! first; empty gap levels between populated prices never consume an index.
//! Finding a level entry pays a linear scan from the frontier, after which
//! its attributes read in O(1) through the returned handle.

use crate::book::OrderBook;

/// Opaque handle to a price level, as returned by the level queries.
///
/// Internally a raw offset into the ladder buffer. Valid only until the next
/// `limit_order` call: ladder growth rebases the buffer and matching mutates
/// level contents.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LevelEntry(pub(crate) usize);

impl OrderBook {
    /// Number of non-empty bid levels.
    #[inline]
    pub fn bid_level_count(&self) -> u64 {
        self.bid_level_count
    }

    /// Number of non-empty ask levels.
    #[inline]
    pub fn ask_level_count(&self) -> u64 {
        self.ask_level_count
    }

    /// Entry at the `level`-th non-empty bid level, best (highest) price
    /// first. `None` once `level` reaches the bid level count.
    pub fn entry_at_bid_level(&self, level: u64) -> Option<LevelEntry> {
        if level >= self.bid_level_count {
            return None;
        }

        let mut remaining = level;
        let mut bid = self.max_bid;
        loop {
            debug_assert!(bid >= self.ladder.min_price());
            if !self.ladder.get(bid).is_empty() {
                if remaining == 0 {
                    return Some(LevelEntry(self.ladder.offset_of(bid)));
                }
                remaining -= 1;
            }
            bid -= 1;
        }
    }

    /// Entry at the `level`-th non-empty ask level, best (lowest) price
    /// first. `None` once `level` reaches the ask level count.
    pub fn entry_at_ask_level(&self, level: u64) -> Option<LevelEntry> {
        if level >= self.ask_level_count {
            return None;
        }

        let mut remaining = level;
        let mut ask = self.min_ask;
        loop {
            debug_assert!(ask <= self.ladder.max_price());
            if !self.ladder.get(ask).is_empty() {
                if remaining == 0 {
                    return Some(LevelEntry(self.ladder.offset_of(ask)));
                }
                remaining -= 1;
            }
            ask += 1;
        }
    }

    /// O(1) reverse mapping from a level entry back to its price.
    #[inline]
    pub fn price_at_entry(&self, entry: LevelEntry) -> i64 {
        self.ladder.price_at_offset(entry.0)
    }

    /// Aggregate resting size at a level entry.
    #[inline]
    pub fn size_at_entry(&self, entry: LevelEntry) -> u64 {
        self.ladder.at_offset(entry.0).aggregate_size
    }

    /// Best resting buy price, if any bid level is populated.
    #[inline]
    pub fn best_bid(&self) -> Option<i64> {
        self.entry_at_bid_level(0).map(|e| self.price_at_entry(e))
    }

    /// Best resting sell price, if any ask level is populated.
    #[inline]
    pub fn best_ask(&self) -> Option<i64> {
        self.entry_at_ask_level(0).map(|e| self.price_at_entry(e))
    }

    /// Best-ask minus best-bid, when both sides are populated.
    pub fn spread(&self) -> Option<i64> {
        match (self.best_bid(), self.best_ask()) {
            (Some(bid), Some(ask)) => Some(ask - bid),
            _ => None,
        }
    }

    /// Joint depth snapshot: one callback per depth row for
    /// `0 .. max(bid_level_count, ask_level_count)`, both sides advancing in
    /// lock-step. A side that has no level at the row's depth reports
    /// `(0, 0)`.
    ///
    /// Callback arguments: `(level, bid_price, bid_size, ask_price, ask_size)`.
    pub fn get_order_book<F>(&self, mut on_level: F)
    where
        F: FnMut(u64, i64, u64, i64, u64),
    {
        let rows = self.bid_level_count.max(self.ask_level_count);
        let mut bid = self.max_bid;
        let mut ask = self.min_ask;

        for level in 0..rows {
            let (bid_price, bid_size) = if level < self.bid_level_count {
                loop {
                    debug_assert!(bid >= self.ladder.min_price());
                    let size = self.ladder.get(bid).aggregate_size;
                    if size > 0 {
                        break (bid, size);
                    }
                    bid -= 1;
                }
            } else {
                (0, 0)
            };

            let (ask_price, ask_size) = if level < self.ask_level_count {
                loop {
                    debug_assert!(ask <= self.ladder.max_price());
                    let size = self.ladder.get(ask).aggregate_size;
                    if size > 0 {
                        break (ask, size);
                    }
                    ask += 1;
                }
            } else {
                (0, 0)
            };

            on_level(level, bid_price, bid_size, ask_price, ask_size);

            bid -= 1;
            ask += 1;
        }
    }
}

//! Price Ladder - dense array of per-price aggregate records.
//!
//! One `PriceLevel` per integer price in the closed range
//! `[min_price, max_price]`, stored contiguously and addressed by
//! `price - min_price`. Access is O(1); covering an out-of-range price is a
//! cold full-copy `grow` that widens the range without disturbing existing
//! levels. The range never shrinks.

use crate::arena::{ArenaIndex, NULL_INDEX};

/// Aggregate state of all resting orders at one price on one side.
///
/// `head`/`tail` thread a singly linked FIFO queue through the order arena,
/// giving price-time priority within the level. `aggregate_size` always
/// equals the sum of `remaining` over that queue.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PriceLevel {
    /// Sum of remaining quantity across all queued orders
    pub aggregate_size: u64,
    /// Oldest queued order (first to match)
    pub head: ArenaIndex,
    /// Newest queued order (last to match)
    pub tail: ArenaIndex,
}

impl PriceLevel {
    /// An empty level
    #[inline]
    pub const fn empty() -> Self {
        Self {
            aggregate_size: 0,
            head: NULL_INDEX,
            tail: NULL_INDEX,
        }
    }

    /// Returns true if no orders rest at this price
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.aggregate_size == 0
    }

    /// Reset to the empty state after a full drain
    #[inline]
    pub fn clear(&mut self) {
        self.aggregate_size = 0;
        self.head = NULL_INDEX;
        self.tail = NULL_INDEX;
    }
}

impl Default for PriceLevel {
    fn default() -> Self {
        Self::empty()
    }
}

/// Dense ladder of price levels over a contiguous integer price range.
pub struct PriceLadder {
    levels: Vec<PriceLevel>,
    min_price: i64,
    max_price: i64,
}

impl PriceLadder {
    /// Create a ladder covering the closed range `[min_price, max_price]`,
    /// fully zeroed.
    ///
    /// # Panics
    /// Panics if the bounds are inverted.
    pub fn new(min_price: i64, max_price: i64) -> Self {
        assert!(min_price <= max_price, "inverted price bounds");
        let span = (max_price - min_price + 1) as usize;

        Self {
            levels: vec![PriceLevel::empty(); span],
            min_price,
            max_price,
        }
    }

    /// Lowest covered price (inclusive)
    #[inline]
    pub fn min_price(&self) -> i64 {
        self.min_price
    }

    /// Highest covered price (inclusive)
    #[inline]
    pub fn max_price(&self) -> i64 {
        self.max_price
    }

    /// Whether `price` falls inside the covered range
    #[inline]
    pub fn contains(&self, price: i64) -> bool {
        price >= self.min_price && price <= self.max_price
    }

    /// Offset of a covered price inside the backing buffer
    #[inline]
    fn offset(&self, price: i64) -> usize {
        debug_assert!(self.contains(price), "price outside ladder range");
        (price - self.min_price) as usize
    }

    /// O(1) level access. Valid only for covered prices.
    #[inline]
    pub fn get(&self, price: i64) -> &PriceLevel {
        let off = self.offset(price);
        &self.levels[off]
    }

    /// O(1) mutable level access. Valid only for covered prices.
    #[inline]
    pub fn get_mut(&mut self, price: i64) -> &mut PriceLevel {
        let off = self.offset(price);
        &mut self.levels[off]
    }

    /// Level access by raw buffer offset (depth-query handles).
    #[inline]
    pub(crate) fn at_offset(&self, offset: usize) -> &PriceLevel {
        &self.levels[offset]
    }

    /// Reverse mapping from a buffer offset to its price.
    #[inline]
    pub(crate) fn price_at_offset(&self, offset: usize) -> i64 {
        debug_assert!(offset < self.levels.len());
        self.min_price + offset as i64
    }

    /// Offset of a covered price, for building depth-query handles.
    #[inline]
    pub(crate) fn offset_of(&self, price: i64) -> usize {
        self.offset(price)
    }

    /// Number of covered prices
    #[inline]
    pub fn span(&self) -> usize {
        self.levels.len()
    }

    /// Widen the range to cover `target_price`.
    ///
    /// Allocates a fresh buffer sized to the exact new range, copies existing
    /// levels to their same relative offsets, zero-fills the added region and
    /// swaps. Existing level contents are preserved bit-for-bit; the old
    /// buffer is released on return. O(new range size), cold path.
    pub fn grow(&mut self, target_price: i64) {
        if target_price < self.min_price {
            let added = (self.min_price - target_price) as usize;
            let mut levels = vec![PriceLevel::empty(); added + self.levels.len()];
            levels[added..].copy_from_slice(&self.levels);
            self.levels = levels;
            self.min_price = target_price;
        } else if target_price > self.max_price {
            let span = (target_price - self.min_price + 1) as usize;
            let mut levels = vec![PriceLevel::empty(); span];
            levels[..self.levels.len()].copy_from_slice(&self.levels);
            self.levels = levels;
            self.max_price = target_price;
        }
        // In-range target: nothing to do
    }

    /// Pre-fault all memory pages (warm-up routine).
    pub fn warm_up(&mut self) {
        for level in &mut self.levels {
            unsafe {
                let p = &mut level.head as *mut ArenaIndex;
                std::ptr::write_volatile(p, std::ptr::read_volatile(p));
            }
        }
    }
}

impl std::fmt::Debug for PriceLadder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PriceLadder")
            .field("min_price", &self.min_price)
            .field("max_price", &self.max_price)
            .field("span", &self.levels.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_ladder_is_zeroed() {
        let ladder = PriceLadder::new(10000, 20000);
        assert_eq!(ladder.span(), 10001);
        assert_eq!(ladder.min_price(), 10000);
        assert_eq!(ladder.max_price(), 20000);

        assert!(ladder.get(10000).is_empty());
        assert!(ladder.get(15000).is_empty());
        assert!(ladder.get(20000).is_empty());
        assert_eq!(ladder.get(15000).head, NULL_INDEX);
    }

    #[test]
    fn test_get_mut_round_trip() {
        let mut ladder = PriceLadder::new(100, 200);
        ladder.get_mut(150).aggregate_size = 75;
        ladder.get_mut(150).head = 3;

        assert_eq!(ladder.get(150).aggregate_size, 75);
        assert_eq!(ladder.get(150).head, 3);
        assert!(ladder.get(149).is_empty());
    }

    #[test]
    fn test_grow_downward_preserves_levels() {
        let mut ladder = PriceLadder::new(10000, 20000);
        ladder.get_mut(10000).aggregate_size = 11;
        ladder.get_mut(11012).aggregate_size = 60;
        ladder.get_mut(20000).aggregate_size = 99;

        ladder.grow(8800);

        assert_eq!(ladder.min_price(), 8800);
        assert_eq!(ladder.max_price(), 20000);
        assert_eq!(ladder.span(), 11201);
        // New region is zeroed, old contents keep their prices
        assert!(ladder.get(8800).is_empty());
        assert!(ladder.get(9999).is_empty());
        assert_eq!(ladder.get(10000).aggregate_size, 11);
        assert_eq!(ladder.get(11012).aggregate_size, 60);
        assert_eq!(ladder.get(20000).aggregate_size, 99);
    }

    #[test]
    fn test_grow_upward_preserves_levels() {
        let mut ladder = PriceLadder::new(10000, 20000);
        ladder.get_mut(10000).aggregate_size = 11;
        ladder.get_mut(19999).aggregate_size = 7;

        ladder.grow(25000);

        assert_eq!(ladder.min_price(), 10000);
        assert_eq!(ladder.max_price(), 25000);
        assert_eq!(ladder.get(10000).aggregate_size, 11);
        assert_eq!(ladder.get(19999).aggregate_size, 7);
        assert!(ladder.get(20001).is_empty());
        assert!(ladder.get(25000).is_empty());
    }

    #[test]
    fn test_grow_in_range_is_noop() {
        let mut ladder = PriceLadder::new(100, 200);
        ladder.get_mut(150).aggregate_size = 5;
        ladder.grow(150);

        assert_eq!(ladder.min_price(), 100);
        assert_eq!(ladder.max_price(), 200);
        assert_eq!(ladder.get(150).aggregate_size, 5);
    }

    #[test]
    fn test_repeated_growth_only_widens() {
        let mut ladder = PriceLadder::new(100, 110);
        ladder.grow(90);
        ladder.grow(120);
        ladder.grow(95); // already covered

        assert_eq!(ladder.min_price(), 90);
        assert_eq!(ladder.max_price(), 120);
        assert_eq!(ladder.span(), 31);
    }

    #[test]
    fn test_offset_mapping() {
        let ladder = PriceLadder::new(8800, 9000);
        let off = ladder.offset_of(8850);
        assert_eq!(ladder.price_at_offset(off), 8850);
    }

    #[test]
    fn test_warm_up() {
        let mut ladder = PriceLadder::new(0, 10000);
        ladder.warm_up(); // Should not panic
    }
}

//! Order Arena - append-only slot store for resting orders.
//!
//! The arena pre-allocates `max_orders` slots at construction and hands them
//! out sequentially: the slot index IS the public order id. Slots are never
//! recycled; a matched-away order is zeroed in place and its id retired. The
//! whole buffer is released when the book drops.

use std::fmt;

use crate::order::OrderId;

/// Sentinel value representing a null/invalid index (like nullptr)
pub const NULL_INDEX: u32 = u32::MAX;

/// Type alias for arena indices - our "compressed pointers".
/// Using u32 instead of 64-bit pointers halves linkage size.
pub type ArenaIndex = u32;

/// A resting order. Identified by its slot index, which is also the order id
/// returned to the caller; there is no separate id field to store.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RestingOrder {
    /// Unfilled quantity; decremented in place by the matching loop,
    /// zero once fully consumed
    pub remaining: u64,
    /// Next order in the same price level's FIFO queue
    pub next: ArenaIndex,
}

impl RestingOrder {
    /// An empty/consumed slot
    #[inline]
    pub const fn empty() -> Self {
        Self {
            remaining: 0,
            next: NULL_INDEX,
        }
    }
}

/// Pre-allocated, append-only order store.
///
/// Also owns the monotonic order-id counter: ids and slots advance together,
/// including for fully-crossed orders that never occupy their slot.
pub struct OrderArena {
    /// Contiguous block of pre-allocated slots
    slots: Vec<RestingOrder>,
    /// Next id to hand out; doubles as the append position
    next_id: u32,
    /// Total capacity (`max_orders`)
    capacity: u32,
}

impl OrderArena {
    /// Create a new arena with the specified capacity.
    ///
    /// # Panics
    /// Panics if capacity is not below `NULL_INDEX` (MAX is reserved).
    pub fn new(capacity: u32) -> Self {
        assert!(capacity < NULL_INDEX, "capacity must be less than NULL_INDEX");

        Self {
            slots: vec![RestingOrder::empty(); capacity as usize],
            next_id: 0,
            capacity,
        }
    }

    /// Id the order currently being matched will receive.
    #[inline]
    pub fn peek_next_id(&self) -> OrderId {
        self.next_id as OrderId
    }

    /// Retire the in-flight id without writing a slot. Used for orders that
    /// crossed away completely and leave nothing resting.
    ///
    /// # Panics
    /// Panics once the id space (`max_orders`) is exhausted; exceeding the
    /// configured capacity is a caller contract violation, not a runtime
    /// condition the engine recovers from.
    #[inline]
    pub fn consume_id(&mut self) -> OrderId {
        assert!(self.next_id < self.capacity, "order capacity exhausted");
        let id = self.next_id;
        self.next_id += 1;
        id as OrderId
    }

    /// Write the in-flight order's slot and return its index (== its id).
    ///
    /// The id is not retired here; the caller finishes the order with
    /// [`consume_id`](Self::consume_id) exactly once per accepted order,
    /// staged or not.
    ///
    /// # Panics
    /// Same capacity contract as [`consume_id`](Self::consume_id).
    #[inline]
    pub fn stage(&mut self, size: u64) -> ArenaIndex {
        assert!(self.next_id < self.capacity, "order capacity exhausted");
        let index = self.next_id;
        self.slots[index as usize] = RestingOrder {
            remaining: size,
            next: NULL_INDEX,
        };
        index
    }

    /// Get an immutable reference to a slot. O(1) direct index arithmetic.
    #[inline]
    pub fn get(&self, index: ArenaIndex) -> &RestingOrder {
        debug_assert!(index <= self.next_id, "index out of bounds");
        &self.slots[index as usize]
    }

    /// Get a mutable reference to a slot. Valid for handed-out slots and the
    /// staged in-flight one.
    #[inline]
    pub fn get_mut(&mut self, index: ArenaIndex) -> &mut RestingOrder {
        debug_assert!(index <= self.next_id, "index out of bounds");
        &mut self.slots[index as usize]
    }

    /// Inverse mapping from a slot back to the public order id.
    #[inline]
    pub fn id_of(&self, index: ArenaIndex) -> OrderId {
        index as OrderId
    }

    /// Number of ids handed out so far (accepted orders, resting or not).
    #[inline]
    pub fn accepted(&self) -> u32 {
        self.next_id
    }

    /// Total capacity of the arena.
    #[inline]
    pub fn capacity(&self) -> u32 {
        self.capacity
    }

    /// Remaining id space.
    #[inline]
    pub fn is_full(&self) -> bool {
        self.next_id == self.capacity
    }

    /// Pre-fault all memory pages (warm-up routine).
    ///
    /// Walks every slot to force the OS to map virtual pages to physical
    /// RAM, preventing page faults in the hot path.
    pub fn warm_up(&mut self) {
        for slot in &mut self.slots {
            // Volatile self-write to prevent optimization
            unsafe {
                let p = &mut slot.next as *mut ArenaIndex;
                std::ptr::write_volatile(p, std::ptr::read_volatile(p));
            }
        }
    }
}

impl fmt::Debug for OrderArena {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OrderArena")
            .field("capacity", &self.capacity)
            .field("accepted", &self.next_id)
            .finish()
    }
}

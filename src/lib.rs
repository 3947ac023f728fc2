//! # Ladder-LOB
//!
//! A dense price-ladder limit order book matching engine.
//!
//! ## Design Principles
//!
//! - **Single-Writer**: One thread owns the order book exclusively (no locks)
//! - **Dense Ladder**: Price levels live in one contiguous array indexed by
//!   `price - min_price`, giving O(1) level access
//! - **Arena Allocation**: Resting orders live in a pre-allocated, append-only
//!   arena; an order's arena slot doubles as its public order id
//! - **Synchronous Reporting**: Execution reports are delivered inline on the
//!   caller's stack, maker leg then taker leg, per matched resting order
//!
//! ## Architecture
//!
//! ```text
//! [Caller] --> OrderBook::limit_order --> [PriceLadder / OrderArena]
//!                                                  |
//!                                         [ExecutionReporter]
//! ```

pub mod arena;
pub mod order;
pub mod report;
pub mod ladder;
pub mod book;
pub mod depth;
pub mod engine;
pub mod feed;

// Re-exports for convenience
pub use arena::{ArenaIndex, OrderArena, RestingOrder, NULL_INDEX};
pub use order::{LimitOrder, OrderId, Side};
pub use report::{ExecutionHandler, ExecutionReport};
pub use ladder::{PriceLadder, PriceLevel};
pub use book::OrderBook;
pub use depth::LevelEntry;
pub use engine::Engine;

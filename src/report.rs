//! Execution reporting - per-trade-leg delivery to a caller-supplied handler.
//!
//! Every matched resting order produces exactly two reports, in this fixed
//! order: the maker leg (the resting order's id and side), then the taker leg
//! (the incoming order's in-flight id and side), both carrying the matched
//! quantity. Delivery is synchronous on the matching call's stack; the
//! handler must not block.
//!
//! `ExecutionReport` is an immutable `Copy` value built fresh per leg, so
//! handlers may retain it freely.

use crate::order::{OrderId, Side};

/// One trade leg.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ExecutionReport {
    /// Id of the order this leg belongs to (maker's resting id, or the
    /// taker's in-flight id)
    pub order_id: OrderId,
    /// Matched quantity, identical on both legs of a pair
    pub size: u64,
    /// Side of the order this leg belongs to
    pub side: Side,
}

/// Caller-supplied execution handler, invoked once per trade leg.
pub type ExecutionHandler = Box<dyn FnMut(ExecutionReport)>;

/// Owns the delivery handler and enforces the maker-then-taker pairing.
pub(crate) struct ExecutionReporter {
    handler: ExecutionHandler,
}

impl ExecutionReporter {
    pub(crate) fn new(handler: ExecutionHandler) -> Self {
        Self { handler }
    }

    /// Emit one matched pair: maker leg first, then taker leg.
    #[inline]
    pub(crate) fn trade(&mut self, maker_id: OrderId, taker_id: OrderId, size: u64, taker_side: Side) {
        (self.handler)(ExecutionReport {
            order_id: maker_id,
            size,
            side: taker_side.opposite(),
        });
        (self.handler)(ExecutionReport {
            order_id: taker_id,
            size,
            side: taker_side,
        });
    }
}

impl std::fmt::Debug for ExecutionReporter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ExecutionReporter").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[test]
    fn test_maker_then_taker_ordering() {
        let legs = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&legs);
        let mut reporter = ExecutionReporter::new(Box::new(move |r| sink.borrow_mut().push(r)));

        reporter.trade(7, 42, 30, Side::Sell);

        let legs = legs.borrow();
        assert_eq!(legs.len(), 2);
        // Maker leg carries the resting order's side (a buy resting against
        // a sell taker), taker leg carries the incoming side.
        assert_eq!(legs[0], ExecutionReport { order_id: 7, size: 30, side: Side::Buy });
        assert_eq!(legs[1], ExecutionReport { order_id: 42, size: 30, side: Side::Sell });
    }

    #[test]
    fn test_reports_are_plain_values() {
        let held = Rc::new(RefCell::new(None));
        let sink = Rc::clone(&held);
        let mut reporter = ExecutionReporter::new(Box::new(move |r| {
            // Retaining a report across calls is fine; it is a Copy value.
            *sink.borrow_mut() = Some(r);
        }));

        reporter.trade(1, 2, 10, Side::Buy);
        reporter.trade(3, 4, 20, Side::Buy);

        // The retained value is the last leg, untouched by later emissions.
        assert_eq!(
            held.borrow().unwrap(),
            ExecutionReport { order_id: 4, size: 20, side: Side::Buy }
        );
    }
}

//! Order types shared across the engine.
//!
//! Prices are signed fixed-point integers; the scale (ticks per currency
//! unit) is a caller convention the engine never interprets. Sizes are plain
//! integers. Order ids are assigned by the book, one per accepted call.

/// Public order id. Numerically equal to the order's arena slot.
pub type OrderId = u64;

/// Order side (buy = bid, sell = ask)
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Side {
    /// Buy side (bids)
    Buy = 0,
    /// Sell side (asks)
    Sell = 1,
}

impl Side {
    /// Returns the opposite side
    #[inline]
    pub const fn opposite(self) -> Self {
        match self {
            Side::Buy => Side::Sell,
            Side::Sell => Side::Buy,
        }
    }

    /// Parse a raw wire byte. Anything other than the two known encodings
    /// is `None`; the book treats that as a rejected order.
    #[inline]
    pub const fn from_raw(raw: u8) -> Option<Self> {
        match raw {
            0 => Some(Side::Buy),
            1 => Some(Side::Sell),
            _ => None,
        }
    }
}

/// An incoming limit order. Transient input: the book never stores this
/// struct, only the residual size that ends up resting.
#[derive(Clone, Copy, Debug)]
pub struct LimitOrder {
    /// Order side (buy/sell)
    pub side: Side,
    /// Fixed-point limit price (e.g. $110.12 -> 11012 at two decimals)
    pub price: i64,
    /// Order quantity; zero is accepted and consumes an id without resting
    pub size: u64,
}

impl LimitOrder {
    /// Convenience constructor
    #[inline]
    pub const fn new(side: Side, price: i64, size: u64) -> Self {
        Self { side, price, size }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_side_opposite() {
        assert_eq!(Side::Buy.opposite(), Side::Sell);
        assert_eq!(Side::Sell.opposite(), Side::Buy);
    }

    #[test]
    fn test_side_from_raw() {
        assert_eq!(Side::from_raw(0), Some(Side::Buy));
        assert_eq!(Side::from_raw(1), Some(Side::Sell));
        assert_eq!(Side::from_raw(2), None);
        assert_eq!(Side::from_raw(255), None);
    }

    #[test]
    fn test_limit_order() {
        let order = LimitOrder::new(Side::Buy, 11012, 30);
        assert_eq!(order.side, Side::Buy);
        assert_eq!(order.price, 11012);
        assert_eq!(order.size, 30);
    }
}

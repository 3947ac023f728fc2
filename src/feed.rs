//! Order-file row types for the replay tool.
//!
//! Rows carry human-readable decimal prices; the book wants fixed-point
//! integer ticks, so conversion scales by a caller-chosen power of ten.
//! Malformed rows map to `None` and are skipped by the replayer.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::Deserialize;

use crate::order::{LimitOrder, Side};

/// One CSV row of an order file: `side,price,size`.
#[derive(Debug, Deserialize)]
pub struct OrderRow {
    pub side: String,
    pub price: Decimal,
    pub size: Decimal,
}

impl OrderRow {
    /// Convert to a book order, scaling the decimal price by
    /// `10^price_scale` ticks. `None` for unknown sides, fractional sizes
    /// after truncation, or values outside integer range.
    pub fn to_limit_order(&self, price_scale: u32) -> Option<LimitOrder> {
        let side = match self.side.trim().to_ascii_uppercase().as_str() {
            "BUY" | "BID" | "B" => Side::Buy,
            "SELL" | "ASK" | "S" => Side::Sell,
            _ => return None,
        };

        let scale = Decimal::from(10_i64.checked_pow(price_scale)?);
        let price = (self.price * scale).trunc().to_i64()?;
        let size = self.size.trunc().to_u64()?;

        Some(LimitOrder { side, price, size })
    }
}

//! Replay an order file through the book and print the resulting depth.
//!
//! Input is CSV with a `side,price,size` header; prices are decimals scaled
//! to integer ticks by `--price-scale`. Trade legs stream to stdout as they
//! fire; the final depth snapshot prints when the file is exhausted.

use clap::Parser;
use ladder_lob::feed::OrderRow;
use ladder_lob::{Engine, Side};
use std::cell::RefCell;
use std::path::PathBuf;
use std::rc::Rc;

#[derive(Parser, Debug)]
#[command(name = "replay", about = "Replay a CSV order file through the matching engine")]
struct Args {
    /// Order file to replay (CSV: side,price,size)
    file: PathBuf,

    /// Decimal places of the price column to scale into integer ticks
    #[arg(long, default_value_t = 2)]
    price_scale: u32,

    /// Initial lower price bound (ticks); the ladder grows past it on demand
    #[arg(long, default_value_t = 0)]
    min_price: i64,

    /// Initial upper price bound (ticks)
    #[arg(long, default_value_t = 100_000)]
    max_price: i64,

    /// Order capacity
    #[arg(long, default_value_t = 1_000_000)]
    max_orders: u32,

    /// Print each trade leg as it fires
    #[arg(long)]
    trades: bool,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let trade_legs = Rc::new(RefCell::new(0u64));
    let volume = Rc::new(RefCell::new(0u64));
    let legs_sink = Rc::clone(&trade_legs);
    let volume_sink = Rc::clone(&volume);
    let print_trades = args.trades;

    let mut engine = Engine::new(
        args.min_price,
        args.max_price,
        args.max_orders,
        Box::new(move |report| {
            *legs_sink.borrow_mut() += 1;
            if report.side == Side::Buy {
                // Count each matched quantity once (per pair, on the buy leg)
                *volume_sink.borrow_mut() += report.size;
            }
            if print_trades {
                println!(
                    "trade leg: order={} size={} side={:?}",
                    report.order_id, report.size, report.side
                );
            }
        }),
    );
    engine.warm_up();

    let mut reader = csv::Reader::from_path(&args.file)?;
    let mut accepted = 0u64;
    let mut skipped = 0u64;

    for result in reader.deserialize() {
        let row: OrderRow = result?;
        match row.to_limit_order(args.price_scale) {
            Some(order) => {
                engine.limit_order(order);
                accepted += 1;
            }
            None => skipped += 1,
        }
    }

    println!("\n=== Replay Summary ===");
    println!("Orders accepted: {}", accepted);
    println!("Rows skipped:    {}", skipped);
    println!("Trade legs:      {}", trade_legs.borrow());
    println!("Matched volume:  {}", volume.borrow());
    println!(
        "Levels:          {} bid / {} ask",
        engine.bid_level_count(),
        engine.ask_level_count()
    );

    println!("\nlevel,bid,bid_size,ask,ask_size");
    engine.book.get_order_book(|level, bid, bid_size, ask, ask_size| {
        println!("{},{},{},{},{}", level, bid, bid_size, ask, ask_size);
    });

    Ok(())
}

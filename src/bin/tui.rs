use crossterm::{
    event::{self, Event, KeyCode},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ladder_lob::{Engine, LimitOrder, Side};
use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Paragraph},
};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, RwLock};
use std::thread;
use std::{io, time::Duration};

/// A snapshot of the top levels to share with the UI
#[derive(Default, Clone)]
struct BookSnapshot {
    bids: Vec<(i64, u64)>, // (price, aggregate size)
    asks: Vec<(i64, u64)>,
}

struct SharedStats {
    ops_count: AtomicU64,
    trade_legs: AtomicU64,
    avg_latency_ns: AtomicU64,
    ids_used: AtomicU64,
    id_capacity: AtomicU64,
    book_snapshot: RwLock<BookSnapshot>,
}

impl SharedStats {
    fn new(capacity: u64) -> Self {
        Self {
            ops_count: AtomicU64::new(0),
            trade_legs: AtomicU64::new(0),
            avg_latency_ns: AtomicU64::new(0),
            ids_used: AtomicU64::new(0),
            id_capacity: AtomicU64::new(capacity),
            book_snapshot: RwLock::new(BookSnapshot::default()),
        }
    }
}

/// Render one side of the ladder as price / bar / size rows
fn render_level_bars(levels: &[(i64, u64)]) -> String {
    let mut out = String::new();
    let max_size = levels.iter().map(|(_, s)| *s).max().unwrap_or(1) as f32;

    for (price, size) in levels.iter().take(15) {
        let price_fmt = format!("{:.2}", *price as f64 / 100.0); // two-decimal ticks
        let bar_len = ((*size as f32 / max_size) * 20.0) as usize;
        let bar = "█".repeat(bar_len);
        out.push_str(&format!("{:>10} {} {:<6}\n", price_fmt, bar, size));
    }
    out
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Shared state
    let capacity: u32 = 20_000_000;
    let stats = Arc::new(SharedStats::new(capacity as u64));
    let stats_clone = Arc::clone(&stats);

    // Spawn engine thread (synthetic load)
    thread::spawn(move || {
        let legs = Arc::clone(&stats_clone);
        let mut engine = Engine::new(
            280_000,
            320_000,
            capacity,
            Box::new(move |_report| {
                legs.trade_legs.fetch_add(1, Ordering::Relaxed);
            }),
        );
        engine.pin_to_core();
        engine.warm_up();

        let mut rng = 12345u64; // Simple LCG for speed
        let mut loop_count = 0u64;

        // Start at $3,000.00 (two-decimal ticks)
        let mut mid_price: i64 = 300_000;

        loop {
            const BATCH_SIZE: u64 = 1000;
            let start_batch = std::time::Instant::now();

            for _ in 0..BATCH_SIZE {
                rng = rng.wrapping_mul(6364136223846793005).wrapping_add(1);
                // Use high 32 bits for better randomness (LCG low bits are poor)
                let r = rng >> 32;

                // Random walk on the mid-price
                if r % 100 == 0 {
                    let drift = (r % 11) as i64 - 5;
                    mid_price = (mid_price + drift).max(1000);
                }

                let side = if r % 2 == 0 { Side::Buy } else { Side::Sell };

                // Place orders around the mid-price with a spread plus noise
                let spread_offset = ((100 + (r % 400)) / 2) as i64;
                let noise = (r % 20) as i64 - 10;
                let base = match side {
                    Side::Buy => mid_price - spread_offset,
                    Side::Sell => mid_price + spread_offset,
                };
                let price = (base + noise).max(1);
                let size = 1 + (rng % 100);

                engine.limit_order(LimitOrder { side, price, size });
            }

            loop_count += 1;

            // Update stats
            stats_clone.ops_count.fetch_add(BATCH_SIZE, Ordering::Relaxed);
            let elapsed = start_batch.elapsed();
            stats_clone
                .avg_latency_ns
                .store(elapsed.as_nanos() as u64 / BATCH_SIZE, Ordering::Relaxed);
            stats_clone
                .ids_used
                .store(engine.book.accepted_orders(), Ordering::Relaxed);

            // Publish a depth snapshot every 50 batches
            if loop_count % 50 == 0 {
                if let Ok(mut write_guard) = stats_clone.book_snapshot.write() {
                    let mut bids = Vec::new();
                    let mut asks = Vec::new();
                    engine
                        .book
                        .get_order_book(|_level, bid, bid_size, ask, ask_size| {
                            if bid_size > 0 && bids.len() < 15 {
                                bids.push((bid, bid_size));
                            }
                            if ask_size > 0 && asks.len() < 15 {
                                asks.push((ask, ask_size));
                            }
                        });
                    write_guard.bids = bids;
                    write_guard.asks = asks;
                }
            }

            // The id space is append-only; stop generating near exhaustion
            if engine.book.accepted_orders() + BATCH_SIZE >= capacity as u64 {
                break;
            }
        }
    });

    // UI loop
    let mut last_ops = 0u64;
    let mut last_tick = std::time::Instant::now();

    loop {
        let snapshot = stats
            .book_snapshot
            .read()
            .map(|s| s.clone())
            .unwrap_or_default();

        let ops = stats.ops_count.load(Ordering::Relaxed);
        let legs = stats.trade_legs.load(Ordering::Relaxed);
        let latency = stats.avg_latency_ns.load(Ordering::Relaxed);
        let used = stats.ids_used.load(Ordering::Relaxed);
        let cap = stats.id_capacity.load(Ordering::Relaxed);

        let elapsed = last_tick.elapsed().as_secs_f64();
        let rate = if elapsed > 0.0 {
            (ops.saturating_sub(last_ops)) as f64 / elapsed
        } else {
            0.0
        };
        last_ops = ops;
        last_tick = std::time::Instant::now();

        terminal.draw(|f| {
            let chunks = Layout::default()
                .direction(Direction::Vertical)
                .constraints([Constraint::Length(6), Constraint::Min(0)])
                .split(f.size());

            let header = Paragraph::new(format!(
                "orders: {}\nthroughput: {:.0} ops/sec\ntrade legs: {}\navg latency: {} ns\nid space: {}/{}",
                ops, rate, legs, latency, used, cap
            ))
            .block(Block::default().title(" ladder-lob ").borders(Borders::ALL));
            f.render_widget(header, chunks[0]);

            let book_chunks = Layout::default()
                .direction(Direction::Horizontal)
                .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
                .split(chunks[1]);

            let bids = Paragraph::new(render_level_bars(&snapshot.bids))
                .style(Style::default().fg(Color::Green))
                .block(Block::default().title(" bids ").borders(Borders::ALL));
            f.render_widget(bids, book_chunks[0]);

            let asks = Paragraph::new(render_level_bars(&snapshot.asks))
                .style(Style::default().fg(Color::Red))
                .block(Block::default().title(" asks ").borders(Borders::ALL));
            f.render_widget(asks, book_chunks[1]);
        })?;

        if event::poll(Duration::from_millis(100))? {
            if let Event::Key(key) = event::read()? {
                if key.code == KeyCode::Char('q') {
                    break;
                }
            }
        }
    }

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    Ok(())
}

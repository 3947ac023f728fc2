use hdrhistogram::Histogram;
use ladder_lob::{Engine, LimitOrder, Side};
use std::time::Instant;

fn main() {
    println!("Preparing Latency Benchmark...");

    // Setup: alternate crossing buys/sells across a narrow band so the book
    // stays shallow and the arena never exhausts its id space.
    let mut engine = Engine::new(9_000, 11_000, 2_000_000, Box::new(|_| {}));
    engine.pin_to_core();
    engine.warm_up();

    let mut histogram = Histogram::<u64>::new_with_bounds(1, 100_000, 3).unwrap();

    const ITERATIONS: u64 = 1_000_000;

    println!("Running {} iterations...", ITERATIONS);

    let mut total_duration = std::time::Duration::new(0, 0);

    for i in 0..ITERATIONS {
        let order = LimitOrder {
            side: if i % 2 == 0 { Side::Buy } else { Side::Sell },
            price: 10_000 + (i % 100) as i64,
            size: 10,
        };

        // Critical measurement section
        let start = Instant::now();

        // Use black_box to prevent compiler optimization
        std::hint::black_box(engine.limit_order(order));

        let elapsed = start.elapsed();

        // Record nanoseconds; drop outliers above the histogram bound
        histogram.record(elapsed.as_nanos() as u64).unwrap_or(());
        total_duration += elapsed;
    }

    println!("\n=== Latency Report (ns) ===");
    println!("Total Ops:  {}", ITERATIONS);
    println!(
        "Throughput: {:.2} ops/sec",
        ITERATIONS as f64 / total_duration.as_secs_f64()
    );
    println!("---------------------------");
    println!("Min:    {:6} ns", histogram.min());
    println!("P50:    {:6} ns", histogram.value_at_quantile(0.50));
    println!("P90:    {:6} ns", histogram.value_at_quantile(0.90));
    println!("P99:    {:6} ns", histogram.value_at_quantile(0.99));
    println!("P99.9:  {:6} ns", histogram.value_at_quantile(0.999));
    println!("P99.99: {:6} ns", histogram.value_at_quantile(0.9999));
    println!("Max:    {:6} ns", histogram.max());
    println!("---------------------------");

    // Quick ASCII histogram
    println!("\nDistribution:");
    for v in histogram.iter_log(100_000, 2.0) {
        let count = v.count_at_value();
        if count > 0 {
            println!(
                "{:6} ns: {:10} count",
                v.value_iterated_to(),
                count
            );
        }
    }
}

//! Demonstrates statement-level tracing with a by-line wrapper.
//!
//! The wrapped body receives a `LineProbe` and laps immediately before each
//! statement; the printed measurement block then shows one line per
//! statement, alongside the total for the whole call.
//!
//! Run with: `cargo run --example time_taken_by_line`.

use std::hint::black_box;
use std::thread;
use std::time::Duration;

use time_taken::TimeIt;

fn main() {
    let timeit = TimeIt::new();

    let mut pipeline = timeit.by_line("pipeline", |probe, item_count: u64| {
        probe.lap();
        let raw: Vec<u64> = (0..item_count).collect();

        probe.lap();
        let transformed: Vec<u64> = raw.iter().map(|value| value.wrapping_mul(31)).collect();

        probe.lap();
        thread::sleep(Duration::from_millis(50)); // Pretend to publish somewhere.

        transformed.len()
    });

    let published = pipeline.call(100_000).into_value();
    black_box(published);
    println!("Published {published} items.");
}

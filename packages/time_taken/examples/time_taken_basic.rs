//! Simplified example demonstrating key `time_taken` types working together.
//!
//! This example shows how to use the main types in the `time_taken` package:
//! - `TimeIt`: Configures measurement and wraps callables
//! - `WrappedFn`: A wrapped callable that times every invocation
//!
//! Run with: `cargo run --example time_taken_basic`.

use std::hint::black_box;
use std::thread;
use std::time::Duration;

use time_taken::TimeIt;

fn main() {
    println!("=== Call Timing Example ===");
    println!();

    // Every invocation of a wrapped callable prints a measurement block.
    let timeit = TimeIt::new();

    let mut format_names = timeit.func("format_names", |count: usize| {
        let mut names = Vec::with_capacity(count);
        for i in 0..count {
            names.push(format!("participant-{i:04}"));
        }
        names
    });

    let names = format_names.call(10_000).into_value();
    black_box(&names);
    println!("Formatted {} names.", names.len());
    println!();

    let mut simulate_io = timeit.func("simulate_io", |delay: Duration| {
        thread::sleep(delay);
    });

    simulate_io.call(Duration::from_millis(150)).into_value();
    println!("Simulated a 150ms I/O wait.");
}

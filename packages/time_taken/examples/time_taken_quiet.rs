//! Collects measurements instead of printing them.
//!
//! With verbose output disabled, each call returns the trace records and the
//! summary lines alongside the target's value, which suits logging pipelines
//! and assertions in tests.
//!
//! Run with: `cargo run --example time_taken_quiet`.

use std::thread;
use std::time::Duration;

use time_taken::TimeIt;

fn main() {
    let timeit = TimeIt::builder().verbose(false).show_args(true).build();

    let mut resize = timeit.by_line("resize", |probe, (width, height): (u32, u32)| {
        probe.lap();
        let scaled_width = width.saturating_mul(2);

        probe.lap();
        let scaled_height = height.saturating_mul(2);

        probe.lap();
        thread::sleep(Duration::from_millis(25)); // Pretend to re-render.

        (scaled_width, scaled_height)
    });

    let (value, trace, summary) = resize.call((640, 480)).into_parts();

    println!("Resized to {value:?}.");
    println!();

    println!("Per-statement records:");
    for record in &trace {
        println!("  {record}");
    }
    println!();

    println!("Summary:");
    for line in &summary {
        println!("  {line}");
    }
}

//! Shows how the three clocks differ for the same workload.
//!
//! A sleeping workload advances the wall clocks but barely advances the
//! processor time clock; a busy workload advances them all.
//!
//! Run with: `cargo run --example clock_kinds`.

use std::hint::black_box;
use std::thread;
use std::time::{Duration, Instant};

use time_taken::{ClockKind, Timer};

/// Runs arithmetic that cannot be optimized away for at least the given
/// wall-clock duration.
fn busy_work_for(duration: Duration) -> u64 {
    let start = Instant::now();
    let mut accumulator = 0_u64;

    while start.elapsed() < duration {
        for i in 0..10_000_u32 {
            accumulator = accumulator.wrapping_add(u64::from(i)).rotate_left(1);
        }
        black_box(accumulator);
    }

    accumulator
}

fn measure(kind: ClockKind, workload: impl FnOnce()) -> String {
    let mut timer = Timer::with_memory_lock(kind, false);
    timer.start();
    workload();
    timer.stop();

    timer
        .elapsed()
        .map_or_else(|error| error.to_string(), |elapsed| elapsed.to_string())
}

fn main() {
    let sleep = || thread::sleep(Duration::from_millis(100));
    let busy = || {
        black_box(busy_work_for(Duration::from_millis(100)));
    };

    println!("Sleeping 100ms:");
    println!("  performance: {}", measure(ClockKind::Performance, sleep));
    println!("  process CPU: {}", measure(ClockKind::ProcessCpu, sleep));
    println!("  steady:      {}", measure(ClockKind::Steady, sleep));
    println!();

    println!("Busy for 100ms:");
    println!("  performance: {}", measure(ClockKind::Performance, busy));
    println!("  process CPU: {}", measure(ClockKind::ProcessCpu, busy));
    println!("  steady:      {}", measure(ClockKind::Steady, busy));
}

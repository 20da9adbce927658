//! Measures asynchronous callables, including time spent awaiting.
//!
//! The measurement runs from the moment the wrapper is called to the moment
//! the target's future completes, so suspension at await points is included.
//!
//! Run with: `cargo run --example time_taken_async`.

use std::thread;
use std::time::Duration;

use futures::executor::block_on;
use time_taken::TimeIt;

fn main() {
    let timeit = TimeIt::new();

    let mut fetch_profile =
        timeit.by_line_async("fetch_profile", |probe, user_id: u32| async move {
            probe.lap();
            let request = format!("GET /profiles/{user_id}");

            probe.lap();
            thread::sleep(Duration::from_millis(80)); // Pretend to wait on the network.

            probe.lap();
            format!("{request} -> 200 OK")
        });

    let response = block_on(fetch_profile.call(7)).into_value();
    println!("{response}");
}

#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

//! Call timing and statement tracing utilities for development-time performance analysis.
//!
//! This package provides utilities to measure how long callables take, enabling analysis
//! of where wall-clock or processor time goes while developing and debugging.
//!
//! The core functionality includes:
//! - [`TimeIt`] - Configures measurement and wraps callables
//! - [`WrappedFn`] / [`WrappedAsyncFn`] - Wrapped callables that time every invocation
//! - [`LineProbe`] - Marks statement boundaries inside a traced body
//! - [`Timer`] - Measures one interval against a chosen clock
//! - [`Clock`] - Reads the supported time sources
//! - [`Report`] / [`Timed`] - Measurement output, printed or returned
//!
//! This package is not meant for use in production, serving only as a development tool.
//!
//! # Simple Usage
//!
//! Wrap a callable and every invocation prints a measurement block to stdout:
//!
//! ```
//! use time_taken::TimeIt;
//!
//! # fn main() {
//! let timeit = TimeIt::new();
//!
//! let mut wrapped = timeit.func("sum_to", |n: u64| (0..n).sum::<u64>());
//!
//! let total = wrapped.call(10_000).into_value();
//! assert_eq!(total, 49_995_000);
//! # }
//! ```
//!
//! # Timing Each Statement
//!
//! A by-line wrapper hands the body a [`LineProbe`]. Lap immediately before each
//! statement and every statement gets its own line in the output:
//!
//! ```
//! use time_taken::TimeIt;
//!
//! # fn main() {
//! let timeit = TimeIt::new();
//!
//! let mut wrapped = timeit.by_line("stages", |probe, input: Vec<u64>| {
//!     probe.lap();
//!     let doubled: Vec<u64> = input.iter().map(|x| x * 2).collect();
//!     probe.lap();
//!     doubled.into_iter().sum::<u64>()
//! });
//!
//! let result = wrapped.call(vec![1, 2, 3]).into_value();
//! assert_eq!(result, 12);
//! # }
//! ```
//!
//! # Asynchronous Callables
//!
//! Async targets are measured from call to future completion, including time spent
//! suspended at await points:
//!
//! ```
//! use time_taken::TimeIt;
//!
//! # fn main() {
//! let timeit = TimeIt::new();
//!
//! let mut wrapped = timeit.func_async("lookup", |id: u32| async move { id.saturating_mul(2) });
//!
//! let value = futures::executor::block_on(wrapped.call(21)).into_value();
//! assert_eq!(value, 42);
//! # }
//! ```
//!
//! # Collecting Instead of Printing
//!
//! In quiet mode nothing is printed; the trace records and the summary ride back on
//! the returned [`Timed`]:
//!
//! ```
//! use time_taken::TimeIt;
//!
//! # fn main() {
//! let timeit = TimeIt::builder().verbose(false).show_args(true).build();
//!
//! let mut wrapped = timeit.by_line("steps", |probe, count: u32| {
//!     probe.lap();
//!     let expanded = count.saturating_mul(3);
//!     probe.lap();
//!     expanded.saturating_add(1)
//! });
//!
//! let (value, trace, summary) = wrapped.call(4).into_parts();
//! assert_eq!(value, 13);
//! assert_eq!(trace.len(), 2);
//! assert_eq!(summary.len(), 2); // One ARGS line, one TOOK line.
//! # }
//! ```
//!
//! # Clocks
//!
//! Measurements use the [`Performance`](ClockKind::Performance) clock unless configured
//! otherwise: a high-resolution monotonic clock reflecting elapsed wall-clock time.
//! [`ProcessCpu`](ClockKind::ProcessCpu) instead measures the time the process spent
//! executing, summed across all threads, and [`Steady`](ClockKind::Steady) reads a
//! monotonic clock unaffected by system time adjustments where the platform provides
//! one.
//!
//! # Threading
//!
//! [`TimeIt`] is thread-safe and its clones share one trace registry. The wrappers it
//! creates own the wrapped callable and stay on the thread that created them; create
//! one wrapper per thread when measuring from many threads.

mod call_context;
mod call_kind;
mod clock;
mod clock_kind;
mod clock_reading;
mod elapsed;
mod error;
mod line_probe;
mod pal;
mod report;
mod timed;
mod timeit;
mod timer;
mod trace_record;
mod trace_registry;
mod wrapped_async_fn;
mod wrapped_fn;

pub use call_kind::CallKind;
pub use clock::Clock;
pub use clock_kind::ClockKind;
pub use clock_reading::ClockReading;
pub use elapsed::{Elapsed, Unit};
pub use error::Error;
pub use line_probe::LineProbe;
pub use report::{Report, Separator};
pub use timed::Timed;
pub use timeit::{TimeIt, TimeItBuilder};
pub use timer::Timer;
pub use trace_record::TraceRecord;
pub use trace_registry::TraceRegistry;
pub use wrapped_async_fn::WrappedAsyncFn;
pub use wrapped_fn::WrappedFn;

// A poisoned lock means a thread panicked while recording; the measurement data can
// no longer be trusted, so we exit as well (we panic).
pub(crate) const ERR_POISONED_LOCK: &str = "encountered poisoned lock - continued execution \
    is not safe because recorded measurements can no longer be trusted";

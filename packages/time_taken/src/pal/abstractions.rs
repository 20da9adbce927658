//! Platform abstraction trait definitions.

use std::fmt::Debug;
use std::time::Duration;

/// Provides time sources and the memory hold used while measuring.
///
/// This trait abstracts the underlying platform-specific mechanisms, allowing
/// for both real implementations (using system calls) and fake implementations
/// (for testing).
///
/// Every time source reports the time elapsed since an arbitrary per-source
/// origin. Only differences between two values of the same source are
/// meaningful.
pub(crate) trait Platform: Debug + Send + Sync + 'static {
    /// Gets the current value of the highest-resolution monotonic wall clock.
    fn performance_time(&self) -> Duration;

    /// Gets the processor time consumed by the whole process so far.
    fn process_cpu_time(&self) -> Duration;

    /// Gets the current value of a monotonic clock that is immune to system
    /// time adjustment.
    fn steady_time(&self) -> Duration;

    /// Asks the operating system to keep the process's pages resident while a
    /// measurement is in progress. Best-effort; failure is silent.
    fn lock_memory(&self);

    /// Releases the request made by [`lock_memory`](Platform::lock_memory).
    /// Safe to call without a preceding hold.
    fn unlock_memory(&self);
}

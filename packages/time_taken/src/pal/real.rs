//! Real platform implementation backed by operating system facilities.

use std::sync::LazyLock;
use std::time::{Duration, Instant};

use cpu_time::ProcessTime;

use crate::pal::abstractions::Platform;

/// The shared instance used by every real-platform clock in the process.
///
/// A single instance is required so that all performance-clock readings share
/// one origin and remain comparable to each other.
pub(crate) static REAL_PLATFORM: LazyLock<RealPlatform> = LazyLock::new(RealPlatform::new);

/// Real implementation of the platform abstraction.
///
/// The performance clock is anchored to the moment the platform is first
/// touched; the other sources use whatever origin the operating system
/// assigns them.
#[derive(Debug)]
pub(crate) struct RealPlatform {
    origin: Instant,
}

impl RealPlatform {
    fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Platform for RealPlatform {
    fn performance_time(&self) -> Duration {
        self.origin.elapsed()
    }

    fn process_cpu_time(&self) -> Duration {
        ProcessTime::try_now()
            .expect("process CPU time is always readable on supported platforms")
            .as_duration()
    }

    #[cfg(target_os = "linux")]
    fn steady_time(&self) -> Duration {
        use std::io;
        use std::mem;

        // SAFETY: An all-zero timespec is a valid value of the type.
        let mut ts: libc::timespec = unsafe { mem::zeroed() };

        // SAFETY: CLOCK_MONOTONIC_RAW is valid on Linux and the pointer
        // refers to a live timespec that outlives the call.
        let result = unsafe { libc::clock_gettime(libc::CLOCK_MONOTONIC_RAW, &raw mut ts) };
        assert!(result == 0, "{}", io::Error::last_os_error());

        let secs = u64::try_from(ts.tv_sec)
            .expect("monotonic clock seconds are never negative on a running system");
        let nanos =
            u32::try_from(ts.tv_nsec).expect("timespec nanoseconds are always within 0..1e9");

        Duration::new(secs, nanos)
    }

    /// Outside Linux we fall back to the standard library clock, which is
    /// already monotonic but may be slewed by the operating system.
    #[cfg(not(target_os = "linux"))]
    fn steady_time(&self) -> Duration {
        self.origin.elapsed()
    }

    #[cfg(unix)]
    fn lock_memory(&self) {
        // SAFETY: mlockall takes no pointers and only changes paging behavior
        // for the calling process.
        let _ = unsafe { libc::mlockall(libc::MCL_CURRENT) };
    }

    #[cfg(not(unix))]
    fn lock_memory(&self) {}

    #[cfg(unix)]
    fn unlock_memory(&self) {
        // SAFETY: munlockall takes no pointers and is valid even without a
        // preceding mlockall.
        let _ = unsafe { libc::munlockall() };
    }

    #[cfg(not(unix))]
    fn unlock_memory(&self) {}
}

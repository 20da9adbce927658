//! Fake platform implementation for testing.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use crate::pal::abstractions::Platform;

/// Internal state for the fake platform that can be shared between clones.
#[derive(Debug)]
#[cfg(test)]
struct FakePlatformState {
    performance_time: Duration,
    process_cpu_time: Duration,
    steady_time: Duration,
    lock_calls: usize,
    unlock_calls: usize,
}

/// Fake implementation of the platform abstraction for testing.
///
/// This implementation allows tests to control the clock values instead of
/// relying on actual system calls, and counts memory hold operations instead
/// of performing them. Multiple clones of the same `FakePlatform` share the
/// same underlying state, allowing tests to modify values after platform
/// creation to simulate time progression.
#[derive(Clone, Debug)]
#[cfg(test)]
pub(crate) struct FakePlatform {
    state: Arc<Mutex<FakePlatformState>>,
}

#[cfg(test)]
impl FakePlatform {
    /// Creates a new fake platform with zero clock values and no recorded
    /// memory hold operations.
    pub(crate) fn new() -> Self {
        Self {
            state: Arc::new(Mutex::new(FakePlatformState {
                performance_time: Duration::ZERO,
                process_cpu_time: Duration::ZERO,
                steady_time: Duration::ZERO,
                lock_calls: 0,
                unlock_calls: 0,
            })),
        }
    }

    /// Sets the performance clock value.
    ///
    /// This affects all clones of this platform, allowing tests to simulate
    /// time progression during measurement.
    pub(crate) fn set_performance_time(&self, time: Duration) {
        self.state
            .lock()
            .expect("FakePlatform state lock should not be poisoned")
            .performance_time = time;
    }

    /// Sets the process CPU clock value.
    pub(crate) fn set_process_cpu_time(&self, time: Duration) {
        self.state
            .lock()
            .expect("FakePlatform state lock should not be poisoned")
            .process_cpu_time = time;
    }

    /// Sets the steady clock value.
    pub(crate) fn set_steady_time(&self, time: Duration) {
        self.state
            .lock()
            .expect("FakePlatform state lock should not be poisoned")
            .steady_time = time;
    }

    /// Advances every clock by the same delta.
    pub(crate) fn advance(&self, delta: Duration) {
        let mut state = self
            .state
            .lock()
            .expect("FakePlatform state lock should not be poisoned");

        state.performance_time = state
            .performance_time
            .checked_add(delta)
            .expect("fake clock overflow - this indicates an unrealistic test scenario");
        state.process_cpu_time = state
            .process_cpu_time
            .checked_add(delta)
            .expect("fake clock overflow - this indicates an unrealistic test scenario");
        state.steady_time = state
            .steady_time
            .checked_add(delta)
            .expect("fake clock overflow - this indicates an unrealistic test scenario");
    }

    /// Number of times a memory hold was requested.
    pub(crate) fn lock_calls(&self) -> usize {
        self.state
            .lock()
            .expect("FakePlatform state lock should not be poisoned")
            .lock_calls
    }

    /// Number of times a memory hold was released.
    pub(crate) fn unlock_calls(&self) -> usize {
        self.state
            .lock()
            .expect("FakePlatform state lock should not be poisoned")
            .unlock_calls
    }
}

#[cfg(test)]
impl Platform for FakePlatform {
    fn performance_time(&self) -> Duration {
        self.state
            .lock()
            .expect("FakePlatform state lock should not be poisoned")
            .performance_time
    }

    fn process_cpu_time(&self) -> Duration {
        self.state
            .lock()
            .expect("FakePlatform state lock should not be poisoned")
            .process_cpu_time
    }

    fn steady_time(&self) -> Duration {
        self.state
            .lock()
            .expect("FakePlatform state lock should not be poisoned")
            .steady_time
    }

    fn lock_memory(&self) {
        let mut state = self
            .state
            .lock()
            .expect("FakePlatform state lock should not be poisoned");

        state.lock_calls = state
            .lock_calls
            .checked_add(1)
            .expect("memory hold count overflow - this indicates an unrealistic test scenario");
    }

    fn unlock_memory(&self) {
        let mut state = self
            .state
            .lock()
            .expect("FakePlatform state lock should not be poisoned");

        state.unlock_calls = state
            .unlock_calls
            .checked_add(1)
            .expect("memory hold count overflow - this indicates an unrealistic test scenario");
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;

    #[test]
    fn initializes_with_zero_values() {
        let platform = FakePlatform::new();

        assert_eq!(platform.performance_time(), Duration::ZERO);
        assert_eq!(platform.process_cpu_time(), Duration::ZERO);
        assert_eq!(platform.steady_time(), Duration::ZERO);
        assert_eq!(platform.lock_calls(), 0);
        assert_eq!(platform.unlock_calls(), 0);
    }

    #[test]
    fn sets_each_clock_independently() {
        let platform = FakePlatform::new();

        platform.set_performance_time(Duration::from_millis(150));
        platform.set_process_cpu_time(Duration::from_millis(250));
        platform.set_steady_time(Duration::from_millis(350));

        assert_eq!(platform.performance_time(), Duration::from_millis(150));
        assert_eq!(platform.process_cpu_time(), Duration::from_millis(250));
        assert_eq!(platform.steady_time(), Duration::from_millis(350));
    }

    #[test]
    fn advance_moves_every_clock() {
        let platform = FakePlatform::new();

        platform.set_performance_time(Duration::from_millis(100));
        platform.advance(Duration::from_millis(50));

        assert_eq!(platform.performance_time(), Duration::from_millis(150));
        assert_eq!(platform.process_cpu_time(), Duration::from_millis(50));
        assert_eq!(platform.steady_time(), Duration::from_millis(50));
    }

    #[test]
    fn counts_memory_hold_operations() {
        let platform = FakePlatform::new();

        platform.lock_memory();
        platform.unlock_memory();
        platform.unlock_memory();

        assert_eq!(platform.lock_calls(), 1);
        assert_eq!(platform.unlock_calls(), 2);
    }

    #[test]
    fn shared_state_between_clones() {
        let platform1 = FakePlatform::new();
        let platform2 = platform1.clone();

        // Setting time on one clone affects the other.
        platform1.set_performance_time(Duration::from_millis(100));
        assert_eq!(platform2.performance_time(), Duration::from_millis(100));

        platform2.lock_memory();
        assert_eq!(platform1.lock_calls(), 1);
    }
}

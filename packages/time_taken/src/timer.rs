use crate::error::Result;
use crate::pal::{Platform, PlatformFacade};
use crate::{Clock, ClockKind, ClockReading, Elapsed, Error};

/// Measures one interval between an explicit start and stop.
///
/// A timer captures a [`ClockReading`] at each end of the interval and reports
/// the difference. It does nothing until started, and the interval can be read
/// any number of times once both ends are captured.
///
/// While running, a timer with memory locking enabled asks the operating
/// system to keep the process's pages resident so that page reclamation does
/// not perturb short measurements. The hold is best-effort and is released
/// when the timer stops, whatever the path out: an explicit [`stop`] call, an
/// early drop or an unwinding panic.
///
/// [`stop`]: Timer::stop
///
/// # Examples
///
/// ```
/// use std::thread;
/// use std::time::Duration;
///
/// use time_taken::Timer;
///
/// # fn main() -> Result<(), time_taken::Error> {
/// let mut timer = Timer::default();
///
/// timer.start();
/// thread::sleep(Duration::from_millis(20));
/// timer.stop();
///
/// println!("took {}", timer.elapsed()?);
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct Timer {
    clock: Clock,
    kind: ClockKind,
    lock_memory: bool,
    start: Option<ClockReading>,
    stop: Option<ClockReading>,
    running: bool,
}

impl Timer {
    /// Creates an idle timer over the given clock kind, with memory locking
    /// enabled.
    #[must_use]
    pub fn new(kind: ClockKind) -> Self {
        Self::with_memory_lock(kind, true)
    }

    /// Creates an idle timer with explicit control over memory locking.
    #[must_use]
    pub fn with_memory_lock(kind: ClockKind, lock_memory: bool) -> Self {
        Self {
            clock: Clock::new(),
            kind,
            lock_memory,
            start: None,
            stop: None,
            running: false,
        }
    }

    /// Creates an idle timer over an already-selected platform.
    pub(crate) fn with_platform(
        kind: ClockKind,
        lock_memory: bool,
        platform: PlatformFacade,
    ) -> Self {
        Self {
            clock: Clock::with_platform(platform),
            kind,
            lock_memory,
            start: None,
            stop: None,
            running: false,
        }
    }

    /// The clock kind this timer measures with.
    #[must_use]
    pub fn kind(&self) -> ClockKind {
        self.kind
    }

    /// Whether the timer is currently running.
    #[must_use]
    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Starts the interval.
    ///
    /// Takes the memory hold (when enabled) and then captures the start
    /// reading, so the cost of engaging the hold is not measured. Any stop
    /// reading left over from an earlier interval is discarded.
    ///
    /// Calling `start` on a timer that is already running changes nothing;
    /// the original start reading is kept.
    pub fn start(&mut self) {
        if self.running {
            return;
        }

        if self.lock_memory {
            self.clock.platform().lock_memory();
        }

        self.stop = None;
        self.start = Some(self.clock.now(self.kind));
        self.running = true;
    }

    /// Ends the interval.
    ///
    /// Captures the stop reading first and releases the memory hold after, so
    /// the cost of releasing is not measured. The hold is released even when
    /// the timer was never started; calling `stop` repeatedly re-captures the
    /// stop reading each time.
    pub fn stop(&mut self) {
        self.stop = Some(self.clock.now(self.kind));

        if self.lock_memory {
            self.clock.platform().unlock_memory();
        }

        self.running = false;
    }

    /// The measured interval.
    ///
    /// Deterministic: reading it repeatedly returns the same value until the
    /// timer is started again.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotReady`] until both the start and stop readings
    /// have been captured.
    pub fn elapsed(&self) -> Result<Elapsed> {
        let start = self.start.ok_or(Error::NotReady { missing: "start" })?;
        let stop = self.stop.ok_or(Error::NotReady { missing: "stop" })?;

        stop.duration_since(start)
    }

    /// The measured interval as a whole number of nanoseconds.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotReady`] until both readings have been captured.
    pub fn elapsed_nanos(&self) -> Result<u128> {
        Ok(self.elapsed()?.as_nanos())
    }

    /// The measured interval in fractional seconds.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotReady`] until both readings have been captured.
    pub fn elapsed_secs_f64(&self) -> Result<f64> {
        Ok(self.elapsed()?.as_secs_f64())
    }

    /// The measured interval in fractional milliseconds.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotReady`] until both readings have been captured.
    pub fn elapsed_millis_f64(&self) -> Result<f64> {
        Ok(self.elapsed()?.as_millis_f64())
    }

    /// The measured interval in fractional microseconds.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotReady`] until both readings have been captured.
    pub fn elapsed_micros_f64(&self) -> Result<f64> {
        Ok(self.elapsed()?.as_micros_f64())
    }
}

impl Default for Timer {
    /// An idle timer over the performance clock with memory locking enabled.
    fn default() -> Self {
        Self::new(ClockKind::default())
    }
}

impl Drop for Timer {
    fn drop(&mut self) {
        // A timer abandoned mid-measurement must not leave the hold engaged.
        if self.running && self.lock_memory {
            self.clock.platform().unlock_memory();
        }
    }
}

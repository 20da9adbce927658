use crate::pal::{Platform, PlatformFacade};
use crate::{ClockKind, ClockReading};

/// Captures readings from the platform's time sources.
///
/// A clock is a cheap handle; create one wherever convenient. Every clock in
/// the process observes the same underlying time sources, so readings of the
/// same [`ClockKind`] are comparable no matter which clock captured them.
///
/// # Examples
///
/// ```
/// use std::thread;
/// use std::time::Duration;
///
/// use time_taken::{Clock, ClockKind};
///
/// # fn main() -> Result<(), time_taken::Error> {
/// let clock = Clock::new();
///
/// let start = clock.now(ClockKind::Performance);
/// thread::sleep(Duration::from_millis(10));
/// let end = clock.now(ClockKind::Performance);
///
/// assert!(end.duration_since(start)?.as_nanos() > 0);
/// # Ok(())
/// # }
/// ```
#[derive(Clone, Debug)]
pub struct Clock {
    platform: PlatformFacade,
}

impl Clock {
    /// Creates a clock backed by the real platform time sources.
    #[must_use]
    pub fn new() -> Self {
        Self {
            platform: PlatformFacade::real(),
        }
    }

    /// Creates a clock over an already-selected platform, so that every part
    /// of one measurement observes the same time sources.
    pub(crate) fn with_platform(platform: PlatformFacade) -> Self {
        Self { platform }
    }

    pub(crate) fn platform(&self) -> &PlatformFacade {
        &self.platform
    }

    /// Captures the current reading of the selected time source.
    #[must_use]
    pub fn now(&self, kind: ClockKind) -> ClockReading {
        let since_origin = match kind {
            ClockKind::Performance => self.platform.performance_time(),
            ClockKind::ProcessCpu => self.platform.process_cpu_time(),
            ClockKind::Steady => self.platform.steady_time(),
        };

        ClockReading::new(kind, since_origin)
    }
}

impl Default for Clock {
    fn default() -> Self {
        Self::new()
    }
}

//! Enum-based dispatch between the real and fake platforms.

use std::sync::LazyLock;
use std::time::Duration;

use crate::pal::abstractions::Platform;
#[cfg(test)]
use crate::pal::fake::FakePlatform;
use crate::pal::real::{REAL_PLATFORM, RealPlatform};

/// Platform selector carried by every clock, timer and wrapper.
///
/// Cheap to clone; all clones of a fake facade observe the same underlying
/// fake state.
#[derive(Clone, Debug)]
pub(crate) enum PlatformFacade {
    /// Uses real operating system facilities.
    Real(&'static RealPlatform),

    /// Uses a fake platform with test-controlled values.
    #[cfg(test)]
    Fake(FakePlatform),
}

impl PlatformFacade {
    /// Returns a facade over the process-wide real platform.
    pub(crate) fn real() -> Self {
        Self::Real(LazyLock::force(&REAL_PLATFORM))
    }

    /// Returns a facade over the given fake platform.
    #[cfg(test)]
    pub(crate) fn fake(fake: FakePlatform) -> Self {
        Self::Fake(fake)
    }
}

impl Platform for PlatformFacade {
    fn performance_time(&self) -> Duration {
        match self {
            Self::Real(p) => p.performance_time(),
            #[cfg(test)]
            Self::Fake(p) => p.performance_time(),
        }
    }

    fn process_cpu_time(&self) -> Duration {
        match self {
            Self::Real(p) => p.process_cpu_time(),
            #[cfg(test)]
            Self::Fake(p) => p.process_cpu_time(),
        }
    }

    fn steady_time(&self) -> Duration {
        match self {
            Self::Real(p) => p.steady_time(),
            #[cfg(test)]
            Self::Fake(p) => p.steady_time(),
        }
    }

    fn lock_memory(&self) {
        match self {
            Self::Real(p) => p.lock_memory(),
            #[cfg(test)]
            Self::Fake(p) => p.lock_memory(),
        }
    }

    fn unlock_memory(&self) {
        match self {
            Self::Real(p) => p.unlock_memory(),
            #[cfg(test)]
            Self::Fake(p) => p.unlock_memory(),
        }
    }
}

#[cfg(test)]
impl From<FakePlatform> for PlatformFacade {
    fn from(fake: FakePlatform) -> Self {
        Self::Fake(fake)
    }
}

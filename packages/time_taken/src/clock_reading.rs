use std::time::Duration;

use crate::error::Result;
use crate::{ClockKind, Elapsed, Error};

/// An opaque moment captured from one time source.
///
/// A reading is only meaningful relative to another reading of the same
/// [`ClockKind`]; the origin is arbitrary and differs between kinds, between
/// processes and between runs.
///
/// # Examples
///
/// ```
/// use time_taken::{Clock, ClockKind};
///
/// # fn main() -> Result<(), time_taken::Error> {
/// let clock = Clock::new();
///
/// let start = clock.now(ClockKind::Performance);
/// let end = clock.now(ClockKind::Performance);
///
/// let elapsed = end.duration_since(start)?;
/// println!("waited {elapsed}");
/// # Ok(())
/// # }
/// ```
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct ClockReading {
    kind: ClockKind,
    since_origin: Duration,
}

impl ClockReading {
    pub(crate) fn new(kind: ClockKind, since_origin: Duration) -> Self {
        Self { kind, since_origin }
    }

    /// The kind of clock this reading was taken from.
    #[must_use]
    pub fn kind(self) -> ClockKind {
        self.kind
    }

    /// The span between an earlier reading of the same kind and this one.
    ///
    /// The difference saturates to zero, so a reading never appears to
    /// precede an earlier one.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MixedClocks`] when the two readings come from
    /// different clock kinds.
    pub fn duration_since(self, earlier: Self) -> Result<Elapsed> {
        if self.kind != earlier.kind {
            return Err(Error::MixedClocks {
                start: earlier.kind,
                end: self.kind,
            });
        }

        Ok(Elapsed::from_duration(
            self.since_origin.saturating_sub(earlier.since_origin),
        ))
    }
}

use thiserror::Error;

use crate::ClockKind;

/// Errors that can occur when reading timers and combining clock readings.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum Error {
    /// A duration was requested from a timer that has not yet captured both ends
    /// of the interval.
    #[error("timer has not captured a complete interval: missing the {missing} reading")]
    NotReady {
        /// Which endpoint of the interval is absent, either `start` or `stop`.
        missing: &'static str,
    },

    /// Two clock readings from different clock kinds were combined.
    ///
    /// Readings are only meaningful relative to other readings of the same kind;
    /// there is no common origin across kinds.
    #[error("clock readings come from different clocks: {start:?} and {end:?}")]
    MixedClocks {
        /// The kind of the earlier reading.
        start: ClockKind,

        /// The kind of the later reading.
        end: ClockKind,
    },
}

/// A specialized `Result` type for timing operations, returning the crate's
/// [`Error`] type as the error value.
pub(crate) type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use std::fmt::Debug;

    use static_assertions::assert_impl_all;

    use super::*;

    assert_impl_all!(Error: Send, Sync, Debug);

    #[test]
    fn not_ready_is_error() {
        let error = Error::NotReady { missing: "stop" };

        // Verify it is a valid Error that can be used in Result context.
        let result: Result<()> = Err(error);
        assert!(result.is_err());
    }

    #[test]
    fn messages_name_the_problem() {
        let not_ready = Error::NotReady { missing: "start" };
        assert!(not_ready.to_string().contains("start"));

        let mixed = Error::MixedClocks {
            start: ClockKind::Performance,
            end: ClockKind::ProcessCpu,
        };
        assert!(mixed.to_string().contains("different clocks"));
    }
}

use std::fmt;
use std::time::Duration;

/// A measured span of time, displayed in the most readable unit.
///
/// The value is exact to the nanosecond internally; the unit is chosen only
/// when the value is presented. Units are walked from seconds down to
/// nanoseconds and the first one in which the value exceeds 1 wins, so a span
/// is never shown as `0.0000032 s` when `3.2 μs` reads better.
///
/// # Examples
///
/// ```
/// use time_taken::Elapsed;
///
/// let long = Elapsed::from_nanos(1_500_000_000);
/// assert_eq!(long.to_string(), "1.5 s");
///
/// let short = Elapsed::from_nanos(320_156);
/// assert_eq!(short.to_string(), "320.156 μs");
/// ```
#[derive(Clone, Copy, Debug, Default, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct Elapsed {
    span: Duration,
}

impl Elapsed {
    /// A span of zero length.
    pub const ZERO: Self = Self {
        span: Duration::ZERO,
    };

    /// Creates a span from a duration.
    #[must_use]
    pub fn from_duration(span: Duration) -> Self {
        Self { span }
    }

    /// Creates a span from a whole number of nanoseconds.
    #[must_use]
    pub fn from_nanos(nanos: u64) -> Self {
        Self {
            span: Duration::from_nanos(nanos),
        }
    }

    /// The span as a whole number of nanoseconds.
    #[must_use]
    pub fn as_nanos(self) -> u128 {
        self.span.as_nanos()
    }

    /// The span as a standard library duration.
    #[must_use]
    pub fn to_duration(self) -> Duration {
        self.span
    }

    #[expect(
        clippy::cast_precision_loss,
        reason = "spans in realistic measurements stay far below the 2^52 ns threshold where f64 starts dropping nanoseconds"
    )]
    fn nanos_f64(self) -> f64 {
        self.span.as_nanos() as f64
    }

    /// The span in fractional seconds.
    #[must_use]
    pub fn as_secs_f64(self) -> f64 {
        self.nanos_f64() / 1_000_000_000.0
    }

    /// The span in fractional milliseconds.
    #[must_use]
    pub fn as_millis_f64(self) -> f64 {
        self.nanos_f64() / 1_000_000.0
    }

    /// The span in fractional microseconds.
    #[must_use]
    pub fn as_micros_f64(self) -> f64 {
        self.nanos_f64() / 1_000.0
    }

    /// The span expressed in the unit that reads best.
    ///
    /// Walks seconds, milliseconds and microseconds in that order and picks
    /// the first in which the value exceeds 1, falling back to nanoseconds
    /// when even a microsecond is too coarse.
    ///
    /// # Examples
    ///
    /// ```
    /// use time_taken::{Elapsed, Unit};
    ///
    /// let (value, unit) = Elapsed::from_nanos(320_156).auto_unit();
    /// assert_eq!(value, 320.156);
    /// assert_eq!(unit, Unit::Microseconds);
    /// ```
    #[must_use]
    pub fn auto_unit(self) -> (f64, Unit) {
        let secs = self.as_secs_f64();
        if secs > 1.0 {
            return (secs, Unit::Seconds);
        }

        let millis = self.as_millis_f64();
        if millis > 1.0 {
            return (millis, Unit::Milliseconds);
        }

        let micros = self.as_micros_f64();
        if micros > 1.0 {
            return (micros, Unit::Microseconds);
        }

        (self.nanos_f64(), Unit::Nanoseconds)
    }
}

impl From<Duration> for Elapsed {
    fn from(span: Duration) -> Self {
        Self::from_duration(span)
    }
}

impl fmt::Display for Elapsed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (value, unit) = self.auto_unit();
        write!(f, "{value} {unit}")
    }
}

/// A display unit for a measured span.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
#[non_exhaustive]
pub enum Unit {
    /// Seconds, displayed as `s`.
    Seconds,

    /// Milliseconds, displayed as `ms`.
    Milliseconds,

    /// Microseconds, displayed as `μs`.
    Microseconds,

    /// Nanoseconds, displayed as `ns`.
    Nanoseconds,
}

impl Unit {
    /// The symbol used when displaying a value in this unit.
    #[must_use]
    pub fn symbol(self) -> &'static str {
        match self {
            Self::Seconds => "s",
            Self::Milliseconds => "ms",
            Self::Microseconds => "μs",
            Self::Nanoseconds => "ns",
        }
    }
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

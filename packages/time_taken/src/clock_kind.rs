/// Selects the time source used for a measurement.
///
/// Readings taken from different kinds have unrelated origins and cannot be
/// combined; pick one kind per measurement.
///
/// # Examples
///
/// ```
/// use time_taken::ClockKind;
///
/// // The default kind suits short, precise measurements.
/// assert_eq!(ClockKind::default(), ClockKind::Performance);
/// ```
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
#[non_exhaustive]
pub enum ClockKind {
    /// The highest-resolution monotonic wall clock available.
    ///
    /// Best suited for short measurements where resolution matters most.
    #[default]
    Performance,

    /// Processor time consumed by the whole process.
    ///
    /// Time spent sleeping or blocked does not advance this clock, so it
    /// measures computation rather than elapsed wall time.
    ProcessCpu,

    /// A monotonic clock immune to system time adjustment.
    ///
    /// Best suited for long-running measurements that must not be disturbed
    /// by NTP slew or manual clock changes.
    Steady,
}

use std::sync::Arc;

use crate::TraceRegistry;

/// Marks statement boundaries inside a traced body.
///
/// A by-line wrapper hands a probe to the body it wraps. The body calls
/// [`lap`](LineProbe::lap) immediately before each of its statements; the
/// wrapper turns the intervals between laps into trace records. The first lap
/// only starts the statement stopwatch, each later lap records the statement
/// just finished, and the interval from the final lap to the body's return is
/// recorded when the call completes. A body that laps once per statement
/// therefore produces exactly one record per statement.
///
/// Laps are routed through the registry by function name. When no live
/// session is registered under the probe's name, a lap does nothing, so a
/// probe that outlives its call (for example inside a future that was
/// dropped) is harmless.
///
/// # Examples
///
/// ```
/// use time_taken::TimeIt;
///
/// let timeit = TimeIt::builder().verbose(false).build();
/// let mut traced = timeit.by_line("scale", |probe, factor: u64| {
///     probe.lap();
///     let base = 21;
///     probe.lap();
///     base * factor
/// });
///
/// let timed = traced.call(2);
/// assert_eq!(timed.trace().len(), 2);
/// ```
#[derive(Clone, Debug)]
pub struct LineProbe {
    registry: Arc<TraceRegistry>,
    function: Arc<str>,
}

impl LineProbe {
    pub(crate) fn new(registry: Arc<TraceRegistry>, function: Arc<str>) -> Self {
        Self { registry, function }
    }

    /// The name of the traced callable this probe belongs to.
    #[must_use]
    pub fn function(&self) -> &str {
        &self.function
    }

    /// Marks the start of a new statement.
    pub fn lap(&self) {
        self.registry.boundary(&self.function);
    }
}

use crate::TraceRecord;

/// The outcome of one wrapped invocation.
///
/// Always carries the callable's own return value. Whether the measurement
/// data rides along depends on the wrapper's verbosity: a quiet wrapper fills
/// in the trace records and the summary lines, while a verbose wrapper has
/// already printed them and returns them empty.
///
/// # Examples
///
/// ```
/// use time_taken::TimeIt;
///
/// let timeit = TimeIt::builder().verbose(false).build();
/// let mut wrapped = timeit.func("double", |n: u64| n * 2);
///
/// let (value, trace, summary) = wrapped.call(21).into_parts();
/// assert_eq!(value, 42);
/// assert!(trace.is_empty());
/// assert_eq!(summary.len(), 1);
/// ```
#[derive(Debug)]
#[must_use = "the wrapped callable's return value is carried inside"]
pub struct Timed<R> {
    value: R,
    trace: Vec<TraceRecord>,
    summary: Vec<String>,
}

impl<R> Timed<R> {
    pub(crate) fn new(value: R, trace: Vec<TraceRecord>, summary: Vec<String>) -> Self {
        Self {
            value,
            trace,
            summary,
        }
    }

    /// The wrapped callable's return value.
    #[must_use]
    pub fn value(&self) -> &R {
        &self.value
    }

    /// The statement records captured during the invocation.
    ///
    /// Empty for whole-call wrappers and for verbose wrappers of any mode.
    #[must_use]
    pub fn trace(&self) -> &[TraceRecord] {
        &self.trace
    }

    /// The plain-text summary of the invocation.
    ///
    /// Empty for verbose wrappers, which have already printed it.
    #[must_use]
    pub fn summary(&self) -> &[String] {
        &self.summary
    }

    /// Consumes the outcome, keeping only the return value.
    pub fn into_value(self) -> R {
        self.value
    }

    /// Consumes the outcome into its three parts: the return value, the
    /// statement records and the summary lines, in that order.
    pub fn into_parts(self) -> (R, Vec<TraceRecord>, Vec<String>) {
        (self.value, self.trace, self.summary)
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use std::fmt::Debug;
    use std::sync::Arc;

    use static_assertions::assert_impl_all;

    use super::*;
    use crate::{CallKind, Elapsed};

    assert_impl_all!(Timed<u32>: Debug, Send, Sync);

    #[test]
    fn parts_come_back_in_order() {
        let record = TraceRecord::new(Arc::from("f"), CallKind::Sync, 0, Elapsed::from_nanos(1));
        let timed = Timed::new(7_u32, vec![record], vec!["TOOK: 1 ns".to_string()]);

        assert_eq!(*timed.value(), 7);
        assert_eq!(timed.trace().len(), 1);
        assert_eq!(timed.summary().len(), 1);

        let (value, trace, summary) = timed.into_parts();
        assert_eq!(value, 7);
        assert_eq!(trace.len(), 1);
        assert_eq!(summary.len(), 1);
    }

    #[test]
    fn into_value_discards_the_rest() {
        let timed = Timed::new("payload", Vec::new(), Vec::new());

        assert_eq!(timed.into_value(), "payload");
    }
}

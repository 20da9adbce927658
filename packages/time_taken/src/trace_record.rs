use std::fmt;
use std::sync::Arc;

use crate::{CallKind, Elapsed};

/// One completed statement interval inside a traced call.
///
/// Records are emitted in execution order. The `line` identifier is the
/// zero-based index of the statement within the traced body, counted from the
/// first statement the body marked with a lap.
///
/// # Examples
///
/// ```
/// use time_taken::TimeIt;
///
/// let timeit = TimeIt::builder().verbose(false).build();
/// let mut traced = timeit.by_line("sum", |probe, values: Vec<u64>| {
///     probe.lap();
///     let total: u64 = values.iter().sum();
///     probe.lap();
///     total
/// });
///
/// let timed = traced.call(vec![1, 2, 3]);
/// for record in timed.trace() {
///     println!("{record}");
/// }
/// ```
#[derive(Clone, Debug)]
pub struct TraceRecord {
    function: Arc<str>,
    kind: CallKind,
    line: u32,
    took: Elapsed,
}

impl TraceRecord {
    pub(crate) fn new(function: Arc<str>, kind: CallKind, line: u32, took: Elapsed) -> Self {
        Self {
            function,
            kind,
            line,
            took,
        }
    }

    /// The name the traced callable was wrapped under.
    #[must_use]
    pub fn function(&self) -> &str {
        &self.function
    }

    /// Whether the traced callable was synchronous or asynchronous.
    #[must_use]
    pub fn kind(&self) -> CallKind {
        self.kind
    }

    /// Zero-based index of the statement within the traced body.
    #[must_use]
    pub fn line(&self) -> u32 {
        self.line
    }

    /// How long the statement took.
    #[must_use]
    pub fn took(&self) -> Elapsed {
        self.took
    }
}

impl fmt::Display for TraceRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "LINE: {}, TOOK: {}", self.line, self.took)
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use std::fmt::Debug;

    use static_assertions::assert_impl_all;

    use super::*;

    assert_impl_all!(TraceRecord: Clone, Debug, Send, Sync);

    #[test]
    fn display_names_the_line_and_span() {
        let record = TraceRecord::new(
            Arc::from("example"),
            CallKind::Sync,
            2,
            Elapsed::from_nanos(1_500_000_000),
        );

        assert_eq!(record.to_string(), "LINE: 2, TOOK: 1.5 s");
    }

    #[test]
    fn accessors_expose_the_parts() {
        let record = TraceRecord::new(
            Arc::from("example"),
            CallKind::Async,
            0,
            Elapsed::from_nanos(42),
        );

        assert_eq!(record.function(), "example");
        assert_eq!(record.kind(), CallKind::Async);
        assert_eq!(record.line(), 0);
        assert_eq!(record.took().as_nanos(), 42);
    }
}

/// Whether a wrapped callable is synchronous or asynchronous.
///
/// The kind is fixed when the wrapper is created and is carried into every
/// trace record and report produced by that wrapper, where it only affects
/// labeling.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
#[non_exhaustive]
pub enum CallKind {
    /// The wrapped callable runs to completion when invoked.
    Sync,

    /// The wrapped callable returns a future that is polled to completion.
    Async,
}

impl CallKind {
    /// The label used for this kind in rendered report headers.
    pub(crate) fn label(self) -> &'static str {
        match self {
            Self::Sync => "SYNC FN",
            Self::Async => "ASYNC FN",
        }
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;

    #[test]
    fn labels_distinguish_the_kinds() {
        assert_ne!(CallKind::Sync.label(), CallKind::Async.label());
    }
}

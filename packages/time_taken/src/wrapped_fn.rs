use std::fmt;

use crate::call_context::CallContext;
use crate::{CallKind, LineProbe, Timed};

/// The boxed form every synchronous target is adapted into.
///
/// Plain targets receive an adapter that ignores the probe; by-line targets
/// receive it as their first parameter.
pub(crate) type SyncTarget<Args, R> = Box<dyn FnMut(&LineProbe, Args) -> R>;

/// A synchronous callable wrapped for measurement.
///
/// Produced by [`TimeIt::func`][crate::TimeIt::func] and
/// [`TimeIt::by_line`][crate::TimeIt::by_line]. Each [`call`][Self::call]
/// times one invocation of the target and either prints the measurements or
/// returns them alongside the target's value, depending on how the parent
/// [`TimeIt`][crate::TimeIt] was configured.
///
/// # Examples
///
/// ```
/// use time_taken::TimeIt;
///
/// let timeit = TimeIt::new();
/// let mut wrapped = timeit.func("double", |x: u64| x * 2);
///
/// let timed = wrapped.call(21);
/// assert_eq!(*timed.value(), 42);
/// ```
pub struct WrappedFn<Args, R> {
    context: CallContext,
    target: SyncTarget<Args, R>,
}

impl<Args, R> WrappedFn<Args, R> {
    pub(crate) fn new(context: CallContext, target: SyncTarget<Args, R>) -> Self {
        Self { context, target }
    }

    /// The name the wrapper reports under.
    #[must_use]
    pub fn name(&self) -> &str {
        self.context.function()
    }

    /// Whether this wrapper measures a sync or async target.
    #[must_use]
    pub fn kind(&self) -> CallKind {
        self.context.kind()
    }

    /// Invokes the target once, measuring the invocation.
    ///
    /// The arguments are captured via their `Debug` form before the target
    /// runs, when argument reporting is enabled. Targets taking more than one
    /// argument receive them as a tuple.
    ///
    /// If the target panics, the panic propagates; the measurement is
    /// discarded and all resources held for it are released.
    pub fn call(&mut self, args: Args) -> Timed<R>
    where
        Args: fmt::Debug,
    {
        let snapshot = self.context.snapshot_args(&args);
        let probe = self.context.probe();

        let active = self.context.begin(snapshot);
        let value = (self.target)(&probe, args);
        active.finish(value)
    }
}

impl<Args, R> fmt::Debug for WrappedFn<Args, R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WrappedFn")
            .field("context", &self.context)
            .finish_non_exhaustive()
    }
}

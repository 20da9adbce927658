use std::fmt;

use futures::future::LocalBoxFuture;

use crate::call_context::CallContext;
use crate::{CallKind, LineProbe, Timed};

/// The boxed form every asynchronous target is adapted into.
///
/// The probe is passed by value because the returned future must own it for
/// as long as the target body runs.
pub(crate) type AsyncTarget<Args, R> =
    Box<dyn FnMut(LineProbe, Args) -> LocalBoxFuture<'static, R>>;

/// An asynchronous callable wrapped for measurement.
///
/// Produced by [`TimeIt::func_async`][crate::TimeIt::func_async] and
/// [`TimeIt::by_line_async`][crate::TimeIt::by_line_async]. Each
/// [`call`][Self::call] times one invocation of the target from the moment
/// the wrapper is called to the moment the target's future completes,
/// including any time spent suspended at await points.
///
/// # Examples
///
/// ```
/// use time_taken::TimeIt;
///
/// let timeit = TimeIt::new();
/// let mut wrapped = timeit.func_async("double", |x: u64| async move { x * 2 });
///
/// let timed = futures::executor::block_on(wrapped.call(21));
/// assert_eq!(*timed.value(), 42);
/// ```
pub struct WrappedAsyncFn<Args, R> {
    context: CallContext,
    target: AsyncTarget<Args, R>,
}

impl<Args, R> WrappedAsyncFn<Args, R> {
    pub(crate) fn new(context: CallContext, target: AsyncTarget<Args, R>) -> Self {
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

    /// Invokes the target once, measuring the invocation until its future
    /// completes.
    ///
    /// The measurement covers wall-clock suspension as well as execution, so
    /// a target that spends its time awaiting reports that time too (except
    /// under [`ClockKind::ProcessCpu`][crate::ClockKind::ProcessCpu], which
    /// by definition ignores suspension).
    ///
    /// If the returned future is dropped before completion, the measurement
    /// is discarded and all resources held for it are released.
    pub async fn call(&mut self, args: Args) -> Timed<R>
    where
        Args: fmt::Debug,
    {
        let snapshot = self.context.snapshot_args(&args);
        let probe = self.context.probe();

        let active = self.context.begin(snapshot);
        let value = (self.target)(probe, args).await;
        active.finish(value)
    }
}

impl<Args, R> fmt::Debug for WrappedAsyncFn<Args, R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WrappedAsyncFn")
            .field("context", &self.context)
            .finish_non_exhaustive()
    }
}

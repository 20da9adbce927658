use std::future::Future;
use std::sync::Arc;

use futures::FutureExt;

use crate::call_context::{CallContext, MeasureSettings};
use crate::pal::PlatformFacade;
use crate::{CallKind, ClockKind, LineProbe, TraceRegistry, WrappedAsyncFn, WrappedFn};

/// Wraps callables so that every invocation is timed.
///
/// A `TimeIt` carries the measurement configuration and hands out wrappers
/// for individual callables. Plain wrappers ([`func`](Self::func) and
/// [`func_async`](Self::func_async)) time the whole invocation; by-line
/// wrappers ([`by_line`](Self::by_line) and
/// [`by_line_async`](Self::by_line_async)) additionally time each statement
/// of the body via a [`LineProbe`].
///
/// In the default verbose mode every invocation prints a measurement block to
/// stdout and the wrapper returns only the target's value. In quiet mode
/// (`verbose(false)`) nothing is printed and the measurements ride back on
/// the returned [`Timed`](crate::Timed).
///
/// While an invocation is being measured, the process's resident memory is
/// held in place so that page reclamation does not distort the readings.
/// This is best-effort and can be turned off with `lock_memory(false)`.
///
/// This is a development tool for investigating where time goes; it is not
/// meant to be left enabled in production builds.
///
/// # Examples
///
/// Timing whole calls, printing a report per invocation:
///
/// ```
/// use time_taken::TimeIt;
///
/// let timeit = TimeIt::new();
/// let mut wrapped = timeit.func("sum", |n: u64| (0..n).sum::<u64>());
///
/// let total = wrapped.call(1000).into_value();
/// assert_eq!(total, 499_500);
/// ```
///
/// Collecting measurements instead of printing them:
///
/// ```
/// use time_taken::TimeIt;
///
/// let timeit = TimeIt::builder().verbose(false).build();
/// let mut wrapped = timeit.by_line("steps", |probe, ()| {
///     probe.lap();
///     let first = 2;
///     probe.lap();
///     let second = 3;
///     first * second
/// });
///
/// let (value, trace, summary) = wrapped.call(()).into_parts();
/// assert_eq!(value, 6);
/// assert_eq!(trace.len(), 2);
/// assert_eq!(summary.len(), 1);
/// ```
///
/// # Thread safety
///
/// `TimeIt` itself is thread-safe and clones share one trace registry. The
/// wrappers it creates hold the wrapped callable and are single-threaded
/// values; create one wrapper per thread when measuring from many threads.
#[derive(Clone, Debug)]
pub struct TimeIt {
    settings: MeasureSettings,
    registry: Arc<TraceRegistry>,
    platform: PlatformFacade,
}

impl TimeIt {
    /// Creates a `TimeIt` with the default configuration: verbose output,
    /// no argument capture, the [`Performance`](ClockKind::Performance)
    /// clock and memory holding enabled.
    #[must_use]
    pub fn new() -> Self {
        Self::builder().build()
    }

    /// Starts building a `TimeIt` with non-default configuration.
    pub fn builder() -> TimeItBuilder {
        TimeItBuilder::new()
    }

    /// Whether invocations print their measurements to stdout.
    #[must_use]
    pub fn verbose(&self) -> bool {
        self.settings.verbose
    }

    /// Whether arguments are captured into the measurement output.
    #[must_use]
    pub fn show_args(&self) -> bool {
        self.settings.show_args
    }

    /// The clock all wrappers created from this `TimeIt` measure with.
    #[must_use]
    pub fn clock(&self) -> ClockKind {
        self.settings.clock_kind
    }

    /// Whether resident memory is held in place during measurement.
    #[must_use]
    pub fn lock_memory(&self) -> bool {
        self.settings.lock_memory
    }

    /// The trace registry shared by every wrapper created from this
    /// `TimeIt` and its clones.
    #[must_use]
    pub fn registry(&self) -> &TraceRegistry {
        &self.registry
    }

    /// Wraps a synchronous callable, timing each invocation as a whole.
    ///
    /// Callables taking more than one argument receive them as a tuple;
    /// callables taking none receive `()`.
    ///
    /// # Examples
    ///
    /// ```
    /// use time_taken::TimeIt;
    ///
    /// let timeit = TimeIt::builder().verbose(false).build();
    /// let mut wrapped = timeit.func("add", |(a, b): (i32, i32)| a + b);
    ///
    /// assert_eq!(wrapped.call((2, 3)).into_value(), 5);
    /// ```
    pub fn func<Args, R, F>(&self, name: impl Into<String>, mut f: F) -> WrappedFn<Args, R>
    where
        Args: 'static,
        R: 'static,
        F: FnMut(Args) -> R + 'static,
    {
        let context = self.context(name.into(), CallKind::Sync, false);
        WrappedFn::new(context, Box::new(move |_probe, args| f(args)))
    }

    /// Wraps a synchronous callable, timing each invocation as a whole and
    /// each statement of its body individually.
    ///
    /// The callable receives a [`LineProbe`] as its first parameter and
    /// calls [`lap`](LineProbe::lap) immediately before each statement it
    /// wants timed. One lap per statement yields one record per statement.
    ///
    /// # Examples
    ///
    /// ```
    /// use time_taken::TimeIt;
    ///
    /// let timeit = TimeIt::builder().verbose(false).build();
    /// let mut wrapped = timeit.by_line("pipeline", |probe, input: u64| {
    ///     probe.lap();
    ///     let parsed = input.checked_mul(2).unwrap_or(u64::MAX);
    ///     probe.lap();
    ///     parsed.saturating_add(1)
    /// });
    ///
    /// let timed = wrapped.call(10);
    /// assert_eq!(*timed.value(), 21);
    /// assert_eq!(timed.trace().len(), 2);
    /// ```
    pub fn by_line<Args, R, F>(&self, name: impl Into<String>, f: F) -> WrappedFn<Args, R>
    where
        Args: 'static,
        R: 'static,
        F: FnMut(&LineProbe, Args) -> R + 'static,
    {
        let context = self.context(name.into(), CallKind::Sync, true);
        WrappedFn::new(context, Box::new(f))
    }

    /// Wraps an asynchronous callable, timing each invocation from call to
    /// future completion.
    ///
    /// Time spent suspended at await points counts toward the measurement,
    /// except under [`ClockKind::ProcessCpu`], which only advances while the
    /// process executes.
    ///
    /// # Examples
    ///
    /// ```
    /// use time_taken::TimeIt;
    ///
    /// let timeit = TimeIt::builder().verbose(false).build();
    /// let mut wrapped = timeit.func_async("fetch", |id: u32| async move {
    ///     format!("record-{id}")
    /// });
    ///
    /// let timed = futures::executor::block_on(wrapped.call(7));
    /// assert_eq!(timed.value(), "record-7");
    /// ```
    pub fn func_async<Args, R, Fut, F>(
        &self,
        name: impl Into<String>,
        mut f: F,
    ) -> WrappedAsyncFn<Args, R>
    where
        Args: 'static,
        R: 'static,
        Fut: Future<Output = R> + 'static,
        F: FnMut(Args) -> Fut + 'static,
    {
        let context = self.context(name.into(), CallKind::Async, false);
        WrappedAsyncFn::new(context, Box::new(move |_probe, args| f(args).boxed_local()))
    }

    /// Wraps an asynchronous callable, timing each invocation as a whole and
    /// each statement of its body individually.
    ///
    /// The callable receives an owned [`LineProbe`] so the returned future
    /// can carry it across await points.
    ///
    /// # Examples
    ///
    /// ```
    /// use time_taken::TimeIt;
    ///
    /// let timeit = TimeIt::builder().verbose(false).build();
    /// let mut wrapped = timeit.by_line_async("stages", |probe, ()| async move {
    ///     probe.lap();
    ///     let staged: i32 = 40;
    ///     probe.lap();
    ///     staged.saturating_add(2)
    /// });
    ///
    /// let timed = futures::executor::block_on(wrapped.call(()));
    /// assert_eq!(*timed.value(), 42);
    /// assert_eq!(timed.trace().len(), 2);
    /// ```
    pub fn by_line_async<Args, R, Fut, F>(
        &self,
        name: impl Into<String>,
        mut f: F,
    ) -> WrappedAsyncFn<Args, R>
    where
        Args: 'static,
        R: 'static,
        Fut: Future<Output = R> + 'static,
        F: FnMut(LineProbe, Args) -> Fut + 'static,
    {
        let context = self.context(name.into(), CallKind::Async, true);
        WrappedAsyncFn::new(
            context,
            Box::new(move |probe, args| f(probe, args).boxed_local()),
        )
    }

    fn context(&self, function: String, kind: CallKind, traced: bool) -> CallContext {
        CallContext::new(
            Arc::from(function),
            kind,
            traced,
            self.settings,
            Arc::clone(&self.registry),
            self.platform.clone(),
        )
    }
}

impl Default for TimeIt {
    fn default() -> Self {
        Self::new()
    }
}

/// Builder for creating a [`TimeIt`] with non-default configuration.
///
/// All settings are optional; [`build`](Self::build) always succeeds.
///
/// # Examples
///
/// ```
/// use time_taken::{ClockKind, TimeIt};
///
/// let timeit = TimeIt::builder()
///     .verbose(false)
///     .show_args(true)
///     .clock(ClockKind::ProcessCpu)
///     .lock_memory(false)
///     .build();
///
/// assert!(!timeit.verbose());
/// assert_eq!(timeit.clock(), ClockKind::ProcessCpu);
/// ```
#[derive(Clone, Debug)]
#[must_use]
pub struct TimeItBuilder {
    settings: MeasureSettings,
    platform: PlatformFacade,
}

impl TimeItBuilder {
    pub(crate) fn new() -> Self {
        Self {
            settings: MeasureSettings {
                verbose: true,
                show_args: false,
                clock_kind: ClockKind::Performance,
                lock_memory: true,
            },
            platform: PlatformFacade::real(),
        }
    }

    /// Sets whether invocations print their measurements to stdout.
    ///
    /// When disabled, the measurements are returned on the
    /// [`Timed`](crate::Timed) instead.
    pub fn verbose(mut self, verbose: bool) -> Self {
        self.settings.verbose = verbose;
        self
    }

    /// Sets whether the arguments of each invocation are captured via their
    /// `Debug` form and included in the measurement output.
    pub fn show_args(mut self, show_args: bool) -> Self {
        self.settings.show_args = show_args;
        self
    }

    /// Sets the clock used for all measurements.
    pub fn clock(mut self, clock: ClockKind) -> Self {
        self.settings.clock_kind = clock;
        self
    }

    /// Sets whether resident memory is held in place for the duration of
    /// each measured invocation.
    pub fn lock_memory(mut self, lock_memory: bool) -> Self {
        self.settings.lock_memory = lock_memory;
        self
    }

    /// Uses a specific platform instead of the real operating system
    /// facilities, letting tests control every clock reading.
    #[cfg(test)]
    pub(crate) fn platform(mut self, platform: PlatformFacade) -> Self {
        self.platform = platform;
        self
    }

    /// Builds the configured [`TimeIt`].
    #[must_use]
    pub fn build(self) -> TimeIt {
        TimeIt {
            settings: self.settings,
            registry: Arc::new(TraceRegistry::new()),
            platform: self.platform,
        }
    }
}

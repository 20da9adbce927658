//! Shared measurement plumbing behind the wrapper types.
//!
//! Both wrapper flavors, sync and async, funnel every invocation through the
//! same prologue and epilogue here so that tracing, timing, argument capture
//! and reporting behave identically regardless of how the target runs.

use std::fmt;
use std::sync::Arc;

use crate::pal::PlatformFacade;
use crate::trace_registry::TraceGuard;
use crate::{CallKind, ClockKind, LineProbe, Report, Separator, Timed, Timer, TraceRegistry};

/// Separators used when printing a traced invocation.
const BY_LINE_SEPARATORS: &[Separator] = &[Separator::Mid, Separator::Bottom];

/// Separators used when printing a whole-call invocation.
const WHOLE_CALL_SEPARATORS: &[Separator] = &[Separator::Top, Separator::Bottom];

/// The measurement knobs a wrapper inherits from its `TimeIt`.
#[derive(Clone, Copy, Debug)]
pub(crate) struct MeasureSettings {
    pub(crate) verbose: bool,
    pub(crate) show_args: bool,
    pub(crate) clock_kind: ClockKind,
    pub(crate) lock_memory: bool,
}

/// Per-wrapper measurement configuration, fixed at wrap time.
#[derive(Clone, Debug)]
pub(crate) struct CallContext {
    function: Arc<str>,
    kind: CallKind,
    traced: bool,
    settings: MeasureSettings,
    registry: Arc<TraceRegistry>,
    platform: PlatformFacade,
}

impl CallContext {
    pub(crate) fn new(
        function: Arc<str>,
        kind: CallKind,
        traced: bool,
        settings: MeasureSettings,
        registry: Arc<TraceRegistry>,
        platform: PlatformFacade,
    ) -> Self {
        Self {
            function,
            kind,
            traced,
            settings,
            registry,
            platform,
        }
    }

    pub(crate) fn function(&self) -> &str {
        &self.function
    }

    pub(crate) fn kind(&self) -> CallKind {
        self.kind
    }

    /// The probe handed to the target body.
    ///
    /// Probes route by name, so a probe created for an untraced invocation
    /// laps into nothing and costs almost nothing.
    pub(crate) fn probe(&self) -> LineProbe {
        LineProbe::new(Arc::clone(&self.registry), Arc::clone(&self.function))
    }

    /// Captures the argument snapshot, when configured to.
    ///
    /// Taken before the target is invoked so the snapshot reflects the
    /// arguments as passed, not as consumed.
    pub(crate) fn snapshot_args<Args>(&self, args: &Args) -> Option<String>
    where
        Args: fmt::Debug,
    {
        self.settings.show_args.then(|| format!("{args:?}"))
    }

    /// The prologue: registers the trace session (for traced wrappers) and
    /// starts the call timer, in that order, so the timer is running before
    /// the first statement boundary can possibly arrive.
    pub(crate) fn begin(&self, args: Option<String>) -> ActiveCall {
        let guard = self.traced.then(|| {
            // The session stopwatch never takes the memory hold; the call
            // timer below owns it for the whole extent of the invocation.
            let stopwatch =
                Timer::with_platform(self.settings.clock_kind, false, self.platform.clone());
            self.registry
                .begin(Arc::clone(&self.function), self.kind, stopwatch)
        });

        let mut timer = Timer::with_platform(
            self.settings.clock_kind,
            self.settings.lock_memory,
            self.platform.clone(),
        );
        timer.start();

        ActiveCall {
            function: Arc::clone(&self.function),
            kind: self.kind,
            traced: self.traced,
            verbose: self.settings.verbose,
            guard,
            timer,
            args,
        }
    }
}

/// One invocation in flight.
///
/// Holds the live trace registration and the running call timer. If the
/// target panics or its future is dropped, dropping this value deregisters
/// the session and releases the memory hold; only the epilogue in
/// [`finish`](ActiveCall::finish) produces measurement output.
#[derive(Debug)]
pub(crate) struct ActiveCall {
    function: Arc<str>,
    kind: CallKind,
    traced: bool,
    verbose: bool,
    guard: Option<TraceGuard>,
    timer: Timer,
    args: Option<String>,
}

impl ActiveCall {
    /// The epilogue: stops the timer, closes the trace session and either
    /// prints the report or hands its contents back to the caller.
    pub(crate) fn finish<R>(self, value: R) -> Timed<R> {
        let Self {
            function,
            kind,
            traced,
            verbose,
            guard,
            mut timer,
            args,
        } = self;

        timer.stop();

        let records = guard.map_or_else(Vec::new, TraceGuard::finish);
        let total = timer.elapsed().expect(
            "the call timer was started when the invocation began and has just been stopped",
        );

        let report = Report::new(function, kind, records, total, args);

        if verbose {
            let separators = if traced {
                BY_LINE_SEPARATORS
            } else {
                WHOLE_CALL_SEPARATORS
            };
            report.print_to_stdout(separators);

            Timed::new(value, Vec::new(), Vec::new())
        } else {
            let summary = report.summary_lines();
            Timed::new(value, report.into_trace(), summary)
        }
    }
}

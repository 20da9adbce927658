use std::collections::HashMap;
use std::mem;
use std::sync::{Arc, Mutex};

use crate::{CallKind, ERR_POISONED_LOCK, Timer, TraceRecord};

/// Routes statement boundaries to the traced calls that should record them.
///
/// Every [`TimeIt`](crate::TimeIt) owns one registry, shared by all wrappers
/// it creates. A traced invocation registers itself under its function name
/// when it begins and removes itself when it ends, on every exit path. While
/// registered, each boundary marked under that name is attributed to the most
/// recently registered invocation of the name.
///
/// Nested and sequential invocations are therefore well-defined, including
/// recursion: every invocation removes exactly the registration it added.
/// Two invocations of the *same name* that are live at the same time (for
/// example two interleaved futures built from one wrapper) share attribution:
/// the later registration receives both bodies' boundaries until it closes.
/// Use distinct names for callables that may interleave.
#[derive(Debug)]
pub struct TraceRegistry {
    sessions: Mutex<HashMap<Arc<str>, Vec<Arc<Mutex<TraceSession>>>>>,
}

impl TraceRegistry {
    /// Creates a registry with no active sessions.
    #[must_use]
    pub fn new() -> Self {
        Self {
            sessions: Mutex::new(HashMap::new()),
        }
    }

    /// Number of traced invocations currently registered.
    #[must_use]
    pub fn active_sessions(&self) -> usize {
        self.sessions
            .lock()
            .expect(ERR_POISONED_LOCK)
            .values()
            .map(Vec::len)
            .sum()
    }

    /// Registers a traced invocation and returns the guard that owns its
    /// registration.
    pub(crate) fn begin(
        self: &Arc<Self>,
        function: Arc<str>,
        kind: CallKind,
        timer: Timer,
    ) -> TraceGuard {
        let session = Arc::new(Mutex::new(TraceSession::new(
            Arc::clone(&function),
            kind,
            timer,
        )));

        self.sessions
            .lock()
            .expect(ERR_POISONED_LOCK)
            .entry(Arc::clone(&function))
            .or_default()
            .push(Arc::clone(&session));

        TraceGuard {
            registry: Arc::clone(self),
            function,
            session,
            completed: false,
        }
    }

    /// Delivers a statement boundary to the most recent live session under
    /// the given name, if any.
    pub(crate) fn boundary(&self, function: &str) {
        let session = {
            let sessions = self.sessions.lock().expect(ERR_POISONED_LOCK);
            sessions
                .get(function)
                .and_then(|stack| stack.last())
                .map(Arc::clone)
        };

        // The session lock is taken outside the map lock so a slow record
        // append never blocks unrelated registrations.
        if let Some(session) = session {
            session.lock().expect(ERR_POISONED_LOCK).on_boundary();
        }
    }

    /// Removes one specific registration, wherever it sits in the name's
    /// stack.
    fn remove(&self, function: &str, session: &Arc<Mutex<TraceSession>>) {
        let mut sessions = self.sessions.lock().expect(ERR_POISONED_LOCK);

        if let Some(stack) = sessions.get_mut(function) {
            if let Some(position) = stack.iter().rposition(|s| Arc::ptr_eq(s, session)) {
                drop(stack.remove(position));
            }

            if stack.is_empty() {
                sessions.remove(function);
            }
        }
    }
}

impl Default for TraceRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// Accumulates the statement records of one traced invocation.
#[derive(Debug)]
pub(crate) struct TraceSession {
    function: Arc<str>,
    kind: CallKind,
    timer: Timer,
    records: Vec<TraceRecord>,
    boundaries: u32,
}

impl TraceSession {
    fn new(function: Arc<str>, kind: CallKind, timer: Timer) -> Self {
        Self {
            function,
            kind,
            timer,
            records: Vec::new(),
            boundaries: 0,
        }
    }

    /// A statement boundary was reached.
    ///
    /// The first boundary only starts the stopwatch; each later boundary
    /// records the statement that just finished and restarts the stopwatch.
    fn on_boundary(&mut self) {
        if self.boundaries == 0 {
            self.timer.start();
        } else {
            self.record_interval();
            self.timer.start();
        }

        self.boundaries = self
            .boundaries
            .checked_add(1)
            .expect("statement boundary count overflow - this indicates an unrealistic scenario");
    }

    /// The body returned normally; the interval since the last boundary
    /// belongs to the final statement.
    fn close(&mut self) -> Vec<TraceRecord> {
        if self.boundaries > 0 {
            self.record_interval();
        }

        mem::take(&mut self.records)
    }

    fn record_interval(&mut self) {
        self.timer.stop();

        let took = self
            .timer
            .elapsed()
            .expect("the stopwatch was started at the previous boundary and has just been stopped");
        let line = self
            .boundaries
            .checked_sub(1)
            .expect("an interval is only recorded after at least one boundary");

        self.records
            .push(TraceRecord::new(Arc::clone(&self.function), self.kind, line, took));
    }
}

/// Owns one registration in the registry.
///
/// Dropping the guard removes the registration on every exit path. Only an
/// explicit [`finish`](TraceGuard::finish) call treats the invocation as
/// orderly and yields its records; a guard dropped any other way discards the
/// partial records of the abandoned call.
#[derive(Debug)]
pub(crate) struct TraceGuard {
    registry: Arc<TraceRegistry>,
    function: Arc<str>,
    session: Arc<Mutex<TraceSession>>,
    completed: bool,
}

impl TraceGuard {
    /// The invocation completed normally; deregister and yield its records.
    pub(crate) fn finish(mut self) -> Vec<TraceRecord> {
        self.completed = true;

        let records = self.session.lock().expect(ERR_POISONED_LOCK).close();
        self.registry.remove(&self.function, &self.session);

        records
    }
}

impl Drop for TraceGuard {
    fn drop(&mut self) {
        if !self.completed {
            self.registry.remove(&self.function, &self.session);
        }
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use std::fmt::Debug;
    use std::time::Duration;

    use static_assertions::assert_impl_all;

    use super::*;
    use crate::ClockKind;
    use crate::pal::{FakePlatform, PlatformFacade};

    assert_impl_all!(TraceRegistry: Debug, Send, Sync);

    fn fake_setup() -> (Arc<TraceRegistry>, FakePlatform) {
        (Arc::new(TraceRegistry::new()), FakePlatform::new())
    }

    fn fake_timer(fake: &FakePlatform) -> Timer {
        Timer::with_platform(
            ClockKind::Performance,
            false,
            PlatformFacade::fake(fake.clone()),
        )
    }

    #[test]
    fn no_laps_yields_no_records() {
        let (registry, fake) = fake_setup();

        let guard = registry.begin(Arc::from("empty"), CallKind::Sync, fake_timer(&fake));
        let records = guard.finish();

        assert!(records.is_empty());
        assert_eq!(registry.active_sessions(), 0);
    }

    #[test]
    fn one_lap_per_statement_yields_one_record_per_statement() {
        let (registry, fake) = fake_setup();

        let guard = registry.begin(Arc::from("three"), CallKind::Sync, fake_timer(&fake));

        // Three statements, each preceded by a lap and taking a known time.
        registry.boundary("three");
        fake.advance(Duration::from_millis(10));
        registry.boundary("three");
        fake.advance(Duration::from_millis(20));
        registry.boundary("three");
        fake.advance(Duration::from_millis(30));

        let records = guard.finish();

        assert_eq!(records.len(), 3);

        let lines: Vec<u32> = records.iter().map(TraceRecord::line).collect();
        assert_eq!(lines, vec![0, 1, 2]);

        let nanos: Vec<u128> = records.iter().map(|r| r.took().as_nanos()).collect();
        assert_eq!(nanos, vec![10_000_000, 20_000_000, 30_000_000]);

        assert!(records.iter().all(|r| r.function() == "three"));
        assert!(records.iter().all(|r| r.kind() == CallKind::Sync));
    }

    #[test]
    fn boundaries_for_other_names_are_ignored() {
        let (registry, fake) = fake_setup();

        let guard = registry.begin(Arc::from("outer"), CallKind::Sync, fake_timer(&fake));

        registry.boundary("outer");
        fake.advance(Duration::from_millis(5));

        // A differently named callable marking boundaries does not pollute
        // this session.
        registry.boundary("inner");
        registry.boundary("inner");

        let records = guard.finish();
        assert_eq!(records.len(), 1);
        assert_eq!(records.first().map(TraceRecord::line), Some(0));
    }

    #[test]
    fn nested_sessions_under_different_names_stay_separate() {
        let (registry, fake) = fake_setup();

        let outer = registry.begin(Arc::from("outer"), CallKind::Sync, fake_timer(&fake));
        registry.boundary("outer");
        fake.advance(Duration::from_millis(10));

        let inner = registry.begin(Arc::from("inner"), CallKind::Sync, fake_timer(&fake));
        registry.boundary("inner");
        fake.advance(Duration::from_millis(20));
        let inner_records = inner.finish();

        registry.boundary("outer");
        fake.advance(Duration::from_millis(5));
        let outer_records = outer.finish();

        assert_eq!(inner_records.len(), 1);
        assert_eq!(
            inner_records.first().map(|r| r.took().as_nanos()),
            Some(20_000_000)
        );

        // The outer session's first statement spans its own work plus the
        // whole nested call; the nested laps themselves did not leak in.
        assert_eq!(outer_records.len(), 2);
        assert_eq!(
            outer_records.first().map(|r| r.took().as_nanos()),
            Some(30_000_000)
        );
        assert_eq!(
            outer_records.last().map(|r| r.took().as_nanos()),
            Some(5_000_000)
        );
    }

    #[test]
    fn same_name_registrations_stack() {
        let (registry, fake) = fake_setup();

        let first = registry.begin(Arc::from("same"), CallKind::Sync, fake_timer(&fake));
        let second = registry.begin(Arc::from("same"), CallKind::Sync, fake_timer(&fake));

        // Boundaries go to the most recent registration.
        registry.boundary("same");
        fake.advance(Duration::from_millis(40));

        let second_records = second.finish();
        assert_eq!(second_records.len(), 1);

        // With the inner registration gone, the name routes to the first
        // again.
        registry.boundary("same");
        fake.advance(Duration::from_millis(15));

        let first_records = first.finish();
        assert_eq!(first_records.len(), 1);
        assert_eq!(
            first_records.first().map(|r| r.took().as_nanos()),
            Some(15_000_000)
        );

        assert_eq!(registry.active_sessions(), 0);
    }

    #[test]
    fn removal_is_by_identity_not_position() {
        let (registry, fake) = fake_setup();

        let first = registry.begin(Arc::from("same"), CallKind::Sync, fake_timer(&fake));
        let second = registry.begin(Arc::from("same"), CallKind::Sync, fake_timer(&fake));

        // The older registration leaves first; the newer one must keep
        // receiving boundaries.
        drop(first);

        registry.boundary("same");
        fake.advance(Duration::from_millis(25));

        let records = second.finish();
        assert_eq!(records.len(), 1);
        assert_eq!(registry.active_sessions(), 0);
    }

    #[test]
    fn abandoned_guard_discards_partial_records() {
        let (registry, fake) = fake_setup();

        let guard = registry.begin(Arc::from("doomed"), CallKind::Sync, fake_timer(&fake));
        registry.boundary("doomed");
        fake.advance(Duration::from_millis(10));
        registry.boundary("doomed");

        drop(guard);

        assert_eq!(registry.active_sessions(), 0);

        // Laps after abandonment hit nothing.
        registry.boundary("doomed");
    }
}

use std::fmt;
use std::sync::Arc;

use colored::Colorize;

use crate::{CallKind, Elapsed, TraceRecord};

/// Width of the rendered console block, in columns.
const WIDTH: usize = 78;

/// Everything measured about one wrapped invocation.
///
/// A report is assembled after the wrapped callable returns and either
/// rendered to the console (verbose wrappers) or handed back to the caller
/// inside a [`Timed`](crate::Timed) value. Styling is applied only while
/// rendering; the data accessors and [`summary_lines`](Report::summary_lines)
/// always return plain text.
///
/// # Examples
///
/// ```
/// use time_taken::{Report, Separator};
///
/// # fn demo(report: &Report) {
/// // Render with a rule above and below the block.
/// let block = report.render(&[Separator::Top, Separator::Bottom]);
/// println!("{block}");
/// # }
/// ```
#[derive(Clone, Debug)]
pub struct Report {
    function: Arc<str>,
    kind: CallKind,
    trace: Vec<TraceRecord>,
    total: Elapsed,
    args: Option<String>,
}

impl Report {
    pub(crate) fn new(
        function: Arc<str>,
        kind: CallKind,
        trace: Vec<TraceRecord>,
        total: Elapsed,
        args: Option<String>,
    ) -> Self {
        Self {
            function,
            kind,
            trace,
            total,
            args,
        }
    }

    /// The name the callable was wrapped under.
    #[must_use]
    pub fn function(&self) -> &str {
        &self.function
    }

    /// Whether the callable was synchronous or asynchronous.
    #[must_use]
    pub fn kind(&self) -> CallKind {
        self.kind
    }

    /// The statement records captured during the invocation, in execution
    /// order. Empty for whole-call wrappers.
    #[must_use]
    pub fn trace(&self) -> &[TraceRecord] {
        &self.trace
    }

    /// The span of the whole invocation.
    #[must_use]
    pub fn total(&self) -> Elapsed {
        self.total
    }

    /// The argument snapshot, when the wrapper was configured to capture one.
    #[must_use]
    pub fn args(&self) -> Option<&str> {
        self.args.as_deref()
    }

    /// The totals of the report as plain text lines, one per fact.
    ///
    /// This is the unstyled form of the lines below the rule in the rendered
    /// block: the argument snapshot (when captured) followed by the total.
    #[must_use]
    pub fn summary_lines(&self) -> Vec<String> {
        let mut lines = Vec::new();

        if let Some(args) = &self.args {
            lines.push(format!("ARGS: {args}"));
        }
        lines.push(format!("TOOK: {}", self.total));

        lines
    }

    /// Renders the report as a styled console block.
    ///
    /// The block always contains the header and the summary; statement
    /// records appear between them when the invocation was traced. The
    /// requested separators add a heavy rule above ([`Separator::Top`]),
    /// a heavy rule below ([`Separator::Bottom`]) and a light rule between
    /// the records and the summary ([`Separator::Mid`]).
    #[must_use]
    pub fn render(&self, separators: &[Separator]) -> String {
        let mut lines = Vec::new();

        if wants(separators, Separator::Top) {
            lines.push(heavy_rule());
        }

        let title = format!(" [ {}: {} ] ", self.kind.label(), self.function);
        lines.push(format!("{title:━^WIDTH$}").bold().to_string());

        for record in &self.trace {
            let styled = record.to_string().cyan();
            lines.push(format!(" {styled}"));
        }

        if wants(separators, Separator::Mid) {
            lines.push(light_rule());
        }

        if let Some(args) = &self.args {
            let styled = format!("ARGS: {args}").dimmed();
            lines.push(format!(" {styled}"));
        }

        let styled_total = format!("TOOK: {}", self.total).green().bold();
        lines.push(format!(" {styled_total}"));

        if wants(separators, Separator::Bottom) {
            lines.push(heavy_rule());
        }

        lines.join("\n")
    }

    /// Renders the report and prints it to stdout.
    #[cfg_attr(test, mutants::skip)] // Too difficult to test stdout output reliably - manually tested.
    pub fn print_to_stdout(&self, separators: &[Separator]) {
        println!("{}", self.render(separators));
    }

    pub(crate) fn into_trace(self) -> Vec<TraceRecord> {
        self.trace
    }
}

impl fmt::Display for Report {
    /// Renders the block with every separator enabled.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render(&[Separator::All]))
    }
}

/// Selects which rules frame a rendered report block.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
#[non_exhaustive]
pub enum Separator {
    /// A heavy rule above the block.
    Top,

    /// A light rule between the statement records and the summary.
    Mid,

    /// A heavy rule below the block.
    Bottom,

    /// All of the above.
    All,
}

fn wants(separators: &[Separator], which: Separator) -> bool {
    separators
        .iter()
        .any(|s| *s == which || *s == Separator::All)
}

fn heavy_rule() -> String {
    "\u{2501}".repeat(WIDTH)
}

fn light_rule() -> String {
    "\u{2500}".repeat(WIDTH).dimmed().to_string()
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use std::fmt::Debug;

    use static_assertions::assert_impl_all;

    use super::*;

    assert_impl_all!(Report: Clone, Debug, Send, Sync);

    fn sample_report(args: Option<String>) -> Report {
        let function: Arc<str> = Arc::from("sample");
        let trace = vec![
            TraceRecord::new(
                Arc::clone(&function),
                CallKind::Sync,
                0,
                Elapsed::from_nanos(2_000_000),
            ),
            TraceRecord::new(
                Arc::clone(&function),
                CallKind::Sync,
                1,
                Elapsed::from_nanos(3_000_000),
            ),
        ];

        Report::new(
            function,
            CallKind::Sync,
            trace,
            Elapsed::from_nanos(5_500_000),
            args,
        )
    }

    #[test]
    fn summary_lines_are_plain_text() {
        let report = sample_report(Some("(22,)".to_string()));

        let lines = report.summary_lines();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines.first().map(String::as_str), Some("ARGS: (22,)"));
        assert_eq!(lines.last().map(String::as_str), Some("TOOK: 5.5 ms"));
    }

    #[test]
    fn summary_omits_args_when_not_captured() {
        let report = sample_report(None);

        let lines = report.summary_lines();
        assert_eq!(lines.len(), 1);
        assert_eq!(lines.first().map(String::as_str), Some("TOOK: 5.5 ms"));
    }

    #[test]
    fn render_contains_header_records_and_total() {
        colored::control::set_override(false);

        let report = sample_report(Some("(22,)".to_string()));
        let block = report.render(&[Separator::All]);

        assert!(block.contains("[ SYNC FN: sample ]"));
        assert!(block.contains("LINE: 0, TOOK: 2 ms"));
        assert!(block.contains("LINE: 1, TOOK: 3 ms"));
        assert!(block.contains("ARGS: (22,)"));
        assert!(block.contains("TOOK: 5.5 ms"));
    }

    #[test]
    fn separators_are_opt_in() {
        colored::control::set_override(false);

        // Title, two records, total; rules only when asked for.
        let report = sample_report(None);

        let bare = report.render(&[]);
        assert_eq!(bare.lines().count(), 4);

        let framed = report.render(&[Separator::Top, Separator::Bottom]);
        assert_eq!(framed.lines().count(), 6);
        let full_rules = framed.lines().filter(|l| *l == heavy_rule()).count();
        assert_eq!(full_rules, 2);

        let with_mid = report.render(&[Separator::Mid]);
        assert_eq!(with_mid.lines().count(), 5);
        assert!(with_mid.contains('\u{2500}'));

        let all = report.render(&[Separator::All]);
        assert_eq!(all.lines().count(), 7);
    }
}

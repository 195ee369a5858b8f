//! Pass/fail recording.
//!
//! A [`Report`] collects the outcome of one test (one check applied to one
//! vector type). Failed checks never stop a sweep; they are counted and the
//! first few labels are kept for diagnostics. A [`SuiteReport`] aggregates
//! reports into an overall verdict.

use std::fmt::Write as _;

use serde::Serialize;
use tracing::warn;

use crate::error::VerifyError;

/// Failure labels kept per report unless configured otherwise.
pub const DEFAULT_MAX_FAILURES: usize = 64;

/// Outcome of a single test.
#[derive(Debug, Clone, Serialize)]
pub struct Report {
    pub name: String,
    /// Checks evaluated.
    pub checks: u64,
    /// Checks that did not hold.
    pub failed: u64,
    /// Labels of the first failed checks.
    pub failures: Vec<String>,
    /// Labelled pass annotations.
    pub passes: Vec<String>,
    /// Infrastructure error that ended the test early.
    pub error: Option<String>,
    #[serde(skip)]
    max_failures: usize,
}

impl Report {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            checks: 0,
            failed: 0,
            failures: Vec::new(),
            passes: Vec::new(),
            error: None,
            max_failures: DEFAULT_MAX_FAILURES,
        }
    }

    #[must_use]
    pub fn with_max_failures(mut self, max: usize) -> Self {
        self.max_failures = max;
        self
    }

    /// Record a check. `label` is only evaluated when `ok` is false.
    pub fn check(&mut self, ok: bool, label: impl FnOnce() -> String) -> bool {
        self.checks += 1;
        if !ok {
            self.failed += 1;
            if self.failures.len() < self.max_failures {
                let label = label();
                warn!(test = %self.name, "{label}");
                self.failures.push(label);
            }
        }
        ok
    }

    /// Annotate a successfully completed step.
    pub fn pass(&mut self, label: impl Into<String>) {
        self.passes.push(label.into());
    }

    /// Record an error that prevented the test from completing.
    pub fn abort(&mut self, err: &VerifyError) {
        warn!(test = %self.name, "aborted: {err}");
        self.error = Some(err.to_string());
    }

    pub fn is_success(&self) -> bool {
        self.failed == 0 && self.error.is_none()
    }
}

/// All reports of one suite run, in execution order.
#[derive(Debug, Clone, Default, Serialize)]
pub struct SuiteReport {
    pub reports: Vec<Report>,
}

impl SuiteReport {
    pub fn push(&mut self, report: Report) {
        self.reports.push(report);
    }

    pub fn passed(&self) -> usize {
        self.reports.iter().filter(|r| r.is_success()).count()
    }

    pub fn failed(&self) -> usize {
        self.reports.len() - self.passed()
    }

    pub fn total_checks(&self) -> u64 {
        self.reports.iter().map(|r| r.checks).sum()
    }

    pub fn is_success(&self) -> bool {
        self.reports.iter().all(Report::is_success)
    }
}

/// Render a suite report as plain text, one line per test followed by its
/// pass annotations and failure labels.
pub fn format_text(suite: &SuiteReport) -> String {
    let mut out = String::new();
    for r in &suite.reports {
        let status = if r.is_success() { "PASS" } else { "FAIL" };
        let _ = writeln!(out, " {status}: {} ({} checks)", r.name, r.checks);
        for p in &r.passes {
            let _ = writeln!(out, "        {p}");
        }
        if let Some(ref e) = r.error {
            let _ = writeln!(out, "        error: {e}");
        }
        for f in &r.failures {
            let _ = writeln!(out, "        FAIL {f}");
        }
        let hidden = r.failed.saturating_sub(r.failures.len() as u64);
        if hidden > 0 {
            let _ = writeln!(out, "        ... {hidden} more failure(s)");
        }
    }
    let _ = writeln!(
        out,
        "\n{} passed, {} failed, {} checks",
        suite.passed(),
        suite.failed(),
        suite.total_checks()
    );
    out
}

//! Reporting: console feedback, per-case side artifacts, run summary
//!
//! ## Reporter Trait
//!
//! Console output goes through a `Reporter` so the orchestrator never touches
//! process-wide console state. The default `ConsoleReporter` writes to any
//! injected sink; alternate formats (JSON lines, TAP) are an impl away.
//!
//! ## Side Artifacts
//!
//! FAIL cases leave `<case>.diff`, ERROR cases `<case>.error`, both under the
//! report directory as they happen, so an interrupted run still has partial
//! reports on disk. Artifacts never feed back into the aggregate outcome.

use std::fs;
use std::io::{self, Write};
use std::path::Path;

use serde::Serialize;

use crate::runner::{ErrorReport, FailReport, Verdict};

/// Filename of the aggregate summary document within the report directory.
pub const SUMMARY_FILE: &str = "summary.json";

// ============================================================================
// Reporter Trait
// ============================================================================

/// Receives run progress as it happens.
pub trait Reporter {
    /// Called once after case discovery, before any case runs.
    fn on_discovery_complete(&mut self, _case_count: usize) {}

    /// Called immediately after each case completes.
    fn on_case_complete(&mut self, name: &str, verdict: &Verdict);

    /// Called once after the summary has been persisted.
    fn on_run_complete(&mut self, summary: &RunSummary);
}

/// Default console reporter: one status line per case, full detail for FAIL
/// and ERROR, one aggregate line at the end.
pub struct ConsoleReporter<W: Write> {
    out: W,
    verbose: bool,
}

impl<W: Write> ConsoleReporter<W> {
    pub fn new(out: W, verbose: bool) -> Self {
        Self { out, verbose }
    }

    fn write_case(&mut self, name: &str, verdict: &Verdict) -> io::Result<()> {
        match verdict {
            Verdict::Pass => writeln!(self.out, "[PASS] {name}"),
            Verdict::Fail(fail) => {
                writeln!(self.out, "[FAIL] {name}")?;
                writeln!(self.out, "  --- expected ---")?;
                writeln!(self.out, "{}", fail.expected)?;
                writeln!(self.out, "  --- actual ---")?;
                writeln!(self.out, "{}", fail.actual)?;
                writeln!(
                    self.out,
                    "  exit: expected {}, actual {}",
                    fail.expected_exit, fail.actual_exit
                )
            }
            Verdict::Error(error) => {
                writeln!(self.out, "[ERROR] {name}: {}", error.reason)?;
                if self.verbose && !error.stdout.is_empty() {
                    writeln!(self.out, "  --- stdout ---")?;
                    writeln!(self.out, "{}", error.stdout)?;
                }
                if self.verbose && !error.stderr.is_empty() {
                    writeln!(self.out, "  --- stderr ---")?;
                    writeln!(self.out, "{}", error.stderr)?;
                }
                Ok(())
            }
        }
    }
}

impl<W: Write> Reporter for ConsoleReporter<W> {
    fn on_case_complete(&mut self, name: &str, verdict: &Verdict) {
        // A broken console sink must not flip verdicts.
        if let Err(e) = self.write_case(name, verdict) {
            tracing::warn!("console write failed: {e}");
        }
    }

    fn on_run_complete(&mut self, summary: &RunSummary) {
        let _ = writeln!(
            self.out,
            "\n[golden] total={} passed={} failed={} errored={}",
            summary.total, summary.passed, summary.failed, summary.errored
        );
        let _ = self.out.flush();
    }
}

// ============================================================================
// Run Summary
// ============================================================================

/// One case's verdict in the summary document.
#[derive(Debug, Serialize)]
pub struct CaseRecord {
    pub name: String,
    #[serde(flatten)]
    pub verdict: Verdict,
}

/// Aggregate record of one full run, persisted as JSON once all cases ran.
#[derive(Debug, Serialize)]
pub struct RunSummary {
    pub total: usize,
    pub passed: usize,
    pub failed: usize,
    pub errored: usize,
    pub results: Vec<CaseRecord>,
}

impl RunSummary {
    pub fn new() -> Self {
        Self {
            total: 0,
            passed: 0,
            failed: 0,
            errored: 0,
            results: Vec::new(),
        }
    }

    /// Append a record, keeping the tallies in step.
    pub fn push(&mut self, record: CaseRecord) {
        self.total += 1;
        match record.verdict {
            Verdict::Pass => self.passed += 1,
            Verdict::Fail(_) => self.failed += 1,
            Verdict::Error(_) => self.errored += 1,
        }
        self.results.push(record);
    }

    /// The run succeeds iff nothing failed and nothing errored.
    pub fn all_passed(&self) -> bool {
        self.failed == 0 && self.errored == 0
    }
}

impl Default for RunSummary {
    fn default() -> Self {
        Self::new()
    }
}

/// Serialize and persist the summary, replacing any prior run's document.
///
/// The document is built fully in memory and moved into place with a rename,
/// so an interrupted run never leaves a truncated summary behind.
pub fn write_summary(report_dir: &Path, summary: &RunSummary) -> io::Result<()> {
    let json = serde_json::to_string_pretty(summary).map_err(io::Error::other)?;
    let staging = report_dir.join(format!("{SUMMARY_FILE}.tmp"));
    fs::write(&staging, json)?;
    fs::rename(&staging, report_dir.join(SUMMARY_FILE))
}

// ============================================================================
// Side Artifacts
// ============================================================================

/// Write the FAIL/ERROR side artifact for one case, if the verdict has one.
pub fn emit_case_artifact(report_dir: &Path, name: &str, verdict: &Verdict) {
    let result = match verdict {
        Verdict::Pass => return,
        Verdict::Fail(fail) => {
            fs::write(report_dir.join(format!("{name}.diff")), render_fail(fail))
        }
        Verdict::Error(error) => {
            fs::write(report_dir.join(format!("{name}.error")), render_error(error))
        }
    };
    if let Err(e) = result {
        tracing::warn!("could not write report artifact for {name}: {e}");
    }
}

fn render_fail(fail: &FailReport) -> String {
    let mut text = unified_diff(&fail.expected, &fail.actual);
    if fail.actual_exit != fail.expected_exit {
        text.push_str(&format!(
            "exit: expected {}, actual {}\n",
            fail.expected_exit, fail.actual_exit
        ));
    }
    text
}

fn render_error(error: &ErrorReport) -> String {
    format!(
        "reason: {}\n\nstdout:\n{}\n\nstderr:\n{}\n",
        error.reason, error.stdout, error.stderr
    )
}

// ============================================================================
// Unified Diff
// ============================================================================

/// Unified-diff-style rendering of expected versus actual.
///
/// Both texts are emitted in full, line by line, in a single hunk; there is
/// no context-window truncation. Identical texts render as an empty string.
pub fn unified_diff(expected: &str, actual: &str) -> String {
    let from: Vec<&str> = expected.lines().collect();
    let to: Vec<&str> = actual.lines().collect();
    if from == to {
        return String::new();
    }

    let mut text = String::new();
    text.push_str("--- expected\n");
    text.push_str("+++ actual\n");
    text.push_str(&format!(
        "@@ -{},{} +{},{} @@\n",
        if from.is_empty() { 0 } else { 1 },
        from.len(),
        if to.is_empty() { 0 } else { 1 },
        to.len(),
    ));
    for op in diff_ops(&from, &to) {
        let (marker, line) = match op {
            DiffOp::Keep(line) => (' ', line),
            DiffOp::Remove(line) => ('-', line),
            DiffOp::Add(line) => ('+', line),
        };
        text.push(marker);
        text.push_str(line);
        text.push('\n');
    }
    text
}

enum DiffOp<'a> {
    Keep(&'a str),
    Remove(&'a str),
    Add(&'a str),
}

/// Longest-common-subsequence line walk; removals emitted before additions.
fn diff_ops<'a>(from: &[&'a str], to: &[&'a str]) -> Vec<DiffOp<'a>> {
    let rows = from.len();
    let cols = to.len();
    let mut lcs = vec![vec![0usize; cols + 1]; rows + 1];
    for i in (0..rows).rev() {
        for j in (0..cols).rev() {
            lcs[i][j] = if from[i] == to[j] {
                lcs[i + 1][j + 1] + 1
            } else {
                lcs[i + 1][j].max(lcs[i][j + 1])
            };
        }
    }

    let mut ops = Vec::with_capacity(rows + cols);
    let (mut i, mut j) = (0, 0);
    while i < rows && j < cols {
        if from[i] == to[j] {
            ops.push(DiffOp::Keep(from[i]));
            i += 1;
            j += 1;
        } else if lcs[i + 1][j] >= lcs[i][j + 1] {
            ops.push(DiffOp::Remove(from[i]));
            i += 1;
        } else {
            ops.push(DiffOp::Add(to[j]));
            j += 1;
        }
    }
    while i < rows {
        ops.push(DiffOp::Remove(from[i]));
        i += 1;
    }
    while j < cols {
        ops.push(DiffOp::Add(to[j]));
        j += 1;
    }
    ops
}

// ============================================================================
// Tests
// ============================================================================

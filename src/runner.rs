//! Case execution
//!
//! Runs the executable under test for one resolved case: blocking spawn,
//! full capture of stdout/stderr/exit code, normalization, comparison.
//! Everything that can go wrong inside a case folds into its verdict; the
//! run itself is never aborted from here.

use std::fs;
use std::process::Command;

use serde::Serialize;

use crate::locate;
use crate::normalize::normalize;
use crate::orchestrate::RunConfig;
use crate::resolve::{Channel, ResolvedCase};

/// Outcome of one case.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "verdict")]
pub enum Verdict {
    #[serde(rename = "PASS")]
    Pass,
    #[serde(rename = "FAIL")]
    Fail(FailReport),
    #[serde(rename = "ERROR")]
    Error(ErrorReport),
}

/// Expected-versus-actual payload of a FAIL verdict.
///
/// Texts are already normalized; `channel` names the stream they came from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FailReport {
    pub channel: Channel,
    pub expected: String,
    pub actual: String,
    pub expected_exit: i32,
    pub actual_exit: i32,
}

/// Diagnostic payload of an ERROR verdict: the case was malformed or
/// unrunnable, independent of the program under test.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ErrorReport {
    pub reason: String,
    /// Partial captures, empty when the process never ran.
    pub stdout: String,
    pub stderr: String,
}

impl ErrorReport {
    /// An error raised before any output was captured.
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
            stdout: String::new(),
            stderr: String::new(),
        }
    }
}

/// Execute one resolved case and judge it.
pub fn run_case(case: &ResolvedCase, config: &RunConfig) -> Verdict {
    let executable = match locate::locate(case.binding, &config.bin_dir) {
        Ok(path) => path,
        Err(e) => return Verdict::Error(ErrorReport::new(e.to_string())),
    };

    let expected_text = match fs::read_to_string(&case.expectation.path) {
        Ok(text) => text,
        Err(e) => {
            return Verdict::Error(ErrorReport::new(format!(
                "unreadable expectation {}: {}",
                case.expectation.path.display(),
                e
            )));
        }
    };

    tracing::debug!(case = %case.name, executable = %executable.display(), "spawning");

    let mut command = Command::new(&executable);
    if config.quiet {
        command.arg("--quiet");
    }
    command.arg(&case.input).current_dir(&config.root);

    let output = match command.output() {
        Ok(output) => output,
        Err(e) => {
            return Verdict::Error(ErrorReport::new(format!(
                "failed to invoke {}: {}",
                executable.display(),
                e
            )));
        }
    };

    let stdout = normalize(&String::from_utf8_lossy(&output.stdout));
    let stderr = normalize(&String::from_utf8_lossy(&output.stderr));

    // A signal-terminated child has no exit code to compare against.
    let Some(actual_exit) = output.status.code() else {
        return Verdict::Error(ErrorReport {
            reason: format!("terminated without an exit code: {}", output.status),
            stdout,
            stderr,
        });
    };

    let expected = normalize(&expected_text);
    let actual = match case.expectation.channel {
        Channel::Stdout => stdout,
        Channel::Stderr => stderr,
    };

    if actual_exit == case.expected_exit && actual == expected {
        Verdict::Pass
    } else {
        Verdict::Fail(FailReport {
            channel: case.expectation.channel,
            expected,
            actual,
            expected_exit: case.expected_exit,
            actual_exit,
        })
    }
}

//! CLI for the golden-test orchestrator
//!
//! ## Usage
//!
//! `goldrun [--cases DIR] [--report DIR] [--bin-dir DIR] [--root DIR] [--quiet] [-v]`
//!
//! Exit codes: 0 when every case passes, 1 when any case fails or errors,
//! 2 when the run itself cannot be carried out (case root missing).
//!
//! ## Design
//!
//! Argument parsing uses clap derive macros. The run returns
//! `CliResult<ExitCode>` instead of calling `process::exit`; only the
//! top-level `run()` function handles errors and exits.

// Enforce explicit error handling - no panicking in production code
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]

use std::fmt;
use std::io;
use std::path::PathBuf;
use std::process;

use clap::Parser;

use crate::orchestrate::{self, RunConfig};
use crate::report::ConsoleReporter;

// ============================================================================
// CLI Error handling
// ============================================================================

/// Exit code for the whole run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExitCode(pub i32);

impl ExitCode {
    /// Every case passed.
    pub const SUCCESS: ExitCode = ExitCode(0);
    /// At least one FAIL or ERROR verdict.
    pub const FAILURE: ExitCode = ExitCode(1);
    /// The run itself could not be carried out (case root missing,
    /// unwritable report directory); distinct from any test outcome.
    pub const DISCOVERY: ExitCode = ExitCode(2);
}

/// Error type for run-level failures.
///
/// Contains a user-facing message and an exit code. The CLI entry point
/// catches these errors, prints the message, and exits with the code.
#[derive(Debug)]
pub struct CliError {
    /// User-facing error message (already formatted for display)
    pub message: String,
    /// Exit code to return to the shell
    pub exit_code: ExitCode,
}

impl CliError {
    pub fn new(message: impl Into<String>, exit_code: ExitCode) -> Self {
        Self {
            message: message.into(),
            exit_code,
        }
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for CliError {}

/// Result type for CLI operations.
pub type CliResult<T> = Result<T, CliError>;

const VERSION: &str = env!("CARGO_PKG_VERSION");

// ============================================================================
// Clap CLI definition
// ============================================================================

/// Golden-test orchestrator for the Wenda compiler binaries
#[derive(Parser, Debug)]
#[command(name = "goldrun")]
#[command(version = VERSION)]
#[command(about = "Run golden tests against the compiler binaries", long_about = None)]
pub struct Cli {
    /// Directory whose immediate subdirectories are the test cases
    #[arg(long, value_name = "DIR", default_value = "tests/golden/cases")]
    pub cases: PathBuf,

    /// Directory receiving per-case diffs, diagnostics and the run summary
    #[arg(long, value_name = "DIR", default_value = "tests/golden/report")]
    pub report: PathBuf,

    /// Directory containing the executables under test
    #[arg(long, value_name = "DIR", default_value = "build/bin")]
    pub bin_dir: PathBuf,

    /// Working directory for the executables under test
    #[arg(long, value_name = "DIR", default_value = ".")]
    pub root: PathBuf,

    /// Pass --quiet to the executable under test
    #[arg(long)]
    pub quiet: bool,

    /// Echo captured output for ERROR cases
    #[arg(short, long)]
    pub verbose: bool,
}

// ============================================================================
// CLI entry point
// ============================================================================

/// Main CLI entry point.
///
/// This is the only place where `process::exit` is called. The orchestrator
/// returns `CliResult` and errors are handled here.
pub fn run() {
    let cli = Cli::parse();

    match execute(cli) {
        Ok(exit_code) => {
            if exit_code.0 != 0 {
                process::exit(exit_code.0);
            }
        }
        Err(e) => {
            if !e.message.is_empty() {
                eprintln!("{}", e.message);
            }
            process::exit(e.exit_code.0);
        }
    }
}

/// Wire the parsed arguments to the orchestrator.
fn execute(cli: Cli) -> CliResult<ExitCode> {
    let config = RunConfig {
        cases_dir: cli.cases,
        report_dir: cli.report,
        bin_dir: cli.bin_dir,
        root: cli.root,
        quiet: cli.quiet,
    };
    let mut reporter = ConsoleReporter::new(io::stdout().lock(), cli.verbose);
    orchestrate::run(&config, &mut reporter)
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_defaults() {
        let cli = Cli::try_parse_from(["goldrun"]).unwrap();
        assert_eq!(cli.cases, PathBuf::from("tests/golden/cases"));
        assert_eq!(cli.report, PathBuf::from("tests/golden/report"));
        assert_eq!(cli.bin_dir, PathBuf::from("build/bin"));
        assert_eq!(cli.root, PathBuf::from("."));
        assert!(!cli.quiet);
        assert!(!cli.verbose);
    }

    #[test]
    fn test_cli_parse_overrides() {
        let cli = Cli::try_parse_from([
            "goldrun",
            "--cases",
            "cases",
            "--report",
            "out",
            "--bin-dir",
            "bin",
            "--root",
            "/srv/project",
            "--quiet",
            "-v",
        ])
        .unwrap();
        assert_eq!(cli.cases, PathBuf::from("cases"));
        assert_eq!(cli.report, PathBuf::from("out"));
        assert_eq!(cli.bin_dir, PathBuf::from("bin"));
        assert_eq!(cli.root, PathBuf::from("/srv/project"));
        assert!(cli.quiet);
        assert!(cli.verbose);
    }

    #[test]
    fn test_exit_codes_are_distinct() {
        assert_eq!(ExitCode::SUCCESS.0, 0);
        assert_eq!(ExitCode::FAILURE.0, 1);
        assert_eq!(ExitCode::DISCOVERY.0, 2);
    }
}
